use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    #[default]
    Pending,
    Orphaned,
    Confirmed,
}

/// What the pool records about a block it found.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBlock {
    pub height: u64,
    pub status: BlockStatus,
    pub block_hash: BlockHash,
    pub tx_hash: Txid,
    /// Coinbase value of the template.
    pub amount: u64,
    /// What the pool wallet output pays.
    pub reward: u64,
    pub time: DateTime<Utc>,
}

impl PersistedBlock {
    pub fn new(job: &Job, share: &Share, time: DateTime<Utc>) -> Self {
        Self {
            height: job.height(),
            status: BlockStatus::Pending,
            block_hash: share.block_hash,
            tx_hash: share.coinbase_txid,
            amount: job.template().coinbase_value,
            reward: job.generation_transaction().outputs.pool_reward(),
            time,
        }
    }
}
