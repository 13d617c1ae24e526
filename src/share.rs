use super::*;

/// An accepted share.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Share {
    pub job_id: JobId,
    pub height: u64,
    pub extranonce1: Extranonce,
    pub extranonce2: Extranonce,
    pub ntime: Ntime,
    pub nonce: Nonce,
    /// Proof-of-work hash in display order.
    pub hash: String,
    /// Difficulty the share was submitted at.
    pub target_difficulty: Difficulty,
    /// Difficulty the hash actually achieves.
    pub difficulty: f64,
    pub block_hash: BlockHash,
    pub coinbase_txid: Txid,
    pub is_block: bool,
    #[serde(skip)]
    pub block: Option<Vec<u8>>,
}

impl Share {
    pub fn block_hex(&self) -> Option<String> {
        self.block.as_ref().map(hex::encode)
    }
}
