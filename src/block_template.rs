use super::*;

/// `getblocktemplate` result as handed over by the daemon.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct BlockTemplate {
    pub version: i32,
    #[serde(rename = "previousblockhash")]
    pub previous_block_hash: BlockHash,
    pub transactions: Vec<TemplateTransaction>,
    #[serde(default)]
    pub coinbaseaux: CoinbaseAux,
    #[serde(rename = "coinbasevalue")]
    pub coinbase_value: u64,
    pub height: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub bits: Nbits,
    #[serde(rename = "curtime")]
    pub current_time: u32,
    #[serde(rename = "mintime", default, skip_serializing_if = "Option::is_none")]
    pub min_time: Option<u32>,
    #[serde(default)]
    pub mutable: Vec<String>,
    #[serde(rename = "noncerange", default, skip_serializing_if = "Option::is_none")]
    pub nonce_range: Option<String>,
    #[serde(rename = "sizelimit", default, skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<u64>,
    #[serde(rename = "sigoplimit", default, skip_serializing_if = "Option::is_none")]
    pub sigop_limit: Option<u64>,
}

#[derive(Clone, Default, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct CoinbaseAux {
    #[serde(default)]
    pub flags: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct TemplateTransaction {
    pub data: String,
    pub txid: Txid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigops: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Response {
    Envelope { result: BlockTemplate },
    Bare(BlockTemplate),
}

impl BlockTemplate {
    /// Parse a template from daemon JSON, either the bare result or a full
    /// JSON-RPC response, and check the fields the job builder decodes.
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let response = serde_json::from_str::<Response>(json).map_err(|err| {
            TemplateSnafu {
                message: format!("malformed block template: {err}"),
            }
            .build()
        })?;

        let template = match response {
            Response::Envelope { result } => result,
            Response::Bare(template) => template,
        };

        template.validate()?;

        Ok(template)
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        self.coinbase_flags()?;
        self.raw_transactions()?;
        Ok(())
    }

    pub fn coinbase_flags(&self) -> Result<Vec<u8>, PoolError> {
        hex::decode(&self.coinbaseaux.flags).map_err(|err| {
            TemplateSnafu {
                message: format!("invalid coinbaseaux flags: {err}"),
            }
            .build()
        })
    }

    pub fn raw_transactions(&self) -> Result<Vec<Vec<u8>>, PoolError> {
        self.transactions
            .iter()
            .map(|transaction| {
                hex::decode(&transaction.data).map_err(|err| {
                    TemplateSnafu {
                        message: format!("invalid data for transaction {}: {err}", transaction.txid),
                    }
                    .build()
                })
            })
            .collect()
    }

    /// Merkle leaves of the template transactions, internal byte order.
    pub fn transaction_hashes(&self) -> Vec<MerkleNode> {
        self.transactions
            .iter()
            .map(|transaction| MerkleNode::from_byte_array(transaction.txid.to_byte_array()))
            .collect()
    }

    /// A job built on top of `previous` has to tell miners to drop their
    /// work when the chain tip moved.
    pub fn clean_jobs(&self, previous: Option<&BlockTemplate>) -> bool {
        previous.is_none_or(|previous| {
            previous.height != self.height
                || previous.previous_block_hash != self.previous_block_hash
        })
    }
}
