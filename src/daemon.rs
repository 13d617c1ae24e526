use super::*;

/// The coin daemon the pool takes templates from and hands blocks to.
#[async_trait]
pub trait Daemon: Send + Sync {
    async fn block_template(&self) -> Result<BlockTemplate>;

    /// Returns the daemon's rejection reason, `None` when the block was
    /// accepted.
    async fn submit_block(&self, block: &[u8]) -> Result<Option<String>>;

    async fn validate_address(&self, address: &str) -> Result<bool>;
}

/// Offline daemon reading templates from a JSON file. Submitted blocks are
/// kept in memory.
#[derive(Debug)]
pub struct TemplateFile {
    path: PathBuf,
    chain: Chain,
    submitted: Mutex<Vec<Vec<u8>>>,
}

impl TemplateFile {
    pub fn new(path: impl Into<PathBuf>, chain: Chain) -> Self {
        Self {
            path: path.into(),
            chain,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl Daemon for TemplateFile {
    async fn block_template(&self) -> Result<BlockTemplate> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read block template `{}`", self.path.display()))?;

        BlockTemplate::from_json(&json)
            .with_context(|| format!("failed to load block template `{}`", self.path.display()))
    }

    async fn submit_block(&self, block: &[u8]) -> Result<Option<String>> {
        bitcoin::consensus::deserialize::<Block>(block).context("submitted block does not decode")?;
        self.submitted.lock().push(block.to_vec());
        Ok(None)
    }

    async fn validate_address(&self, address: &str) -> Result<bool> {
        Ok(self.chain.address(address).is_ok())
    }
}
