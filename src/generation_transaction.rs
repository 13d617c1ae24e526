use super::*;

/// The coinbase transaction of a job, kept as the two byte ranges on either
/// side of the extranonce gap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationTransaction {
    pub version: u32,
    pub signature_script: SignatureScript,
    pub outputs: Outputs,
    pub lock_time: u32,
    pub tx_comment: Option<String>,
    coinbase_initial: Vec<u8>,
    coinbase_final: Vec<u8>,
}

impl GenerationTransaction {
    pub const MAX_SCRIPT_SIG_SIZE: usize = 100;

    /// Version, input count, null outpoint, script length and script `part1`.
    pub fn coinbase_initial(&self) -> &[u8] {
        &self.coinbase_initial
    }

    /// Script `part2`, sequence, outputs, lock time and the optional comment.
    pub fn coinbase_final(&self) -> &[u8] {
        &self.coinbase_final
    }
}

#[derive(Clone, Debug)]
pub struct GenerationTransactionBuilder {
    coinbase_flags: Vec<u8>,
    height: u64,
    outputs: Outputs,
    placeholder_len: usize,
    tag: String,
    timestamp: u64,
    tx_comment: Option<String>,
    version: u32,
}

impl GenerationTransactionBuilder {
    pub fn new(template: &BlockTemplate, outputs: Outputs) -> Result<Self, PoolError> {
        Ok(Self {
            coinbase_flags: template.coinbase_flags()?,
            height: template.height,
            outputs,
            placeholder_len: ExtraNonce::PLACEHOLDER_SIZE,
            tag: String::new(),
            timestamp: u64::from(template.current_time),
            tx_comment: None,
            version: 2,
        })
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_tx_comment(mut self, tx_comment: Option<String>) -> Self {
        self.tx_comment = tx_comment;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_placeholder_len(mut self, placeholder_len: usize) -> Self {
        self.placeholder_len = placeholder_len;
        self
    }

    pub fn build(self) -> Result<GenerationTransaction, PoolError> {
        let signature_script = SignatureScript::new(
            self.height,
            &self.coinbase_flags,
            self.timestamp,
            self.placeholder_len,
            &self.tag,
        )?;

        let script_len = signature_script.len();

        if script_len > GenerationTransaction::MAX_SCRIPT_SIG_SIZE {
            let message = format!(
                "coinbase script is {script_len} bytes (max {})",
                GenerationTransaction::MAX_SCRIPT_SIG_SIZE
            );

            // Without the daemon's flags the script fits, so the template is at fault.
            let flags_len = self.coinbase_flags.len();

            if script_len - flags_len <= GenerationTransaction::MAX_SCRIPT_SIG_SIZE {
                return TemplateSnafu {
                    message: format!("{message} with {flags_len} bytes of coinbase flags"),
                }
                .fail();
            }

            return ConfigurationSnafu { message }.fail();
        }

        let mut coinbase_initial = Vec::new();
        coinbase_initial.extend_from_slice(&self.version.to_le_bytes());
        coinbase_initial.extend(var_int(1));
        coinbase_initial.extend_from_slice(&[0; 32]);
        coinbase_initial.extend_from_slice(&u32::MAX.to_le_bytes());
        coinbase_initial.extend(var_int(script_len as u64));
        coinbase_initial.extend_from_slice(&signature_script.part1);

        let lock_time = 0u32;

        let mut coinbase_final = signature_script.part2.clone();
        coinbase_final.extend_from_slice(&0u32.to_le_bytes());
        coinbase_final.extend(self.outputs.serialize());
        coinbase_final.extend_from_slice(&lock_time.to_le_bytes());

        if let Some(comment) = &self.tx_comment {
            coinbase_final.extend(serialize_string(comment)?);
        }

        Ok(GenerationTransaction {
            version: self.version,
            signature_script,
            outputs: self.outputs,
            lock_time,
            tx_comment: self.tx_comment,
            coinbase_initial,
            coinbase_final,
        })
    }
}
