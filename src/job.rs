use super::*;

/// One unit of work handed to miners.
///
/// Everything is fixed at construction. The only interior state is the set of
/// headers already submitted against the job.
pub struct Job {
    id: JobId,
    template: Arc<BlockTemplate>,
    generation_transaction: GenerationTransaction,
    algorithm: Arc<dyn HashAlgorithm>,
    merkle_tree: MerkleTree,
    transactions: Vec<Vec<u8>>,
    clean_jobs: bool,
    ntime_drift: u32,
    proof_of_stake_hybrid: bool,
    created: Instant,
    submitted: Mutex<HashSet<BlockHash>>,
}

impl Job {
    pub const DEFAULT_NTIME_DRIFT: u32 = 7200;

    /// `transactions` are the decoded template transactions, as returned by
    /// [`BlockTemplate::raw_transactions`].
    pub fn new(
        id: JobId,
        template: Arc<BlockTemplate>,
        generation_transaction: GenerationTransaction,
        transactions: Vec<Vec<u8>>,
        algorithm: Arc<dyn HashAlgorithm>,
    ) -> Self {
        let merkle_tree = MerkleTree::new(template.transaction_hashes());

        Self {
            id,
            template,
            generation_transaction,
            algorithm,
            merkle_tree,
            transactions,
            clean_jobs: false,
            ntime_drift: Self::DEFAULT_NTIME_DRIFT,
            proof_of_stake_hybrid: false,
            created: Instant::now(),
            submitted: Mutex::new(HashSet::new()),
        }
    }

    pub fn with_clean_jobs(mut self, clean_jobs: bool) -> Self {
        self.clean_jobs = clean_jobs;
        self
    }

    pub fn with_ntime_drift(mut self, ntime_drift: u32) -> Self {
        self.ntime_drift = ntime_drift;
        self
    }

    pub fn with_proof_of_stake_hybrid(mut self, proof_of_stake_hybrid: bool) -> Self {
        self.proof_of_stake_hybrid = proof_of_stake_hybrid;
        self
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn template(&self) -> &Arc<BlockTemplate> {
        &self.template
    }

    pub fn height(&self) -> u64 {
        self.template.height
    }

    pub fn generation_transaction(&self) -> &GenerationTransaction {
        &self.generation_transaction
    }

    pub fn merkle_tree(&self) -> &MerkleTree {
        &self.merkle_tree
    }

    pub fn algorithm(&self) -> &Arc<dyn HashAlgorithm> {
        &self.algorithm
    }

    pub fn previous_block_hash(&self) -> BlockHash {
        self.template.previous_block_hash
    }

    pub fn previous_block_hash_reversed(&self) -> PrevHash {
        PrevHash::from(self.template.previous_block_hash)
    }

    pub fn coinbase_initial(&self) -> &[u8] {
        self.generation_transaction.coinbase_initial()
    }

    pub fn coinbase_final(&self) -> &[u8] {
        self.generation_transaction.coinbase_final()
    }

    pub fn version(&self) -> Version {
        Version::from(self.template.version)
    }

    pub fn bits(&self) -> Nbits {
        self.template.bits
    }

    pub fn ntime(&self) -> Ntime {
        Ntime::from(self.template.current_time)
    }

    pub fn clean_jobs(&self) -> bool {
        self.clean_jobs
    }

    pub fn transactions(&self) -> &[Vec<u8>] {
        &self.transactions
    }

    pub fn created(&self) -> Instant {
        self.created
    }

    pub fn notify(&self) -> Notify {
        Notify {
            job_id: self.id,
            prevhash: self.previous_block_hash_reversed(),
            coinb1: hex::encode(self.coinbase_initial()),
            coinb2: hex::encode(self.coinbase_final()),
            merkle_branches: self.merkle_tree.steps().to_vec(),
            version: self.version(),
            nbits: self.bits(),
            ntime: self.ntime(),
            clean_jobs: self.clean_jobs,
        }
    }

    /// Check a miner's submission against this job. `now` is the current
    /// unix time in seconds.
    pub fn validate_share(
        &self,
        extranonce1: &Extranonce,
        extranonce2: &Extranonce,
        ntime: Ntime,
        nonce: Nonce,
        difficulty: Difficulty,
        now: u32,
    ) -> Result<Share, StratumError> {
        if extranonce2.len() != ExtraNonce::EXTRANONCE2_SIZE {
            return Err(StratumError::InvalidExtranonce2);
        }

        if ntime.get() < self.template.current_time
            || ntime.get() > now.saturating_add(self.ntime_drift)
        {
            return Err(StratumError::NtimeOutOfRange);
        }

        let coinbase = serialize_coinbase(self, extranonce1, extranonce2);
        let coinbase_hash = sha256d::Hash::hash(&coinbase);
        let merkle_root = self.merkle_tree.with_first(MerkleNode::from(coinbase_hash));
        let header = serialize_header(self, &merkle_root, ntime, nonce);

        let block_hash = BlockHash::from_byte_array(sha256d::Hash::hash(&header).to_byte_array());

        if self.submitted.lock().contains(&block_hash) {
            return Err(StratumError::Duplicate);
        }

        let hash = self
            .algorithm
            .hash(&header)
            .and_then(|digest| hash_to_u256(&digest))
            .map_err(|err| {
                error!("Failed to hash header for job {}: {err}", self.id);
                StratumError::Internal
            })?;

        let multiplier = self.algorithm.multiplier();

        if hash > difficulty.to_target(multiplier) {
            return Err(StratumError::AboveTarget);
        }

        // Only accepted shares count as submitted.
        if !self.submitted.lock().insert(block_hash) {
            return Err(StratumError::Duplicate);
        }

        let is_block = hash <= self.bits().to_target();

        let block = is_block.then(|| {
            serialize_block(self, &header, &coinbase, self.proof_of_stake_hybrid)
        });

        Ok(Share {
            job_id: self.id,
            height: self.height(),
            extranonce1: extranonce1.clone(),
            extranonce2: extranonce2.clone(),
            ntime,
            nonce,
            hash: hex::encode(hash.to_big_endian()),
            target_difficulty: difficulty,
            difficulty: Difficulty::of_hash(hash, multiplier),
            block_hash,
            coinbase_txid: Txid::from_byte_array(coinbase_hash.to_byte_array()),
            is_block,
            block,
        })
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("height", &self.template.height)
            .field("previous_block_hash", &self.template.previous_block_hash)
            .field("clean_jobs", &self.clean_jobs)
            .finish_non_exhaustive()
    }
}
