use {
    super::*,
    tokio::{fs::OpenOptions, io::AsyncWriteExt},
};

/// Owns everything needed to turn daemon templates into jobs and miner
/// submissions into shares and blocks.
pub struct Pool {
    settings: Arc<Settings>,
    daemon: Arc<dyn Daemon>,
    algorithm: Arc<dyn HashAlgorithm>,
    pool_wallet: Address,
    recipients: Vec<(Address, f64)>,
    job_counter: JobCounter,
    extranonce: ExtraNonce,
    jobs: Mutex<Jobs>,
    current: watch::Sender<Option<Arc<Job>>>,
    blocks: Mutex<VecDeque<PersistedBlock>>,
}

impl Pool {
    /// Found blocks kept in memory. The blocks file keeps all of them.
    pub const RECENT_BLOCKS: usize = 256;

    pub async fn new(settings: Arc<Settings>, daemon: Arc<dyn Daemon>) -> Result<Self> {
        let chain = settings.chain();
        let pool_wallet = settings.pool_wallet()?;
        let recipients = settings.rewards().recipients(chain)?;

        let addresses = iter::once(&pool_wallet)
            .chain(recipients.iter().map(|(address, _)| address))
            .collect::<Vec<&Address>>();

        let daemon_ref = &daemon;
        let valid = future::try_join_all(addresses.iter().map(|address| async move {
            daemon_ref
                .validate_address(&address.to_string())
                .await
                .with_context(|| format!("failed to validate address `{address}`"))
        }))
        .await?;

        for (address, valid) in addresses.iter().zip(valid) {
            ensure!(valid, "daemon rejected address `{address}`");
        }

        let algorithm = settings.algorithm().hasher()?;
        let extranonce = ExtraNonce::new(settings.instance_id())?;
        let (current, _) = watch::channel(None);

        info!(
            "Pool on {chain} hashing with {} paying {pool_wallet} and {} reward recipients",
            settings.algorithm(),
            recipients.len()
        );

        Ok(Self {
            jobs: Mutex::new(Jobs::new(settings.stale_grace())),
            settings,
            daemon,
            algorithm,
            pool_wallet,
            recipients,
            job_counter: JobCounter::new(),
            extranonce,
            current,
            blocks: Mutex::new(VecDeque::new()),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Job>>> {
        self.current.subscribe()
    }

    pub fn current(&self) -> Option<Arc<Job>> {
        self.current.borrow().clone()
    }

    /// The most recent found blocks, oldest first.
    pub fn blocks(&self) -> Vec<PersistedBlock> {
        self.blocks.lock().iter().cloned().collect()
    }

    pub fn next_extranonce1(&self) -> Result<Extranonce, PoolError> {
        self.extranonce.next()
    }

    pub fn build_job(&self, template: Arc<BlockTemplate>, clean_jobs: bool) -> Result<Job, PoolError> {
        let amounts = reward_table::split(&self.recipients, template.coinbase_value);
        let outputs = Outputs::new(&self.pool_wallet, &amounts, template.coinbase_value)?;

        let generation_transaction = GenerationTransactionBuilder::new(&template, outputs)?
            .with_tag(self.settings.coinbase_tag())
            .with_tx_comment(self.settings.tx_comment())
            .with_version(self.settings.tx_version())
            .build()?;

        let transactions = template.raw_transactions()?;

        Ok(Job::new(
            self.job_counter.next(),
            template,
            generation_transaction,
            transactions,
            self.algorithm.clone(),
        )
        .with_clean_jobs(clean_jobs)
        .with_ntime_drift(self.settings.ntime_drift())
        .with_proof_of_stake_hybrid(self.settings.proof_of_stake_hybrid()))
    }

    /// Fetch a template and publish a job for it. Returns `None` when the
    /// template did not change.
    pub async fn refresh(&self) -> Result<Option<Arc<Job>>> {
        let template = self
            .daemon
            .block_template()
            .await
            .context("failed to fetch block template")?;

        let previous = self.current();

        if previous
            .as_ref()
            .is_some_and(|job| job.template().as_ref() == &template)
        {
            return Ok(None);
        }

        let clean_jobs = template.clean_jobs(previous.as_ref().map(|job| job.template().as_ref()));

        let job = Arc::new(self.build_job(Arc::new(template), clean_jobs)?);

        self.jobs.lock().insert(job.clone(), Instant::now());
        self.current.send_replace(Some(job.clone()));

        info!(
            "New job {} for height {} with {} transactions (clean_jobs: {clean_jobs})",
            job.id(),
            job.height(),
            job.transactions().len(),
        );

        Ok(Some(job))
    }

    pub async fn submit(
        &self,
        extranonce1: &Extranonce,
        submit: &Submit,
        difficulty: Difficulty,
    ) -> Result<Share, StratumError> {
        let job = self
            .jobs
            .lock()
            .get(submit.job_id, Instant::now())
            .inspect_err(|err| {
                debug!("Rejected share from {} for job {}: {err}", submit.username, submit.job_id)
            })?;

        let share = job
            .validate_share(
                extranonce1,
                &submit.extranonce2,
                submit.ntime,
                submit.nonce,
                difficulty,
                unix_time(),
            )
            .inspect_err(|err| {
                debug!("Rejected share from {} for job {}: {err}", submit.username, submit.job_id)
            })?;

        if let Some(block) = &share.block {
            self.submit_block(&job, &share, block).await;
        }

        Ok(share)
    }

    async fn submit_block(&self, job: &Job, share: &Share, block: &[u8]) {
        info!(
            "Block {} found at height {} by {}",
            share.block_hash,
            job.height(),
            share.extranonce1
        );

        match self.daemon.submit_block(block).await {
            Ok(None) => {
                let record = PersistedBlock::new(job, share, Utc::now());

                if let Err(err) = self.persist(&record).await {
                    warn!("Failed to persist block {}: {err}", share.block_hash);
                }
            }
            Ok(Some(reason)) => warn!("Daemon rejected block {}: {reason}", share.block_hash),
            Err(err) => warn!("Failed to submit block {}: {err}", share.block_hash),
        }
    }

    async fn persist(&self, record: &PersistedBlock) -> Result {
        {
            let mut blocks = self.blocks.lock();

            if blocks.len() == Self::RECENT_BLOCKS {
                blocks.pop_front();
            }

            blocks.push_back(record.clone());
        }

        let Some(path) = self.settings.blocks_file() else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open blocks file `{}`", path.display()))?;

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
