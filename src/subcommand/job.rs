use super::*;

#[derive(Debug, Parser)]
pub(crate) struct JobCmd {
    #[arg(help = "Read the block template from <TEMPLATE>.")]
    template: PathBuf,
    #[arg(long, help = "Print only the mining.notify parameters.")]
    raw: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct Output {
    pub(crate) job_id: JobId,
    pub(crate) height: u64,
    pub(crate) previous_block_hash: BlockHash,
    pub(crate) algorithm: Algorithm,
    pub(crate) network_difficulty: f64,
    pub(crate) coinbase_value: u64,
    pub(crate) coinbase_size: usize,
    pub(crate) outputs: Vec<CoinbaseOutput>,
    pub(crate) notify: Notify,
}

#[derive(Debug, Serialize)]
pub(crate) struct CoinbaseOutput {
    pub(crate) value: u64,
    pub(crate) address: Option<String>,
}

impl JobCmd {
    pub(crate) async fn run(self, settings: Settings) -> Result {
        let algorithm = settings.algorithm();
        let network = settings.chain().network();

        let pool = template_pool(settings, &self.template).await?;
        let job = first_job(&pool).await?;

        if self.raw {
            println!("{}", serde_json::to_string(&job.notify())?);
            return Ok(());
        }

        let generation_transaction = job.generation_transaction();

        let output = Output {
            job_id: job.id(),
            height: job.height(),
            previous_block_hash: job.previous_block_hash(),
            algorithm,
            network_difficulty: Difficulty::of_bits(job.bits().to_compact()),
            coinbase_value: job.template().coinbase_value,
            coinbase_size: job.coinbase_initial().len()
                + ExtraNonce::PLACEHOLDER_SIZE
                + job.coinbase_final().len(),
            outputs: generation_transaction
                .outputs
                .as_slice()
                .iter()
                .map(|output| CoinbaseOutput {
                    value: output.value.to_sat(),
                    address: Address::from_script(&output.script_pubkey, network)
                        .map(|address| address.to_string())
                        .ok(),
                })
                .collect(),
            notify: job.notify(),
        };

        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(())
    }
}
