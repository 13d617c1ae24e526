use super::*;

#[derive(Debug, Parser)]
pub(crate) struct ShareCmd {
    #[arg(help = "Read the block template from <TEMPLATE>.")]
    template: PathBuf,
    #[arg(long, help = "Miner's <EXTRANONCE1> as hex.")]
    extranonce1: Extranonce,
    #[arg(long, help = "Miner's <EXTRANONCE2> as hex.")]
    extranonce2: Extranonce,
    #[arg(long, help = "Header <NTIME> as hex.")]
    ntime: Ntime,
    #[arg(long, help = "Header <NONCE> as hex.")]
    nonce: Nonce,
}

#[derive(Debug, Serialize)]
pub(crate) struct Output {
    #[serde(flatten)]
    pub(crate) share: Share,
    pub(crate) block: Option<String>,
}

impl ShareCmd {
    pub(crate) async fn run(self, settings: Settings) -> Result {
        let difficulty = settings.difficulty();

        let pool = template_pool(settings, &self.template).await?;
        let job = first_job(&pool).await?;

        let submit = Submit {
            username: "foundry".into(),
            job_id: job.id(),
            extranonce2: self.extranonce2,
            ntime: self.ntime,
            nonce: self.nonce,
        };

        let share = pool
            .submit(&self.extranonce1, &submit, difficulty)
            .await
            .map_err(|err| anyhow!("share rejected: {err}"))?;

        let output = Output {
            block: share.block_hex(),
            share,
        };

        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(())
    }
}
