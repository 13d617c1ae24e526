use super::*;

#[derive(Debug, Parser)]
pub(crate) struct WatchCmd {
    #[arg(help = "Poll the block template in <TEMPLATE>.")]
    template: PathBuf,
    #[arg(long, help = "Exit after printing <COUNT> jobs.")]
    count: Option<usize>,
}

impl WatchCmd {
    pub(crate) async fn run(self, settings: Settings, cancel_token: CancellationToken) -> Result {
        let update_interval = settings.update_interval();

        let pool = Arc::new(template_pool(settings, &self.template).await?);
        let mut receiver = pool.subscribe();

        let mut tasks = JoinSet::new();
        spawn_generator(pool, update_interval, cancel_token.clone(), &mut tasks);

        let mut printed = 0;

        let result = loop {
            if self.count.is_some_and(|count| printed >= count) {
                break Ok(());
            }

            tokio::select! {
                _ = cancel_token.cancelled() => break Ok(()),
                changed = receiver.changed() => {
                    if changed.is_err() {
                        break Err(anyhow!("job issuance stopped"));
                    }

                    let job = receiver.borrow_and_update().clone();

                    if let Some(job) = job {
                        println!("{}", serde_json::to_string(&job.notify())?);
                        printed += 1;
                    }
                }
            }
        };

        cancel_token.cancel();
        while tasks.join_next().await.is_some() {}

        result
    }
}
