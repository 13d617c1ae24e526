use super::*;

mod hash;
mod job;
mod settings_cmd;
mod share;
mod watch;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
    #[command(about = "Hash input with the configured algorithm")]
    Hash(hash::HashCmd),
    #[command(about = "Build a job from a block template file")]
    Job(job::JobCmd),
    #[command(about = "Print resolved settings")]
    Settings(settings_cmd::SettingsCmd),
    #[command(about = "Validate a share against a block template file")]
    Share(share::ShareCmd),
    #[command(about = "Watch a block template file and print a job for every change")]
    Watch(watch::WatchCmd),
}

impl Subcommand {
    pub(crate) async fn run(self, settings: Settings, cancel_token: CancellationToken) -> Result {
        match self {
            Self::Hash(hash) => hash.run(settings),
            Self::Job(job) => job.run(settings).await,
            Self::Settings(settings_cmd) => settings_cmd.run(settings),
            Self::Share(share) => share.run(settings).await,
            Self::Watch(watch) => watch.run(settings, cancel_token).await,
        }
    }
}

async fn template_pool(settings: Settings, template: &Path) -> Result<Pool> {
    let daemon = Arc::new(TemplateFile::new(template, settings.chain()));
    Pool::new(Arc::new(settings), daemon).await
}

async fn first_job(pool: &Pool) -> Result<Arc<Job>> {
    pool.refresh()
        .await?
        .context("block template produced no job")
}
