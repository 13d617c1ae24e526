use super::*;

/// Refresh the pool's job on every tick until cancelled. Refresh failures
/// keep the previous job. Configuration errors end the task.
pub(crate) fn spawn_generator(
    pool: Arc<Pool>,
    update_interval: Duration,
    cancel: CancellationToken,
    tasks: &mut JoinSet<()>,
) {
    info!("Spawning generator task");

    let mut ticker = interval(update_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tasks.spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(err) = pool.refresh().await {
                        if err
                            .downcast_ref::<PoolError>()
                            .is_some_and(PoolError::is_fatal)
                        {
                            error!("Stopping job issuance: {err}");
                            break;
                        }

                        warn!("Failed to refresh job: {err:#}");
                    }
                }
            }
        }

        info!("Shutting down generator");
    });
}
