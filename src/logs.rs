use {super::*, tracing_appender::non_blocking::WorkerGuard};

/// Log to stderr, filtered by `RUST_LOG`. Logs are flushed when the returned
/// guard drops.
pub(crate) fn init() -> WorkerGuard {
    let (writer, guard) = non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(writer)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    guard
}
