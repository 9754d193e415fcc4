use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Install the log subscriber for as long as the returned guard lives.
///
/// `RUST_LOG` wins over `debug`. Logs go to stderr so stdout only carries the report.
pub fn init(debug: bool) -> DefaultGuard {
    let default_directive = if debug {
        "bikefinder=debug,info"
    } else {
        "bikefinder=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    );

    tracing::subscriber::set_default(subscriber)
}
