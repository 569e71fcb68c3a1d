use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a console subscriber at `level`; `RUST_LOG` takes precedence.
/// Calling it again once a subscriber is set does nothing.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}
