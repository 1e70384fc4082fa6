//! Log subscriber setup for the binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a compact stderr logger.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at `info`, or at
/// `debug` when `verbose` is set.
pub fn init(verbose: bool) {
    let default = if verbose {
        "rtw_planner=debug,info"
    } else {
        "rtw_planner=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
