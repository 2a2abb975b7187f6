//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "tsgen=info,tsgen_cli=info,tsgen_core=info";

const VERBOSE_FILTER: &str = "tsgen=debug,tsgen_cli=debug,tsgen_core=debug";

/// Install the global subscriber, writing to stderr.
///
/// `verbose` overrides `RUST_LOG`. Installing twice is a no-op.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
