//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `PROCURA_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "procura_core=info,procura_analysis=info";

/// Initialize the procura tracing/logging system.
///
/// Reads the `PROCURA_LOG` environment variable for per-crate log levels.
/// Format: `PROCURA_LOG=procura_analysis=debug,procura_core=warn`
///
/// Set `procura_analysis=debug` to see every computed partition summary.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("PROCURA_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
