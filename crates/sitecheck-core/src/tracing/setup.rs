//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `SITECHECK_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "sitecheck_core=info,sitecheck_analysis=info,sitecheck_cli=info";

/// Initialize the sitecheck tracing/logging system.
///
/// Reads the `SITECHECK_LOG` environment variable for per-crate log levels.
/// Format: `SITECHECK_LOG=sitecheck_analysis=debug,sitecheck_cli=info`
///
/// Logs go to stderr so that reports written to stdout stay machine-readable.
/// Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SITECHECK_LOG")
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
