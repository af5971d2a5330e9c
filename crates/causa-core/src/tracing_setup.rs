//! Tracing initialization.

use std::sync::Once;

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Install the global fmt subscriber.
///
/// Reads `CAUSA_LOG` for per-target levels, e.g.
/// `CAUSA_LOG=causa_search::fas=debug,causa_search::generator=warn`.
/// Falls back to the configured level when `CAUSA_LOG` is unset or invalid.
///
/// Returns whether this call installed the subscriber. Later calls are
/// no-ops, and a global subscriber installed by the host application is
/// kept.
pub fn init_tracing(logging: &LoggingConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        installed = match install(logging) {
            Ok(()) => true,
            Err(already_set) => {
                tracing::debug!(error = %already_set, "keeping the host's global subscriber");
                false
            }
        }
    });
    installed
}

fn install(logging: &LoggingConfig) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(logging.effective_level()));
    let with_location = logging.with_location.unwrap_or(false);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(with_location)
                .with_line_number(with_location),
        )
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)
}
