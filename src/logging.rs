//! Logging setup for TubeDeck.
//!
//! Routes the `log` facade through `env_logger` with a single line format
//! shared by every component: `[timestamp] [LEVEL] [target] message`.

use std::io::Write;

use chrono::Local;
use env_logger::{Builder, Env};

use crate::error::{TubeDeckError, TubeDeckResult};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] [{}] [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder
}

/// Install the global logger.
///
/// Fails if another logger is already installed; callers that may run more
/// than once (tests, embedded hosts) should use [`init_once`].
pub fn init() -> TubeDeckResult<()> {
    builder()
        .try_init()
        .map_err(|e| TubeDeckError::LoggingError(e.to_string()))?;
    log::info!("[LOGGING] Logging system initialized");
    Ok(())
}

/// Install the global logger, ignoring an already-installed one.
pub fn init_once() {
    if init().is_err() {
        log::debug!("[LOGGING] Logger already installed");
    }
}
