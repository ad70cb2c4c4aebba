//! Subscriber construction

use crate::reload::ReloadHandle;
use partialgen_core::LogLevel;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, reload};

/// Environment variable holding optional `EnvFilter` directives
///
/// Directives narrow what the base level lets through, e.g.
/// `PARTIALGEN_LOG=partialgen_core::pipeline=trace` together with `-v`.
pub const LOG_ENV_VAR: &str = "PARTIALGEN_LOG";

/// Convert LogLevel to tracing LevelFilter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Read directives from [`LOG_ENV_VAR`], ignoring unset or unparsable values
fn env_directives() -> Option<EnvFilter> {
    let raw = std::env::var(LOG_ENV_VAR).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    EnvFilter::try_new(raw).ok()
}

/// Initialize logging to stderr at `level`
///
/// Generated units go to stdout or disk, so log output never mixes with
/// them. Returns `false` if a global subscriber was already installed, in
/// which case the level cannot be reloaded through [`ReloadHandle::global`].
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;

    let (filter, handle) = reload::Layer::new(level_filter(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(env_directives())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        );

    // Try to set as global default (ignore error if already set)
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    ReloadHandle::global().set_handle(handle);
    true
}
