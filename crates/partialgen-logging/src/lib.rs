//! partialgen-logging - Tracing subscriber setup for the partialgen tools
//!
//! This crate provides:
//! - [`init_logging`] to install a stderr subscriber at a given [`LogLevel`]
//! - [`ReloadHandle`] to change the active level after initialization
//! - [`LOG_ENV_VAR`] for per-target directives on top of the base level

mod layer;
mod reload;

pub use layer::{LOG_ENV_VAR, init_logging, level_filter};
pub use partialgen_core::LogLevel;
pub use reload::ReloadHandle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
