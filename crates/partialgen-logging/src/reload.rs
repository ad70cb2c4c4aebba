//! Dynamic log level reloading support

use crate::layer::level_filter;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use partialgen_core::{GenError, GenResult, LogLevel};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;

type LevelHandle = reload::Handle<LevelFilter, tracing_subscriber::Registry>;

/// Handle for dynamically reloading the log level filter
pub struct ReloadHandle {
    handle: Mutex<Option<LevelHandle>>,
}

impl ReloadHandle {
    /// Create a new reload handle
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Set the reload handle (called during initialization)
    pub fn set_handle(&self, handle: LevelHandle) {
        *self.handle.lock() = Some(handle);
    }

    /// Reload the filter to use a new log level
    ///
    /// Fails with [`GenError::Config`] when no subscriber installed a handle or
    /// the subscriber holding it has been dropped.
    pub fn reload_level(&self, level: LogLevel) -> GenResult<()> {
        let guard = self.handle.lock();
        let Some(handle) = guard.as_ref() else {
            return Err(GenError::Config(
                "log level reload handle not initialized".to_string(),
            ));
        };
        handle
            .reload(level_filter(level))
            .map_err(|e| GenError::Config(format!("failed to reload log level {level}: {e}")))
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}
