//! Engine runtime: a driver plus the resource lifecycle built on top of it.

use std::sync::Arc;
use std::time::Duration;

use wavelink_core::ContextConfig;

use crate::context::Context;
use crate::driver::{Destructor, EngineDriver, ResourceKind, check_handle};
use crate::error::Error;
use crate::lifecycle::Lifecycle;

/// Default bound on the shutdown drain's wait for the cleaner thread.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle used by applications to open contexts and drain everything at exit.
///
/// Dropping the runtime runs [`Runtime::shutdown`] with
/// [`DEFAULT_SHUTDOWN_TIMEOUT`], so resources never outlive a normal process
/// exit unclosed.
pub struct Runtime {
    driver: Arc<dyn EngineDriver>,
    lifecycle: Arc<Lifecycle>,
}

impl Runtime {
    /// Starts a runtime over the given driver, spawning the cleaner thread.
    pub fn new(driver: Arc<dyn EngineDriver>) -> Result<Self, Error> {
        let lifecycle = Arc::new(Lifecycle::start()?);
        Ok(Self { driver, lifecycle })
    }

    /// Opens a shared context.
    ///
    /// The context owns memory pools and network workers shared by the
    /// senders and receivers later attached to it.
    pub fn open_context(&self, config: &ContextConfig) -> Result<Context, Error> {
        config.validate()?;
        let handle = self.driver.open_context(config)?;
        check_handle(handle, ResourceKind::Context)?;
        let destructor: Destructor = {
            let driver = Arc::clone(&self.driver);
            Box::new(move |handle| driver.destroy_context(handle))
        };
        let inner = self
            .lifecycle
            .register(handle, ResourceKind::Context, destructor, None);
        Ok(Context::new(
            inner,
            Arc::clone(&self.driver),
            Arc::clone(&self.lifecycle),
        ))
    }

    /// Number of native resources whose destructor has not run yet.
    pub fn live_resources(&self) -> usize {
        self.lifecycle.live_records()
    }

    /// Closes every resource still open (dependents before parents), then
    /// stops the cleaner thread, waiting at most `timeout` for it to exit.
    ///
    /// Shutdown is best-effort: on timeout the cleaner is detached and the
    /// call returns anyway. Calling this more than once is harmless.
    pub fn shutdown(&self, timeout: Duration) {
        self.lifecycle.shutdown(timeout);
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.lifecycle.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}
