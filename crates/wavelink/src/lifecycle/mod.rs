//! Registry, collector queue, and shutdown drain for native resources.

mod cleaner;
mod native_ref;
mod record;
mod registry;

use std::sync::Arc;
use std::time::Duration;

pub(crate) use native_ref::NativeRef;

use crate::driver::{Destructor, Handle, ResourceKind};
use crate::error::{EngineError, Error};
use crate::lifecycle::cleaner::Cleaner;
use crate::lifecycle::record::{FinalizationRecord, close_record};
use crate::lifecycle::registry::Registry;

/// Facade over the registry and cleaner thread.
///
/// One lifecycle instance manages every resource opened through a
/// [`Runtime`](crate::runtime::Runtime).
pub(crate) struct Lifecycle {
    registry: Arc<Registry>,
    cleaner: Cleaner,
}

impl Lifecycle {
    /// Creates the registry and spawns the cleaner thread.
    pub(crate) fn start() -> Result<Self, Error> {
        let registry = Arc::new(Registry::new());
        let cleaner = Cleaner::start(Arc::clone(&registry))?;
        Ok(Self { registry, cleaner })
    }

    /// Registers a freshly opened handle and wraps it for a proxy.
    pub(crate) fn register(
        &self,
        handle: Handle,
        kind: ResourceKind,
        destructor: Destructor,
        dependency: Option<Arc<NativeRef>>,
    ) -> Arc<NativeRef> {
        let record = FinalizationRecord::new(handle, kind, destructor, dependency);
        self.registry.register(Arc::clone(&record));
        Arc::new(NativeRef::new(record, self.cleaner.notices()))
    }

    /// Explicit close path: idempotent, surfaces driver errors to the caller.
    pub(crate) fn close(&self, proxy: &NativeRef) -> Result<(), EngineError> {
        close_record(&self.registry, proxy.record())
    }

    /// Number of records whose destructor has not run yet.
    pub(crate) fn live_records(&self) -> usize {
        self.registry.len()
    }

    /// Closes every record still open (dependents before parents), then
    /// joins the cleaner thread with a bounded wait. Safe to call more than
    /// once; later calls find nothing to drain.
    pub(crate) fn shutdown(&self, timeout: Duration) {
        self.cleaner.stop_accepting();
        let remaining = self.registry.drain_ordered();
        if !remaining.is_empty() {
            tracing::debug!(count = remaining.len(), "draining records at shutdown");
        }
        for record in remaining {
            if let Err(error) = close_record(&self.registry, &record) {
                tracing::warn!(
                    handle = ?record.handle(),
                    kind = %record.kind(),
                    %error,
                    "shutdown teardown failed, native handle leaked"
                );
            }
        }
        self.cleaner.join(timeout);
    }
}
