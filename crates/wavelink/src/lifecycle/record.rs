//! Finalization records and the atomic close protocol.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::driver::{Destructor, Handle, ResourceKind};
use crate::error::EngineError;
use crate::lifecycle::native_ref::NativeRef;
use crate::lifecycle::registry::Registry;

/// Bookkeeping entry owning everything needed to release one native handle.
///
/// The `open` flag is the sole synchronization point for destructor
/// invocation: whichever path (explicit close, cleaner, shutdown drain) wins
/// the compare-and-swap runs the destructor; everyone else no-ops.
pub(crate) struct FinalizationRecord {
    handle: Handle,
    kind: ResourceKind,
    destructor: Destructor,
    /// Strong reference keeping the parent proxy state alive until this
    /// record is closed, so a context cannot be reclaimed behind a live
    /// sender or receiver.
    dependency: Mutex<Option<Arc<NativeRef>>>,
    open: AtomicBool,
}

impl FinalizationRecord {
    pub(crate) fn new(
        handle: Handle,
        kind: ResourceKind,
        destructor: Destructor,
        dependency: Option<Arc<NativeRef>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            handle,
            kind,
            destructor,
            dependency: Mutex::new(dependency),
            open: AtomicBool::new(true),
        })
    }

    pub(crate) fn handle(&self) -> Handle {
        self.handle
    }

    pub(crate) fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub(crate) fn has_dependency(&self) -> bool {
        self.dependency
            .lock()
            .expect("dependency edge lock poisoned")
            .is_some()
    }

    /// Wins the Open -> Closed race, or reports that another path already did.
    fn begin_close(&self) -> bool {
        self.open
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn release_dependency(&self) {
        let edge = self
            .dependency
            .lock()
            .expect("dependency edge lock poisoned")
            .take();
        // May be the last reference to the parent proxy state, in which case
        // its drop feeds the parent to the cleaner.
        drop(edge);
    }
}

/// Closes a record: wins the state race, removes the record from the
/// registry, invokes the destructor exactly once, and releases the
/// dependency edge. Losing the race is an idempotent success.
///
/// The record leaves the registry at the state transition regardless of the
/// destructor outcome; a failed destructor means the native handle stays
/// allocated with no further retry.
pub(crate) fn close_record(
    registry: &Registry,
    record: &Arc<FinalizationRecord>,
) -> Result<(), EngineError> {
    if !record.begin_close() {
        return Ok(());
    }
    registry.unregister(record);
    let result = (record.destructor)(record.handle);
    record.release_dependency();
    match &result {
        Ok(()) => {
            tracing::debug!(handle = ?record.handle, kind = %record.kind, "destroyed native resource");
        }
        Err(error) => {
            tracing::debug!(handle = ?record.handle, kind = %record.kind, %error, "native destructor failed");
        }
    }
    result
}
