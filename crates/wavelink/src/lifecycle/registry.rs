//! Concurrent registry of live finalization records.

use std::sync::Arc;

use dashmap::DashMap;

use crate::driver::Handle;
use crate::lifecycle::record::FinalizationRecord;

/// Collection of all records whose destructor has not run yet, keyed by
/// native handle. Safe under concurrent insert, remove, and snapshot without
/// external locking.
pub(crate) struct Registry {
    records: DashMap<Handle, Arc<FinalizationRecord>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub(crate) fn register(&self, record: Arc<FinalizationRecord>) {
        tracing::debug!(handle = ?record.handle(), kind = %record.kind(), "registered record");
        self.records.insert(record.handle(), record);
    }

    /// Removes a record; repeated calls for the same record are no-ops.
    pub(crate) fn unregister(&self, record: &FinalizationRecord) {
        if self.records.remove(&record.handle()).is_some() {
            tracing::debug!(handle = ?record.handle(), kind = %record.kind(), "unregistered record");
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Snapshot for bulk shutdown: records holding a dependency edge first,
    /// so dependents are closed before the resources they depend on.
    ///
    /// The snapshot itself has no side effect; callers still close each
    /// yielded record.
    pub(crate) fn drain_ordered(&self) -> Vec<Arc<FinalizationRecord>> {
        let mut ordered = Vec::with_capacity(self.records.len());
        let mut roots = Vec::new();
        for entry in self.records.iter() {
            let record = Arc::clone(entry.value());
            if record.has_dependency() {
                ordered.push(record);
            } else {
                roots.push(record);
            }
        }
        ordered.append(&mut roots);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ResourceKind;
    use crate::lifecycle::cleaner::NoticeSender;
    use crate::lifecycle::native_ref::NativeRef;

    fn record(raw: u64, kind: ResourceKind) -> Arc<FinalizationRecord> {
        FinalizationRecord::new(Handle::from_raw(raw), kind, Box::new(|_| Ok(())), None)
    }

    #[test]
    fn membership_tracks_register_and_unregister() {
        let registry = Registry::new();
        let a = record(1, ResourceKind::Context);
        let b = record(2, ResourceKind::Context);
        registry.register(Arc::clone(&a));
        registry.register(Arc::clone(&b));
        assert_eq!(registry.len(), 2);

        registry.unregister(&a);
        registry.unregister(&a);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn drain_yields_dependents_before_roots() {
        let registry = Registry::new();
        let parent = record(1, ResourceKind::Context);
        let parent_ref = Arc::new(NativeRef::new(
            Arc::clone(&parent),
            NoticeSender::disconnected(),
        ));
        let child = FinalizationRecord::new(
            Handle::from_raw(2),
            ResourceKind::Sender,
            Box::new(|_| Ok(())),
            Some(parent_ref),
        );
        registry.register(Arc::clone(&parent));
        registry.register(Arc::clone(&child));

        let drained = registry.drain_ordered();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].handle(), child.handle());
        assert_eq!(drained[1].handle(), parent.handle());
    }
}
