//! Reachability tracking for proxies.

use std::sync::Arc;

use crate::lifecycle::cleaner::NoticeSender;
use crate::lifecycle::record::FinalizationRecord;

/// Shared inner state of a proxy.
///
/// Reachability of a proxy is the liveness of its `Arc<NativeRef>`: user
/// code holds one reference, and each dependent record holds another (the
/// dependency edge). When the last reference drops while the record is
/// still open, the proxy became unreachable without an explicit close and
/// the record is handed to the cleaner thread.
pub(crate) struct NativeRef {
    record: Arc<FinalizationRecord>,
    notices: NoticeSender,
}

impl NativeRef {
    pub(crate) fn new(record: Arc<FinalizationRecord>, notices: NoticeSender) -> Self {
        Self { record, notices }
    }

    pub(crate) fn record(&self) -> &Arc<FinalizationRecord> {
        &self.record
    }
}

impl Drop for NativeRef {
    fn drop(&mut self) {
        if self.record.is_open() {
            self.notices.notify(Arc::clone(&self.record));
        }
    }
}
