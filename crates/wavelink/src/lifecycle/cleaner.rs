//! Collector queue and cleaner thread.
//!
//! Proxies that become unreachable without an explicit close are handed to a
//! single background worker, which closes their records. Destructor failures
//! on this path have no caller to report to; they are logged and the native
//! handle stays leaked.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::error::Error;
use crate::lifecycle::record::{FinalizationRecord, close_record};
use crate::lifecycle::registry::Registry;

pub(crate) enum CleanerMsg {
    /// A proxy became unreachable while its record was still open.
    Reclaim(Arc<FinalizationRecord>),
    /// Stop the worker; acknowledged on `ack` right before the loop exits.
    Shutdown { ack: Sender<()> },
}

/// Sending side of the collector queue, cloned into every proxy.
#[derive(Clone)]
pub(crate) struct NoticeSender {
    tx: Sender<CleanerMsg>,
    accepting: Arc<AtomicBool>,
}

impl NoticeSender {
    pub(crate) fn notify(&self, record: Arc<FinalizationRecord>) {
        if !self.accepting.load(Ordering::Acquire) {
            return;
        }
        // A send after the worker exited only happens during shutdown, when
        // the drain owns whatever is left.
        let _ = self.tx.send(CleanerMsg::Reclaim(record));
    }

    #[cfg(test)]
    pub(crate) fn disconnected() -> Self {
        let (tx, _rx) = crossbeam_channel::unbounded();
        Self {
            tx,
            accepting: Arc::new(AtomicBool::new(true)),
        }
    }
}

/// Owner of the cleaner thread and the collector queue feeding it.
pub(crate) struct Cleaner {
    notices: NoticeSender,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Cleaner {
    pub(crate) fn start(registry: Arc<Registry>) -> Result<Self, Error> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let worker = thread::Builder::new()
            .name("wavelink-cleaner".into())
            .spawn(move || run_cleaner(rx, registry))
            .map_err(|source| Error::SpawnCleaner { source })?;
        Ok(Self {
            notices: NoticeSender {
                tx,
                accepting: Arc::new(AtomicBool::new(true)),
            },
            worker: Mutex::new(Some(worker)),
        })
    }

    pub(crate) fn notices(&self) -> NoticeSender {
        self.notices.clone()
    }

    /// Stops accepting reclaim notices. Best-effort: a drop racing with the
    /// flag flip may still enqueue, and the shutdown drain closes its record
    /// anyway.
    pub(crate) fn stop_accepting(&self) {
        self.notices.accepting.store(false, Ordering::Release);
    }

    /// Asks the worker to exit and waits for it with a bounded timeout.
    /// On timeout the thread is left detached; shutdown is best-effort.
    pub(crate) fn join(&self, timeout: Duration) {
        let handle = self
            .worker
            .lock()
            .expect("cleaner worker lock poisoned")
            .take();
        let Some(handle) = handle else {
            return;
        };
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        if self.notices.tx.send(CleanerMsg::Shutdown { ack: ack_tx }).is_err() {
            let _ = handle.join();
            return;
        }
        match ack_rx.recv_timeout(timeout) {
            Ok(()) => {
                let _ = handle.join();
            }
            Err(_) => {
                tracing::warn!(?timeout, "cleaner thread did not stop in time, detaching");
            }
        }
    }
}

fn run_cleaner(rx: Receiver<CleanerMsg>, registry: Arc<Registry>) {
    tracing::debug!("cleaner thread started");
    while let Ok(msg) = rx.recv() {
        match msg {
            CleanerMsg::Reclaim(record) => {
                tracing::debug!(
                    handle = ?record.handle(),
                    kind = %record.kind(),
                    "collected unreachable proxy"
                );
                if let Err(error) = close_record(&registry, &record) {
                    tracing::warn!(
                        handle = ?record.handle(),
                        kind = %record.kind(),
                        %error,
                        "deferred teardown failed, native handle leaked"
                    );
                }
            }
            CleanerMsg::Shutdown { ack } => {
                let _ = ack.send(());
                break;
            }
        }
    }
    tracing::debug!("cleaner thread stopped");
}
