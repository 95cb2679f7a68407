//! Sender peer proxy.

use std::fmt;
use std::sync::Arc;

use crate::driver::Handle;
use crate::error::Error;
use crate::lifecycle::{Lifecycle, NativeRef};

/// Sender peer attached to a context.
///
/// While the sender is open, its context cannot be destroyed: an explicit
/// context close fails with `Busy`, and deferred reclamation waits for the
/// sender's record to close first.
pub struct Sender {
    inner: Arc<NativeRef>,
    lifecycle: Arc<Lifecycle>,
}

impl Sender {
    pub(crate) fn new(inner: Arc<NativeRef>, lifecycle: Arc<Lifecycle>) -> Self {
        Self { inner, lifecycle }
    }

    /// Native handle backing this sender.
    pub fn handle(&self) -> Handle {
        self.inner.record().handle()
    }

    /// Destroys the sender now, detaching it from its context.
    ///
    /// Closing an already-closed sender is a no-op success.
    pub fn close(&self) -> Result<(), Error> {
        self.lifecycle.close(&self.inner).map_err(Error::from)
    }
}

impl fmt::Debug for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("handle", &self.handle())
            .finish()
    }
}
