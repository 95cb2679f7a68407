//! Receiver peer proxy.

use std::fmt;
use std::sync::Arc;

use crate::driver::Handle;
use crate::error::Error;
use crate::lifecycle::{Lifecycle, NativeRef};

/// Receiver peer attached to a context.
///
/// While the receiver is open, its context cannot be destroyed: an explicit
/// context close fails with `Busy`, and deferred reclamation waits for the
/// receiver's record to close first.
pub struct Receiver {
    inner: Arc<NativeRef>,
    lifecycle: Arc<Lifecycle>,
}

impl Receiver {
    pub(crate) fn new(inner: Arc<NativeRef>, lifecycle: Arc<Lifecycle>) -> Self {
        Self { inner, lifecycle }
    }

    /// Native handle backing this receiver.
    pub fn handle(&self) -> Handle {
        self.inner.record().handle()
    }

    /// Destroys the receiver now, detaching it from its context.
    ///
    /// Closing an already-closed receiver is a no-op success.
    pub fn close(&self) -> Result<(), Error> {
        self.lifecycle.close(&self.inner).map_err(Error::from)
    }
}

impl fmt::Debug for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("handle", &self.handle())
            .finish()
    }
}
