//! Shared engine context proxy.

use std::fmt;
use std::sync::Arc;

use wavelink_core::{ReceiverConfig, SenderConfig};

use crate::driver::{Destructor, EngineDriver, Handle, ResourceKind, check_handle};
use crate::error::Error;
use crate::lifecycle::{Lifecycle, NativeRef};
use crate::receiver::Receiver;
use crate::sender::Sender;

/// Shared engine context.
///
/// A context owns the memory pools and network workers shared by the senders
/// and receivers attached to it. Attached peers keep the context alive: the
/// native teardown is refused with [`Busy`](crate::error::EngineError::Busy)
/// while any peer is still open, and deferred reclamation never destroys a
/// context before its peers.
///
/// A context is destroyed either by [`Context::close`] or, if dropped
/// without one, by the cleaner thread once no peer references it anymore.
pub struct Context {
    inner: Arc<NativeRef>,
    driver: Arc<dyn EngineDriver>,
    lifecycle: Arc<Lifecycle>,
}

impl Context {
    pub(crate) fn new(
        inner: Arc<NativeRef>,
        driver: Arc<dyn EngineDriver>,
        lifecycle: Arc<Lifecycle>,
    ) -> Self {
        Self {
            inner,
            driver,
            lifecycle,
        }
    }

    /// Native handle backing this context.
    pub fn handle(&self) -> Handle {
        self.inner.record().handle()
    }

    /// Opens a sender attached to this context.
    pub fn open_sender(&self, config: &SenderConfig) -> Result<Sender, Error> {
        config.validate()?;
        let handle = self.driver.open_sender(self.handle(), config)?;
        check_handle(handle, ResourceKind::Sender)?;
        let destructor: Destructor = {
            let driver = Arc::clone(&self.driver);
            Box::new(move |handle| driver.destroy_sender(handle))
        };
        let inner = self.lifecycle.register(
            handle,
            ResourceKind::Sender,
            destructor,
            Some(Arc::clone(&self.inner)),
        );
        Ok(Sender::new(inner, Arc::clone(&self.lifecycle)))
    }

    /// Opens a receiver attached to this context.
    pub fn open_receiver(&self, config: &ReceiverConfig) -> Result<Receiver, Error> {
        config.validate()?;
        let handle = self.driver.open_receiver(self.handle(), config)?;
        check_handle(handle, ResourceKind::Receiver)?;
        let destructor: Destructor = {
            let driver = Arc::clone(&self.driver);
            Box::new(move |handle| driver.destroy_receiver(handle))
        };
        let inner = self.lifecycle.register(
            handle,
            ResourceKind::Receiver,
            destructor,
            Some(Arc::clone(&self.inner)),
        );
        Ok(Receiver::new(inner, Arc::clone(&self.lifecycle)))
    }

    /// Destroys the context now.
    ///
    /// Fails with [`Busy`](crate::error::EngineError::Busy) while senders or
    /// receivers are still attached. Closing an already-closed context is a
    /// no-op success.
    pub fn close(&self) -> Result<(), Error> {
        self.lifecycle.close(&self.inner).map_err(Error::from)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("handle", &self.handle())
            .finish()
    }
}
