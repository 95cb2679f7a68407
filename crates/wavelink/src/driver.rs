//! Seam to the native engine.
//!
//! The engine itself is an external collaborator. This crate needs exactly
//! two operations per resource kind: open and destroy. `destroy` must report
//! [`EngineError::Busy`] instead of silently succeeding while dependents are
//! still attached to the resource.

use std::fmt;

use wavelink_core::{ContextConfig, ReceiverConfig, SenderConfig};

use crate::error::EngineError;

/// Opaque identifier for one native resource.
///
/// The driver never reuses a handle while a finalization record for it is
/// still registered. The zero value is reserved as the null handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.0)
    }
}

/// Kind of native resource behind a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Context,
    Sender,
    Receiver,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Context => "context",
            ResourceKind::Sender => "sender",
            ResourceKind::Receiver => "receiver",
        };
        f.write_str(name)
    }
}

/// Destructor operation releasing one handle.
///
/// The lifecycle guarantees it is invoked at most once per handle; a second
/// invocation is undefined at the native level.
pub type Destructor = Box<dyn Fn(Handle) -> Result<(), EngineError> + Send + Sync>;

/// Driver interface to the native engine.
///
/// Implementations are expected to be cheap to clone behind an `Arc` and
/// callable from any thread; destroy operations may block for the duration
/// of the native teardown.
pub trait EngineDriver: Send + Sync + 'static {
    fn open_context(&self, config: &ContextConfig) -> Result<Handle, EngineError>;

    fn open_sender(&self, context: Handle, config: &SenderConfig) -> Result<Handle, EngineError>;

    fn open_receiver(
        &self,
        context: Handle,
        config: &ReceiverConfig,
    ) -> Result<Handle, EngineError>;

    fn destroy_context(&self, handle: Handle) -> Result<(), EngineError>;

    fn destroy_sender(&self, handle: Handle) -> Result<(), EngineError>;

    fn destroy_receiver(&self, handle: Handle) -> Result<(), EngineError>;
}

/// Rejects the null handle before it can reach the registry.
pub(crate) fn check_handle(handle: Handle, kind: ResourceKind) -> Result<(), EngineError> {
    if handle.is_null() {
        return Err(EngineError::InvalidArgument {
            reason: format!("driver returned a null {kind} handle"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle_is_rejected() {
        let err = check_handle(Handle::from_raw(0), ResourceKind::Context).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument { .. }));
        assert!(check_handle(Handle::from_raw(1), ResourceKind::Context).is_ok());
    }

    #[test]
    fn handle_debug_is_hex() {
        assert_eq!(format!("{:?}", Handle::from_raw(0xbeef)), "Handle(0xbeef)");
    }
}
