//! Lifecycle management for native engine resources.
//!
//! The engine allocates opaque native handles: a shared [`Context`] and the
//! [`Sender`]/[`Receiver`] peers attached to it. Each handle must be released
//! through a fallible destructor exactly once, and a context must never be
//! torn down while peers created from it are still alive.
//!
//! Every proxy owns a finalization record tracked by a concurrent registry.
//! Releasing a handle happens through one of two paths:
//!
//! - **explicit close**: the user calls `close()`, the destructor runs
//!   synchronously, and its result is returned;
//! - **deferred reclamation**: the proxy is dropped without a close, and a
//!   background cleaner thread runs the destructor, logging failures.
//!
//! Whichever path comes first wins an atomic open/closed race on the record;
//! the loser is a no-op. A peer's record holds a strong reference to its
//! context, so the context cannot be reclaimed behind a live peer.
//! [`Runtime::shutdown`] drains everything still open, dependents first.

pub mod context;
pub mod driver;
pub mod error;
mod lifecycle;
pub mod receiver;
pub mod runtime;
pub mod sender;

#[cfg(test)]
mod tests;

pub use context::Context;
pub use driver::{EngineDriver, Handle, ResourceKind};
pub use error::{EngineError, Error};
pub use receiver::Receiver;
pub use runtime::{DEFAULT_SHUTDOWN_TIMEOUT, Runtime};
pub use sender::Sender;

pub use wavelink_core::{
    ChannelLayout, ClockSource, ConfigError, ContextConfig, FecEncoding, MediaEncoding,
    ReceiverConfig, SampleFormat, SenderConfig,
};
