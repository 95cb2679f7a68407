//! Typed error enums for the engine boundary and lifecycle operations.
//!
//! [`EngineError`] covers failures reported by the native driver;
//! [`Error`] is the top-level type returned by public APIs and folds in
//! configuration validation.

use thiserror::Error;

use wavelink_core::ConfigError;

use crate::driver::ResourceKind;

/// Errors reported by the native engine driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A handle or argument violated the driver contract.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was rejected.
        reason: String,
    },
    /// Teardown refused because dependents are still attached.
    #[error("cannot destroy {kind}: dependents still attached")]
    Busy {
        /// Kind of the resource that refused to die.
        kind: ResourceKind,
    },
    /// The driver could not allocate the resource.
    #[error("failed to open {kind}: {reason}")]
    OpenFailed {
        /// Kind of the resource being opened.
        kind: ResourceKind,
        /// Driver-provided reason.
        reason: String,
    },
}

/// Top-level error for public lifecycle APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected before reaching the driver.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Failure reported by the native engine driver.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The cleaner thread could not be spawned.
    #[error("failed to spawn cleaner thread: {source}")]
    SpawnCleaner {
        /// I/O error returned by thread spawn.
        #[source]
        source: std::io::Error,
    },
}
