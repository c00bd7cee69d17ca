//! Error kinds for the engine, per the propagation policy in the design.

use thiserror::Error;

/// The engine's error type.
///
/// `InvalidOptions` and `Allocation` are fatal to the owning instance and
/// are raised to the framework via `Framework::raise_error`; the instance's
/// state is torn down on that path. `DispatchFailure` and
/// `ClassificationDegradation` are non-fatal: the former aborts the current
/// dispatch batch but leaves already-dispatched probes tracked, the latter
/// degrades to a `GenError` outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or malformed configuration at `AlgorithmInit`.
    #[error("invalid argument: {0}")]
    InvalidOptions(String),

    /// Could not allocate instance state or clone a probe.
    #[error("allocation failure: {0}")]
    Allocation(String),

    /// The framework's send primitive returned failure.
    #[error("dispatch failure: {0}")]
    DispatchFailure(String),

    /// A reply field could not be extracted; degrades to `GenError`.
    #[error("classification degraded: {0}")]
    ClassificationDegradation(String),
}

/// A `Result` alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
