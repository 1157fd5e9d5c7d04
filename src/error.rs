//! Error types shared by the dynamic-programming solvers.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that abort a solver run.
///
/// None of these are recoverable: a run either completes and produces every
/// stage table, or it stops before any result is reported.
#[derive(Debug, Error)]
pub enum Error {
    /// A top-level problem parameter is out of range.
    #[error("{0}")]
    Configuration(String),

    /// A stage table could not be allocated.
    #[error("failed to allocate stage table: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    /// The trial trace file could not be created or written.
    #[error("failed to write trial trace: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
