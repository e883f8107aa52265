#![forbid(unsafe_code)]

//! Error type shared by configuration and wrapping.

use std::io;
use std::path::PathBuf;

/// Errors from configuring or running a wrap.
#[derive(Debug, thiserror::Error)]
pub enum WrapError {
    /// The requested maximum width was zero, negative, or NaN.
    #[error("max width must be greater than zero, got {0}")]
    InvalidMaxWidth(f64),
    /// The character source failed while being read.
    #[error("failed to read from character source")]
    Source(#[source] io::Error),
    /// The output sink rejected a write or a newline.
    #[error("output sink rejected a write")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// A file could not be opened for reading or created for writing.
    #[error("could not open {}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WrapError {
    /// Whether this error belongs to the I/O failure category (source, sink
    /// or resource) rather than configuration.
    #[must_use]
    pub fn is_io(&self) -> bool {
        !matches!(self, Self::InvalidMaxWidth(_))
    }

    pub(crate) fn sink<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Sink(Box::new(err))
    }
}

/// Result alias defaulting to [`WrapError`].
pub type Result<T, E = WrapError> = std::result::Result<T, E>;
