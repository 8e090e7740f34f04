//! Error types for singlet.
//!
//! The library has a single runtime failure mode: a factory passed to one of
//! the `get_or_create` operations could not produce an instance.  The error
//! carries the name of the type being constructed and the factory's own
//! message.  The slot the factory was meant to fill stays empty, so any later
//! call retries construction from scratch.

use thiserror::Error;

/// The top-level error type used throughout singlet.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A factory failed to produce an instance.
    ///
    /// The corresponding slot remains empty; a later call for the same type
    /// re-runs the factory.
    #[error("construction of `{type_name}` failed: {message}")]
    Construction {
        /// Name of the type whose construction was attempted.
        type_name: &'static str,
        /// The factory's error, rendered to a message.
        message: String,
    },
}

impl Error {
    /// Wrap a factory error raised while constructing an instance of `T`.
    pub(crate) fn construction<T>(err: impl std::fmt::Display) -> Self {
        Error::Construction {
            type_name: std::any::type_name::<T>(),
            message: err.to_string(),
        }
    }
}

/// Shorthand `Result` type used throughout singlet.
pub type Result<T, E = Error> = std::result::Result<T, E>;
