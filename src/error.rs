//! Error types for merkle tree construction and path lookup.

use thiserror::Error;

/// Boxed error raised by a [`Content`] or [`Algorithm`] implementation.
///
/// [`Content`]: crate::content::Content
/// [`Algorithm`]: crate::hash::Algorithm
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for merkle tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a tree or extracting a path.
///
/// None of them are transient: hashing and equality are expected to be
/// deterministic, so a failure means the content or algorithm is broken.
/// The failing implementation's own error is kept as the [`source`].
///
/// [`source`]: std::error::Error::source
#[derive(Error, Debug)]
pub enum Error {
    /// Construction was called with zero content items.
    #[error("cannot construct tree with no content")]
    EmptyInput,

    /// A content digest, or an interior node hash, could not be computed.
    #[error("digest computation failed")]
    Digest(#[source] BoxError),

    /// A content equality comparison failed during path lookup.
    #[error("content equality check failed")]
    Equality(#[source] BoxError),
}

impl Error {
    /// Wraps a digest failure.
    pub fn digest<E: Into<BoxError>>(err: E) -> Error {
        Error::Digest(err.into())
    }

    /// Wraps an equality failure.
    pub fn equality<E: Into<BoxError>>(err: E) -> Error {
        Error::Equality(err.into())
    }
}
