/// Convenience result type used across maskserve.
pub type MaskResult<T> = Result<T, MaskError>;

/// Error taxonomy shared by the loader, the mask codec and the mask store.
///
/// Callers branch on the variant: the HTTP layer maps `NotFound` to 404 and picks 400 or
/// 500 for `Decode` depending on whether the bytes came from the client or from disk.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(String),

    /// Malformed image or mask bytes, including a mask whose dimensions do not match
    /// the source image.
    #[error("decode error: {0}")]
    Decode(String),

    /// The requested mask has not been written yet.
    #[error("not found: {0}")]
    NotFound(String),

    /// Wrapped lower-level error from dependencies or the runtime.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskError {
    /// Build a [`MaskError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`MaskError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MaskError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
