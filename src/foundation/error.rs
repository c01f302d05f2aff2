/// Convenience result type used across the booth.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by library APIs.
///
/// Camera failures are not part of this enum: they are classified as
/// [`crate::CameraError`] and surfaced to the user instead of propagated.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid user-provided data (sticker scale, canvas size, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// An uploaded or configured image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Internal rasterization invariant violated while compositing.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BoothError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BoothError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
