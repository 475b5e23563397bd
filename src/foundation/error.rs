/// Convenience result type used across easel.
pub type EaselResult<T> = Result<T, EaselError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum EaselError {
    /// Invalid user-provided or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image primitive could not be fetched.
    ///
    /// `source` is the underlying load error (IO, HTTP, malformed data URL).
    #[error("image load error for '{url}': {source}")]
    ImageLoad {
        /// The URL exactly as it appeared in the primitive.
        url: String,
        /// Underlying load failure.
        #[source]
        source: anyhow::Error,
    },

    /// Fetched bytes could not be decoded into pixels.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors raised by a surface while drawing or reading back pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding the final raster.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EaselError {
    /// Build a [`EaselError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`EaselError::ImageLoad`] value.
    pub fn image_load(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::ImageLoad {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Build a [`EaselError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`EaselError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`EaselError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` for failures of the image resource itself (fetch or decode).
    pub fn is_image_failure(&self) -> bool {
        matches!(self, Self::ImageLoad { .. } | Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
