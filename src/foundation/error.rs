/// Convenience result type used across mathanim.
pub type MathAnimResult<T> = Result<T, MathAnimError>;

/// Top-level error taxonomy for recoverable failures.
///
/// Broken internal invariants (closing an empty path, unequal curve counts after interpolation
/// equalization) are assertions, not variants of this type.
#[derive(thiserror::Error, Debug)]
pub enum MathAnimError {
    /// Invalid user-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed SVG path data.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the parsed string.
        offset: usize,
        /// Human-readable description.
        message: String,
    },

    /// Errors when serializing or deserializing persisted records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors raised while rasterizing into an atlas.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MathAnimError {
    /// Build a [`MathAnimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MathAnimError::Parse`] value.
    pub fn parse(offset: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: msg.into(),
        }
    }

    /// Build a [`MathAnimError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`MathAnimError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<std::io::Error> for MathAnimError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
