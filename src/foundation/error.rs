/// Convenience result type used across fraquilt.
pub type QuiltResult<T> = Result<T, QuiltError>;

/// Error taxonomy for request validation, compilation and rendering.
///
/// Every variant is detected before the first pixel is written, so a failed render never
/// yields a partial raster. Callers at an outer boundary that only need a pass/fail signal can
/// use [`QuiltError::is_request_failure`].
#[derive(thiserror::Error, Debug)]
pub enum QuiltError {
    /// Expression syntax or semantics (unknown token, component index out of range, ...).
    #[error("parse error: {0}")]
    Parse(String),

    /// Grid or color dimension mismatch.
    #[error("shape error: {0}")]
    Shape(String),

    /// Raster too large or color count out of range.
    #[error("bounds error: {0}")]
    Bounds(String),

    /// Broken internal invariant.
    #[error("internal error: {0}")]
    Internal(String),

    /// Errors when serializing or deserializing requests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuiltError {
    /// Build a [`QuiltError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`QuiltError::Shape`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Build a [`QuiltError::Bounds`] value.
    pub fn bounds(msg: impl Into<String>) -> Self {
        Self::Bounds(msg.into())
    }

    /// Build a [`QuiltError::Internal`] value.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Build a [`QuiltError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Short machine-readable name of the error kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "parse",
            Self::Shape(_) => "shape",
            Self::Bounds(_) => "bounds",
            Self::Internal(_) => "internal",
            Self::Serde(_) => "serde",
            Self::Other(_) => "other",
        }
    }

    /// Whether this error fails the request at the outer boundary.
    ///
    /// The boundary contract does not discriminate kinds: every error is a failed request.
    pub fn is_request_failure(&self) -> bool {
        true
    }
}

impl From<serde_json::Error> for QuiltError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
