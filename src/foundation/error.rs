/// Result alias used by the fallible edges of the crate (config, loading, rendering sinks).
pub type PoseChainResult<T> = Result<T, PoseChainError>;

/// Errors raised outside the playback core.
///
/// Stitching, blending and buffer management never fail; they degrade instead.
/// Only configuration, file loading and renderer sinks report errors.
#[derive(thiserror::Error, Debug)]
pub enum PoseChainError {
    /// Invalid configuration or input shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source file could not be read.
    #[error("load error: {0}")]
    Load(String),

    /// JSON or JSONL content could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PoseChainError {
    /// Build a [`PoseChainError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PoseChainError::Load`].
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`PoseChainError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
