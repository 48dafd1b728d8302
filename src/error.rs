//! Error taxonomy
//!
//! Only construction failures are fatal. Storage and render errors are
//! recovered where they happen and logged.

use thiserror::Error;

/// Fatal errors raised while building a [`crate::GameEngine`]
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("2D drawing context is unavailable on this surface")]
    ContextUnavailable,
    #[error("invalid tuning: {0}")]
    InvalidTuning(#[from] TuningError),
}

/// High score storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("failed to read key: {0}")]
    Read(String),
    #[error("failed to write key: {0}")]
    Write(String),
}

/// Per-frame drawing failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("draw backend error: {0}")]
    Backend(String),
}

/// Tuning load/validation failures
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}
