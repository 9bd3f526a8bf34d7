//! Error types for the renderer.

use prism_core::SceneError;
use thiserror::Error;

/// Errors that can prevent a render from starting.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Settings or scene failed validation.
    #[error("invalid render request: {0}")]
    Scene(#[from] SceneError),

    #[error("a render is already in progress")]
    AlreadyRendering,

    /// The orchestration thread could not be started.
    #[error("failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
