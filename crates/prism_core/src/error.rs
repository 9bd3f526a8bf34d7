//! Errors raised while describing a scene or its render settings.

use thiserror::Error;

/// Errors that can occur while building or editing a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Object index {index} out of range (scene has {len} objects)")]
    OutOfRange { index: usize, len: usize },

    #[error("No {0} selected")]
    UnspecifiedSelection(&'static str),
}

pub type SceneResult<T> = Result<T, SceneError>;

impl SceneError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SceneError::InvalidConfiguration(message.into())
    }
}
