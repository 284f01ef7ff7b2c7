//! Render errors

use p4pd_model::{ConfigError, ModelError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Invalid generator configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Inconsistent model: {0}")]
    Model(#[from] ModelError),

    #[error("Context serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{} {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: &'static str },

    #[error("Template directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
