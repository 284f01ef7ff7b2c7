//! # Error Types for the PD model

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A string did not name any member of a closed category
    #[error("Invalid {category} value: '{value}'")]
    InvalidValue {
        category: &'static str,
        value: String,
    },

    /// An integer did not map to any member of a closed category
    #[error("Invalid {category} discriminant: {value}")]
    InvalidDiscriminant { category: &'static str, value: u8 },

    #[error("No {registry} named '{name}'")]
    NotFound {
        registry: &'static str,
        name: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
