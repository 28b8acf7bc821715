// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuedagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid scheduler option: {0}")]
    InvalidOption(String),

    #[error("Duplicate task id: {0}")]
    DuplicateTask(String),

    #[error("Due date for task '{task}' is out of range ({days} days after {from})")]
    DateOutOfRange {
        task: String,
        from: chrono::NaiveDate,
        days: u64,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DuedagError>;
