use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    // Request errors
    #[error("Invalid assembly name: {name:?}")]
    InvalidAssemblyName { name: String },

    // Repository errors
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Invalid package {}: {reason}", path.display())]
    InvalidPackage { path: PathBuf, reason: String },

    // Archive errors
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    // Config errors
    #[error("Failed to parse nux.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
