//! Declaration error types

use thiserror::Error;

/// Errors raised while assembling or rendering a declaration
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource already declared: {0}")]
    ResourceAlreadyExists(String),

    #[error("Resource {resource} references undeclared resource {target}")]
    DanglingReference { resource: String, target: String },

    #[error("Export {export} references undeclared resource {target}")]
    DanglingExport { export: String, target: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
