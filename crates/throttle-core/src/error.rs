use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("KDL parse error: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("IO error: {path}\nReason: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// 必須の設定値が無い
    #[error("Missing required configuration value: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Config(#[from] throttle_config::ConfigError),

    #[error(transparent)]
    Cloud(#[from] throttle_cloud::CloudError),
}

impl StackError {
    pub fn missing(key: impl Into<String>) -> Self {
        StackError::MissingConfiguration(key.into())
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
