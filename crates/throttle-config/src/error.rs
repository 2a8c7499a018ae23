use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Project root not found\nSearched upward from: {0}\n\
        Hint: run inside a directory containing stack.kdl or .throttle/stack.kdl, \
        or set THROTTLE_PROJECT_ROOT"
    )]
    ProjectRootNotFound(PathBuf),

    #[error("stack.kdl not found in project root: {0}")]
    StackFileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
