//! KDLパーサー
//!
//! スタックファイルを [`StackSettings`] にパースする。ファイルの例:
//!
//! ```kdl
//! project "throttle-head-web"
//!
//! config {
//!     sslCertArn "arn:aws:acm:us-east-1:123456789012:certificate/abc"
//! }
//!
//! stack "staging" {
//!     cnames "staging.throttlehead.dev"
//!     parentZoneId env="THROTTLE_PARENT_ZONE_ID"
//! }
//! ```
//!
//! `stack` ブロックは名前が読み込み中のスタックと一致する場合のみ適用され、
//! トップレベルの `config` の後に適用される。

mod config;

pub use config::parse_config;

use crate::error::{Result, StackError};
use crate::model::StackSettings;
use kdl::KdlDocument;
use std::fs;
use std::path::Path;
use tracing::debug;

/// スタックファイルを `stack` 向けにパース
pub fn parse_stack_file<P: AsRef<Path>>(path: P, stack: &str) -> Result<StackSettings> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| StackError::IoError {
        path: path.as_ref().to_path_buf(),
        message: e.to_string(),
    })?;
    parse_stack_string(&content, stack)
}

/// スタックファイルの内容を `stack` 向けにパース
pub fn parse_stack_string(content: &str, stack: &str) -> Result<StackSettings> {
    let doc: KdlDocument = content.parse()?;

    let mut settings = StackSettings::default();
    let mut stack_overrides = Vec::new();

    for node in doc.nodes() {
        match node.name().value() {
            "project" => {
                if let Some(name) = node.entries().first().and_then(|e| e.value().as_string()) {
                    settings.project = Some(name.to_string());
                }
            }
            "config" => {
                settings.merge(parse_config(node)?);
            }
            "stack" => {
                let name = node
                    .entries()
                    .first()
                    .and_then(|e| e.value().as_string())
                    .ok_or_else(|| StackError::InvalidConfig("stack requires a name".to_string()))?;

                if name == stack {
                    stack_overrides.push(parse_config(node)?);
                } else {
                    debug!(block = name, target = stack, "Skipping stack block");
                }
            }
            other => {
                debug!(node = other, "Skipping unknown node");
            }
        }
    }

    for overrides in stack_overrides {
        settings.merge(overrides);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests;
