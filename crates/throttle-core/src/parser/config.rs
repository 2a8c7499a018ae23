//! `config` / `stack` ノードのパース

use crate::error::{Result, StackError};
use crate::model::StackSettings;
use kdl::KdlNode;
use throttle_cloud::Secret;
use tracing::{debug, warn};

/// `config`（または `stack`）ノードの子をパース
pub fn parse_config(node: &KdlNode) -> Result<StackSettings> {
    let mut settings = StackSettings::default();

    let Some(children) = node.children() else {
        return Ok(settings);
    };

    for child in children.nodes() {
        match child.name().value() {
            "sslCertArn" | "ssl-cert-arn" | "ssl_cert_arn" => {
                settings.ssl_cert_arn = string_value(child)?;
            }
            "cnames" => {
                settings.cnames = Some(string_list(child)?);
            }
            "parentZoneId" | "parent-zone-id" | "parent_zone_id" | "primaryZoneId"
            | "primary-zone-id" => {
                settings.parent_zone_id = string_value(child)?.map(Secret::new);
            }
            "rdsPassword" | "rds-password" | "rds_password" => {
                settings.rds_password = string_value(child)?.map(Secret::new);
            }
            "database" => {
                settings.database = Some(bool_flag(child)?);
            }
            "indexAsset" | "index-asset" | "index_asset" => {
                settings.index_asset = string_value(child)?;
            }
            other => {
                warn!(key = other, "Ignoring unknown configuration key");
            }
        }
    }

    Ok(settings)
}

/// インライン値または `env="NAME"` から文字列を読む
///
/// 環境変数が未設定なら `None`（キー未指定扱い）。
fn string_value(node: &KdlNode) -> Result<Option<String>> {
    let key = node.name().value();

    if let Some(env) = node.get("env") {
        let var = env.as_string().ok_or_else(|| {
            StackError::InvalidConfig(format!("{}: env must name an environment variable", key))
        })?;
        let value = std::env::var(var).ok();
        if value.is_none() {
            debug!(key, var, "Environment variable not set");
        }
        return Ok(value);
    }

    match node.entries().iter().find(|e| e.name().is_none()) {
        Some(entry) => entry
            .value()
            .as_string()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| StackError::InvalidConfig(format!("{} must be a string", key))),
        None => Ok(None),
    }
}

/// 真偽値フラグを読む。引数なしのノードは `#true` 扱い
fn bool_flag(node: &KdlNode) -> Result<bool> {
    let key = node.name().value();
    match node.entries().iter().find(|e| e.name().is_none()) {
        Some(entry) => entry
            .value()
            .as_bool()
            .ok_or_else(|| StackError::InvalidConfig(format!("{} must be a boolean", key))),
        None => Ok(true),
    }
}

/// 位置引数をすべて文字列として順序どおりに読む
fn string_list(node: &KdlNode) -> Result<Vec<String>> {
    let key = node.name().value();
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .map(|e| {
            e.value()
                .as_string()
                .map(|s| s.to_string())
                .ok_or_else(|| StackError::InvalidConfig(format!("{} entries must be strings", key)))
        })
        .collect()
}
