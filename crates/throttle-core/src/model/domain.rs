//! スタックごとのドメイン導出

use super::stack::Environment;
use crate::error::{Result, StackError};
use throttle_cloud::Secret;

/// 本番スタックが配信するApexドメイン
pub const BASE_DOMAIN: &str = "throttlehead.dev";

/// スタックのホストゾーンをDNSに接続する方法
#[derive(Debug, Clone, PartialEq)]
pub enum Delegation {
    /// Apexゾーンそのもの（委任なし）
    Apex,
    /// `parent_zone_id` からNSレコードで委任されるサブドメイン
    Subdomain { parent_zone_id: Secret<String> },
}

/// スタック名から導出したドメイン情報
#[derive(Debug, Clone, PartialEq)]
pub struct DomainConfig {
    pub base_domain: String,
    pub full_domain: String,
    pub delegation: Delegation,
}

impl DomainConfig {
    /// `stack` のドメインを導出
    ///
    /// `prod` はApexを配信する。それ以外のスタックは `<stack>.<apex>` を配信し、
    /// 委任先の親ゾーンIDが必要。
    pub fn for_stack(stack: &Environment, parent_zone_id: Option<Secret<String>>) -> Result<Self> {
        if stack.is_prod() {
            if parent_zone_id.is_some() {
                tracing::debug!("parentZoneId is ignored for the prod stack");
            }
            return Ok(Self {
                base_domain: BASE_DOMAIN.to_string(),
                full_domain: BASE_DOMAIN.to_string(),
                delegation: Delegation::Apex,
            });
        }

        let parent_zone_id = parent_zone_id.ok_or_else(|| StackError::missing("parentZoneId"))?;
        Ok(Self {
            base_domain: BASE_DOMAIN.to_string(),
            full_domain: format!("{}.{}", stack, BASE_DOMAIN),
            delegation: Delegation::Subdomain { parent_zone_id },
        })
    }

    pub fn is_prod(&self) -> bool {
        matches!(self.delegation, Delegation::Apex)
    }

    pub fn parent_zone_id(&self) -> Option<&Secret<String>> {
        match &self.delegation {
            Delegation::Apex => None,
            Delegation::Subdomain { parent_zone_id } => Some(parent_zone_id),
        }
    }
}
