//! スタック（環境）設定

use serde::Serialize;
use std::fmt;
use throttle_cloud::Secret;

/// 本番スタック名
pub const PROD_STACK: &str = "prod";

/// デプロイ先の名前（`prod`、`staging`、開発者個人のスタックなど）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_prod(&self) -> bool {
        self.0 == PROD_STACK
    }

    /// 先頭文字のみ大文字化（"staging" → "Staging"）
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// スタックファイルから読み込んだ設定値
///
/// この段階ではすべて任意。必須かどうかはリゾルバーがスタックに応じて判定する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackSettings {
    /// プロジェクト名（タグキー `<project>-stack` に使用）
    pub project: Option<String>,

    /// CDNディストリビューションに紐付けるACM証明書
    pub ssl_cert_arn: Option<String>,

    /// CDNエイリアス（そのまま使用）
    pub cnames: Option<Vec<String>>,

    /// NS委任レコードを置く親ゾーン（本番以外のみ）
    pub parent_zone_id: Option<Secret<String>>,

    /// データベースインスタンスのマスターパスワード
    pub rds_password: Option<Secret<String>>,

    /// データベースインスタンスを含むか
    pub database: Option<bool>,

    /// バケットのインデックスとしてアップロードするHTMLファイルのパス
    pub index_asset: Option<String>,
}

impl StackSettings {
    /// `self` に `other` を重ねる（`other` にある値が優先）
    pub fn merge(&mut self, other: StackSettings) {
        if other.project.is_some() {
            self.project = other.project;
        }
        if other.ssl_cert_arn.is_some() {
            self.ssl_cert_arn = other.ssl_cert_arn;
        }
        if other.cnames.is_some() {
            self.cnames = other.cnames;
        }
        if other.parent_zone_id.is_some() {
            self.parent_zone_id = other.parent_zone_id;
        }
        if other.rds_password.is_some() {
            self.rds_password = other.rds_password;
        }
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.index_asset.is_some() {
            self.index_asset = other.index_asset;
        }
    }

    pub fn includes_database(&self) -> bool {
        self.database.unwrap_or(false)
    }
}

/// 1スタックの解決に必要な情報
#[derive(Debug, Clone, PartialEq)]
pub struct StackConfig {
    pub project: String,
    pub stack: Environment,
    pub settings: StackSettings,
}

impl StackConfig {
    pub fn new(
        project: impl Into<String>,
        stack: impl Into<Environment>,
        settings: StackSettings,
    ) -> Self {
        Self {
            project: project.into(),
            stack: stack.into(),
            settings,
        }
    }
}
