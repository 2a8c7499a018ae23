//! レイヤー化されたスタック読み込み
//!
//! 発見とパースを組み合わせる: `stack.kdl` → `stack.{stack}.kdl` →
//! `stack.local.kdl`。後のレイヤーがキー単位で上書きする。

use crate::error::Result;
use crate::model::{StackConfig, StackSettings};
use crate::parser::parse_stack_file;
use std::path::Path;
use throttle_config::{discover_stack_files, find_project_root};
use tracing::{debug, info, instrument};

/// カレントディレクトリを含むプロジェクトから `stack` を読み込む
#[instrument]
pub fn load_stack(stack: &str) -> Result<StackConfig> {
    let project_root = find_project_root()?;
    load_stack_from_root(&project_root, stack)
}

/// 指定したプロジェクトルートから `stack` を読み込む
#[instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn load_stack_from_root(project_root: &Path, stack: &str) -> Result<StackConfig> {
    let files = discover_stack_files(project_root, stack)?;

    let mut settings = StackSettings::default();
    for layer in files.layers() {
        debug!(file = %layer.display(), "Applying configuration layer");
        settings.merge(parse_stack_file(layer, stack)?);
    }

    let project = settings.project.clone().unwrap_or_else(|| {
        project_root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string()
    });

    info!(project = %project, stack, "Stack configuration loaded");
    Ok(StackConfig::new(project, stack, settings))
}
