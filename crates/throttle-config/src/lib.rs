//! スタックファイルの発見
//!
//! プロジェクトルートには `stack.kdl`（または `.throttle/stack.kdl`）を置く。
//! スタック別の設定は同じ場所の `stack.<stack>.kdl`、マシン固有の上書きは
//! コミットしない `stack.local.kdl` に置く。

pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// プロジェクトルートを直接指定する環境変数
pub const PROJECT_ROOT_ENV: &str = "THROTTLE_PROJECT_ROOT";

const ROOT_FILE: &str = "stack.kdl";
const HIDDEN_DIR: &str = ".throttle";
const LOCAL_FILE: &str = "stack.local.kdl";

/// 1スタック分の設定ファイル（読み込み順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFiles {
    /// 共通設定（stack.kdl）
    pub root: PathBuf,
    /// スタック固有設定（stack.{stack}.kdl）
    pub stack_override: Option<PathBuf>,
    /// ローカル上書き（stack.local.kdl）
    pub local_override: Option<PathBuf>,
}

impl StackFiles {
    /// 存在するファイルを先のレイヤーから順に返す
    pub fn layers(&self) -> Vec<&Path> {
        let mut layers = vec![self.root.as_path()];
        layers.extend(self.stack_override.as_deref());
        layers.extend(self.local_override.as_deref());
        layers
    }
}

/// プロジェクトルートを検出
///
/// 検索順序:
/// 1. 環境変数 `THROTTLE_PROJECT_ROOT`
/// 2. カレントディレクトリから上へ: `stack.kdl`、次に `.throttle/stack.kdl`
#[tracing::instrument]
pub fn find_project_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var(PROJECT_ROOT_ENV) {
        let path = PathBuf::from(&root);
        debug!(env_root = %root, "Checking {}", PROJECT_ROOT_ENV);
        if root_file(&path).is_some() {
            info!(project_root = %path.display(), "Found project root from environment variable");
            return Ok(path);
        }
    }

    let start_dir = std::env::current_dir()?;
    let mut current = start_dir.clone();
    debug!(start_dir = %start_dir.display(), "Searching for project root");

    loop {
        if root_file(&current).is_some() {
            info!(project_root = %current.display(), "Found project root");
            return Ok(current);
        }

        if !current.pop() {
            break;
        }
    }

    warn!(start_dir = %start_dir.display(), "Project root not found");
    Err(ConfigError::ProjectRootNotFound(start_dir))
}

/// `project_root` 配下の `stack` 用設定ファイルを収集
///
/// 上書きファイルはルートファイルと同じディレクトリで探す。
#[tracing::instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn discover_stack_files(project_root: &Path, stack: &str) -> Result<StackFiles> {
    let root = root_file(project_root)
        .ok_or_else(|| ConfigError::StackFileNotFound(project_root.to_path_buf()))?;
    debug!(file = %root.display(), "Found root file");

    let dir = root.parent().unwrap_or(project_root).to_path_buf();

    let stack_override = Some(dir.join(format!("stack.{}.kdl", stack))).filter(|p| p.exists());
    if let Some(path) = &stack_override {
        debug!(file = %path.display(), "Found stack override");
    }

    let local_override = Some(dir.join(LOCAL_FILE)).filter(|p| p.exists());
    if let Some(path) = &local_override {
        debug!(file = %path.display(), "Found local override");
    }

    Ok(StackFiles {
        root,
        stack_override,
        local_override,
    })
}

/// `stack.<name>.kdl` が存在するスタック名（ソート済み）
pub fn available_stacks(project_root: &Path) -> Result<Vec<String>> {
    let Some(root) = root_file(project_root) else {
        return Ok(Vec::new());
    };
    let dir = root.parent().unwrap_or(project_root);

    let mut stacks: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| {
            name.strip_prefix("stack.")
                .and_then(|rest| rest.strip_suffix(".kdl"))
                .filter(|stack| !stack.is_empty() && *stack != "local")
                .map(|stack| stack.to_string())
        })
        .collect();
    stacks.sort();
    Ok(stacks)
}

fn root_file(dir: &Path) -> Option<PathBuf> {
    [dir.join(ROOT_FILE), dir.join(HIDDEN_DIR).join(ROOT_FILE)]
        .into_iter()
        .find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_discover_root_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stack.kdl"), "// root").unwrap();

        let files = discover_stack_files(temp_dir.path(), "staging").unwrap();
        assert!(files.root.ends_with("stack.kdl"));
        assert!(files.stack_override.is_none());
        assert!(files.local_override.is_none());
        assert_eq!(files.layers().len(), 1);
    }

    #[test]
    fn test_discover_layer_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stack.kdl"), "// root").unwrap();
        fs::write(temp_dir.path().join("stack.staging.kdl"), "// staging").unwrap();
        fs::write(temp_dir.path().join("stack.prod.kdl"), "// prod").unwrap();
        fs::write(temp_dir.path().join("stack.local.kdl"), "// local").unwrap();

        let files = discover_stack_files(temp_dir.path(), "staging").unwrap();
        let layers = files.layers();
        assert_eq!(layers.len(), 3);
        assert!(layers[0].ends_with("stack.kdl"));
        assert!(layers[1].ends_with("stack.staging.kdl"));
        assert!(layers[2].ends_with("stack.local.kdl"));
    }

    #[test]
    fn test_discover_in_hidden_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let hidden = temp_dir.path().join(".throttle");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("stack.kdl"), "// root").unwrap();
        fs::write(hidden.join("stack.dev.kdl"), "// dev").unwrap();

        let files = discover_stack_files(temp_dir.path(), "dev").unwrap();
        assert!(files.root.ends_with(".throttle/stack.kdl"));
        assert!(
            files
                .stack_override
                .unwrap()
                .ends_with(".throttle/stack.dev.kdl")
        );
    }

    #[test]
    fn test_discover_without_root_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = discover_stack_files(temp_dir.path(), "dev");
        assert!(matches!(result, Err(ConfigError::StackFileNotFound(_))));
    }

    #[test]
    fn test_available_stacks() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stack.kdl"), "// root").unwrap();
        fs::write(temp_dir.path().join("stack.staging.kdl"), "// staging").unwrap();
        fs::write(temp_dir.path().join("stack.prod.kdl"), "// prod").unwrap();
        fs::write(temp_dir.path().join("stack.local.kdl"), "// local").unwrap();
        fs::write(temp_dir.path().join("README.md"), "# readme").unwrap();

        let stacks = available_stacks(temp_dir.path()).unwrap();
        assert_eq!(stacks, vec!["prod", "staging"]);
    }

    #[test]
    fn test_available_stacks_without_project() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(available_stacks(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_find_project_root_walks_upward() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("stack.kdl"), "// root").unwrap();
        let nested = temp_dir.path().join("assets").join("img");
        fs::create_dir_all(&nested).unwrap();

        std::env::set_current_dir(&nested).unwrap();
        let result = temp_env::with_var_unset(PROJECT_ROOT_ENV, find_project_root);
        std::env::set_current_dir(original_dir).unwrap();

        let root = result.unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            temp_dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    #[serial]
    fn test_find_project_root_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("stack.kdl"), "// root").unwrap();

        let root = temp_env::with_var(
            PROJECT_ROOT_ENV,
            Some(temp_dir.path().as_os_str()),
            find_project_root,
        )
        .unwrap();
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    #[serial]
    fn test_find_project_root_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let result = temp_env::with_var_unset(PROJECT_ROOT_ENV, find_project_root);
        std::env::set_current_dir(original_dir).unwrap();

        assert!(matches!(result, Err(ConfigError::ProjectRootNotFound(_))));
    }
}
