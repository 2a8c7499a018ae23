use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const STACK_KDL: &str = r#"
project "throttle-head-web"

config {
    sslCertArn "arn:aws:acm:us-east-1:123456789012:certificate/test"
    cnames "throttlehead.dev" "www.throttlehead.dev"
}
"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    /// 共通の stack.kdl を書き込み済みのプロジェクト
    pub fn with_defaults() -> Self {
        let project = Self::new();
        project.write_stack_kdl(STACK_KDL);
        project
    }

    pub fn write_stack_kdl(&self, content: &str) {
        fs::write(self.root.path().join("stack.kdl"), content).unwrap();
    }

    pub fn write_stack_override(&self, stack: &str, content: &str) {
        let path = self.root.path().join(format!("stack.{}.kdl", stack));
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_asset(&self, relative: &str, content: &str) {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// クリーンな環境でプロジェクト内から実行する `throttle`
    pub fn command(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("throttle").unwrap();
        cmd.current_dir(self.path())
            .env_remove("THROTTLE_PROJECT_ROOT")
            .env_remove("THROTTLE_STACK")
            .env_remove("RUST_LOG");
        cmd
    }

    #[allow(dead_code)]
    pub fn file(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.path().join(relative)
    }
}
