#![allow(deprecated)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 一時ディレクトリに作るテスト用プロジェクト
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_topology_kdl(&self, content: &str) {
        let path = self.root.path().join("topology.kdl");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクト内で実行する vpcflow コマンド
    ///
    /// 実行環境の設定ファイルを拾わないよう、環境変数と設定ディレクトリを隔離する。
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("vpcflow").unwrap();
        cmd.current_dir(self.path())
            .env_remove("VPCFLOW_CONFIG_PATH")
            .env_remove("VPCFLOW_FORMAT")
            .env_remove("RUST_LOG")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"));
        cmd
    }
}
