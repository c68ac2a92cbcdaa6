pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// レイアウトファイルを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "VPCFLOW_CONFIG_PATH";

/// 各ディレクトリで探すファイル名（優先順）
pub const CANDIDATES: [&str; 4] = [
    "topology.local.kdl",
    ".topology.local.kdl",
    "topology.kdl",
    ".topology.kdl",
];

/// プロジェクトローカルの設定ディレクトリ名
pub const PROJECT_DIR: &str = ".vpcflow";

/// グローバルなレイアウトファイル (~/.config/vpcflow/topology.kdl)
pub fn global_topology_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vpcflow").join("topology.kdl"))
}

/// `current_dir` を起点にした検索候補（環境変数は含まない）
pub fn search_paths(current_dir: &Path) -> Vec<PathBuf> {
    let project_dir = current_dir.join(PROJECT_DIR);
    CANDIDATES
        .iter()
        .map(|name| current_dir.join(name))
        .chain(CANDIDATES.iter().map(|name| project_dir.join(name)))
        .chain(global_topology_file())
        .collect()
}

/// プロジェクトの topology.kdl ファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 VPCFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: topology.local.kdl, .topology.local.kdl, topology.kdl, .topology.kdl
/// 3. ./.vpcflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/vpcflow/topology.kdl (グローバル設定)
#[instrument]
pub fn find_topology_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            debug!(path = %path.display(), "Using {}", CONFIG_PATH_ENV);
            return Ok(path);
        }
        warn!(path = %path.display(), "{} points to a missing file", CONFIG_PATH_ENV);
    }

    // 2〜4. カレントディレクトリ → ./.vpcflow/ → グローバル設定
    let current_dir = std::env::current_dir()?;
    for path in search_paths(&current_dir) {
        if path.is_file() {
            debug!(path = %path.display(), "Layout file found");
            return Ok(path);
        }
    }

    // どの設定ファイルも見つからなかった
    Err(ConfigError::TopologyFileNotFound)
}

/// 見つからない場合を `None` として返す版
pub fn find_topology_file_optional() -> Result<Option<PathBuf>> {
    match find_topology_file() {
        Ok(path) => Ok(Some(path)),
        Err(ConfigError::TopologyFileNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
