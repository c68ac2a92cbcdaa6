//! Manifest synthesis error types

use std::path::PathBuf;
use thiserror::Error;

/// Manifest synthesis errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("論理IDが重複しています: {logical_id} ({first} と {second})")]
    DuplicateLogicalId {
        logical_id: String,
        first: String,
        second: String,
    },

    #[error("未宣言のリソースを参照しています: {0}")]
    UnresolvedReference(String),

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("テンプレートの書き込みに失敗しました: {path}\n理由: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
