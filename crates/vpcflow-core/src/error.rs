use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("無効なCIDR表記: {0}")]
    InvalidCidr(String),

    #[error("無効なプレフィックス長: /{0} (0〜32 の範囲で指定してください)")]
    InvalidPrefixLength(u8),

    #[error("CIDR {cidr} のホスト部が 0 ではありません (正規形: {canonical})")]
    HostBitsSet { cidr: String, canonical: String },

    #[error("ゾーンが重複しています: {0}")]
    DuplicateZone(String),

    #[error("トポロジーの不変条件違反 ({count}件):\n{details}")]
    Invariant { count: usize, details: String },
}

pub type Result<T> = std::result::Result<T, TopologyError>;
