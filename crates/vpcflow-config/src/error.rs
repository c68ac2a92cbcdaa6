use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "レイアウトファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: topology.local.kdl, .topology.local.kdl, topology.kdl, .topology.kdl\n\
        - ./.vpcflow/ ディレクトリ\n\
        - ~/.config/vpcflow/topology.kdl\n\
        または VPCFLOW_CONFIG_PATH 環境変数で直接指定できます"
    )]
    TopologyFileNotFound,

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
