mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vpcflow_cloud::OutputFormat;

#[derive(Parser)]
#[command(name = "vpcflow")]
#[command(about = "VPC ネットワークを宣言し、検証し、テンプレートにする。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// テンプレートを生成
    Synth {
        /// レイアウトファイル（省略時は自動検出、なければ組み込みレイアウト）
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// 出力ディレクトリ（省略時は標準出力）
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// 出力形式 (json, yaml)
        #[arg(long, env = "VPCFLOW_FORMAT", default_value = "json")]
        format: OutputFormat,
        /// 不変条件の検証をスキップ
        #[arg(long)]
        no_validate: bool,
    },
    /// トポロジーを検証
    Validate {
        /// レイアウトファイル（省略時は自動検出、なければ組み込みレイアウト）
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// 宣言されるリソースを一覧表示
    List {
        /// レイアウトファイル（省略時は自動検出、なければ組み込みレイアウト）
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// バージョン情報を表示
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout はテンプレート出力に使うので、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Synth {
            file,
            out,
            format,
            no_validate,
        } => commands::synth::handle(file, out, format, no_validate),
        Commands::Validate { file } => commands::validate::handle(file),
        Commands::List { file } => commands::list::handle(file),
        Commands::Version => {
            println!("vpcflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
