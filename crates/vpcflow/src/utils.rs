use colored::Colorize;
use std::path::PathBuf;
use vpcflow_core::TopologyLayout;

/// レイアウトの読み込み元
pub enum LayoutSource {
    File(PathBuf),
    BuiltIn,
}

/// レイアウトを決定する（共通ロジック）
///
/// `-f` で指定されていればそれを、なければ設定ファイルを探し、
/// 見つからなければ組み込みレイアウトを使う。
pub fn resolve_layout(file: Option<PathBuf>) -> anyhow::Result<(TopologyLayout, LayoutSource)> {
    let path = match file {
        Some(path) => Some(path),
        None => vpcflow_config::find_topology_file_optional()?,
    };

    let layout = vpcflow_core::load_layout_or_default(path.as_deref())?;
    let source = match path {
        Some(path) => LayoutSource::File(path),
        None => LayoutSource::BuiltIn,
    };
    Ok((layout, source))
}

/// 読み込んだレイアウトの情報を表示（stderr）
pub fn print_layout_source(source: &LayoutSource) {
    match source {
        LayoutSource::File(path) => {
            eprintln!("📄 レイアウト: {}", path.display().to_string().cyan());
        }
        LayoutSource::BuiltIn => {
            eprintln!("📄 レイアウト: {}", "(組み込み)".cyan());
        }
    }
}

/// 不変条件違反を表示して終了コード 1 で終了
pub fn exit_with_violations(report: &vpcflow_core::ValidationReport) -> ! {
    eprintln!();
    eprintln!(
        "{}",
        format!("✗ 不変条件違反 ({}件)", report.len()).red().bold()
    );
    for violation in report.violations() {
        eprintln!("  - {}", violation);
    }
    std::process::exit(1);
}
