use crate::utils::{exit_with_violations, print_layout_source, resolve_layout};
use colored::Colorize;
use std::path::PathBuf;
use vpcflow_core::{describe, validate};

pub fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "トポロジーを検証中...".blue());

    let (layout, source) = match resolve_layout(file) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ レイアウトエラー".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };
    print_layout_source(&source);

    let topology = describe(&layout);
    let report = validate(&topology);

    println!();
    println!("サマリー:");
    println!("  プロジェクト: {}", layout.name.cyan());
    println!("  スタック: {}", layout.stack.cyan());
    println!("  VPC: {}", layout.network_cidr);
    println!("  ゾーン: {}個", layout.zones.len());
    for zone in &layout.zones {
        println!(
            "    - {} (public: {}, private: {})",
            zone.availability_zone.cyan(),
            zone.public_cidr,
            zone.private_cidr
        );
    }
    println!("  リソース: {}個", topology.len());

    if !report.is_ok() {
        exit_with_violations(&report);
    }

    println!();
    println!("{}", "✓ トポロジーは正常です！".green().bold());
    Ok(())
}
