use crate::utils::{exit_with_violations, print_layout_source, resolve_layout};
use colored::Colorize;
use std::path::PathBuf;
use vpcflow_cloud::{ManifestOptions, OutputFormat, synthesize};
use vpcflow_core::{describe, validate};

pub fn handle(
    file: Option<PathBuf>,
    out: Option<PathBuf>,
    format: OutputFormat,
    no_validate: bool,
) -> anyhow::Result<()> {
    let (layout, source) = resolve_layout(file)?;
    print_layout_source(&source);

    let topology = describe(&layout);

    if no_validate {
        tracing::warn!("Invariant validation skipped");
    } else {
        let report = validate(&topology);
        if !report.is_ok() {
            exit_with_violations(&report);
        }
    }

    let manifest = synthesize(&topology, &ManifestOptions::from_layout(&layout))?;

    match out {
        Some(dir) => {
            let path = manifest.write_to(&dir, &layout.stack, format)?;
            eprintln!(
                "{} {} ({}個のリソース)",
                "✓ テンプレートを書き出しました:".green().bold(),
                path.display().to_string().cyan(),
                manifest.len()
            );
        }
        None => {
            print!("{}", manifest.render(format)?);
        }
    }

    Ok(())
}
