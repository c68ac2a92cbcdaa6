//! レイアウトローダー
//!
//! レイアウトファイルの読み込みと、ファイルがない場合の組み込みレイアウトへの
//! フォールバックをまとめる。

use crate::error::Result;
use crate::layout::TopologyLayout;
use crate::parser::parse_layout_file;
use std::path::Path;
use tracing::{debug, info, instrument};

/// レイアウトファイルを読み込む
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<TopologyLayout> {
    debug!("Parsing layout file");
    let layout = parse_layout_file(path.as_ref())?;
    info!(
        project = %layout.name,
        stack = %layout.stack,
        zones = layout.zones.len(),
        "Layout loaded"
    );
    Ok(layout)
}

/// パスが指定されていればそれを読み込み、なければ組み込みレイアウトを返す
#[instrument(skip(path))]
pub fn load_layout_or_default(path: Option<&Path>) -> Result<TopologyLayout> {
    match path {
        Some(path) => load_layout(path),
        None => {
            info!("No layout file, using built-in layout");
            Ok(TopologyLayout::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TopologyError;
    use std::fs;

    #[test]
    fn test_load_layout_from_file() -> Result<()> {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("topology.kdl");
        fs::write(
            &path,
            r#"
project "lab"
network {
    cidr "172.16.0.0/16"
    dns-hostnames #true
}
zone "eu-west-1a" {
    public "172.16.0.0/24"
    private "172.16.100.0/24"
}
"#,
        )?;

        let layout = load_layout(&path)?;
        assert_eq!(layout.name, "lab");
        assert_eq!(layout.stack, "LabVpcStack");
        assert!(layout.enable_dns_hostnames);
        assert_eq!(layout.zones[0].availability_zone, "eu-west-1a");

        Ok(())
    }

    #[test]
    fn test_load_layout_or_default_without_path() -> Result<()> {
        let layout = load_layout_or_default(None)?;
        assert_eq!(layout, TopologyLayout::default());
        Ok(())
    }

    #[test]
    fn test_load_layout_or_default_propagates_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("topology.kdl");
        fs::write(&path, "project \"broken\"\n").unwrap();

        let result = load_layout_or_default(Some(&path));
        assert!(matches!(result, Err(TopologyError::InvalidConfig(_))));
    }
}
