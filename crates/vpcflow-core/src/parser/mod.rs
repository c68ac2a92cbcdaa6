//! KDLパーサー
//!
//! vpcflow のレイアウトファイル (`topology.kdl`) をパースします。
//! `network` と `zone` ノードのパース処理はモジュールに分離されています。

mod network;
mod zone;

use network::parse_network;
use zone::parse_zone;

use crate::error::{Result, TopologyError};
use crate::layout::{DEFAULT_PROJECT, TopologyLayout, ZoneLayout, default_stack_name};
use crate::model::{Ipv4Cidr, Tag};
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::Path;

/// KDLファイルをパースしてレイアウトを生成
///
/// `project` ノードがなければファイルの親ディレクトリ名を名前に使う。
pub fn parse_layout_file<P: AsRef<Path>>(path: P) -> Result<TopologyLayout> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| TopologyError::IoError {
        path: path.as_ref().to_path_buf(),
        message: e.to_string(),
    })?;
    let name = path
        .as_ref()
        .canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_PROJECT)
        .to_string();
    parse_layout_string(&content, name)
}

/// KDL文字列をパース
pub fn parse_layout_string(content: &str, default_name: String) -> Result<TopologyLayout> {
    let doc: KdlDocument = content.parse()?;

    let mut name = default_name;
    let mut stack: Option<String> = None;
    let mut description: Option<String> = None;
    let mut network: Option<(Ipv4Cidr, bool)> = None;
    let mut tags: Vec<Tag> = Vec::new();
    let mut zones = Vec::new();

    for node in doc.nodes() {
        match node.name().value() {
            "project" => {
                if let Some(project_name) = first_string(node) {
                    name = project_name.to_string();
                }
            }
            "stack" => {
                stack = first_string(node).map(str::to_string);
                if let Some(stack) = &stack {
                    check_stack_name(stack)?;
                }
            }
            "description" => {
                description = first_string(node).map(str::to_string);
            }
            "network" => {
                network = Some(parse_network(node)?);
            }
            "zone" => {
                let zone = parse_zone(node)?;
                if zones
                    .iter()
                    .any(|z: &ZoneLayout| z.availability_zone == zone.availability_zone)
                {
                    return Err(TopologyError::DuplicateZone(zone.availability_zone));
                }
                zones.push(zone);
            }
            "tags" => {
                // 全リソース共通のタグ
                if let Some(children) = node.children() {
                    for tag in children.nodes() {
                        let key = tag.name().value();
                        let value = first_string(tag).ok_or_else(|| {
                            TopologyError::InvalidConfig(format!(
                                "tags.{key} の値は文字列で指定してください"
                            ))
                        })?;
                        tags.push(Tag::new(key, value));
                    }
                }
            }
            _ => {
                // 不明なノードはスキップ
            }
        }
    }

    let (network_cidr, enable_dns_hostnames) = network
        .ok_or_else(|| TopologyError::InvalidConfig("network ノードが必要です".to_string()))?;

    if zones.is_empty() {
        return Err(TopologyError::InvalidConfig(
            "zone ノードが少なくとも1つ必要です".to_string(),
        ));
    }

    Ok(TopologyLayout {
        stack: stack.unwrap_or_else(|| default_stack_name(&name)),
        name,
        description,
        network_cidr,
        enable_dns_hostnames,
        tags,
        zones,
    })
}

/// ノードの最初の引数を文字列として取得
fn first_string(node: &KdlNode) -> Option<&str> {
    node.entries().first().and_then(|e| e.value().as_string())
}

/// スタック名はテンプレートのファイル名になるため、パスとして解釈される値を拒否する
fn check_stack_name(stack: &str) -> Result<()> {
    if stack.is_empty() || stack == "." || stack == ".." || stack.contains(['/', '\\']) {
        return Err(TopologyError::InvalidConfig(format!(
            "stack 名にパス区切りは使えません: {stack:?}"
        )));
    }
    Ok(())
}

/// 子ノードの値を CIDR としてパース
fn child_cidr(parent: &str, node: &KdlNode) -> Result<Ipv4Cidr> {
    let key = node.name().value();
    first_string(node)
        .ok_or_else(|| {
            TopologyError::InvalidConfig(format!("{parent}.{key} には CIDR 文字列が必要です"))
        })?
        .parse()
}

#[cfg(test)]
mod tests;
