//! network ノードのパース

use super::child_cidr;
use crate::error::{Result, TopologyError};
use crate::model::Ipv4Cidr;
use kdl::KdlNode;

/// network ノードをパース
///
/// 戻り値は (VPC の CIDR, DNS ホスト名の有効化)。
pub fn parse_network(node: &KdlNode) -> Result<(Ipv4Cidr, bool)> {
    let mut cidr = None;
    let mut dns_hostnames = false;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "cidr" => {
                    cidr = Some(child_cidr("network", child)?);
                }
                "dns-hostnames" | "dns_hostnames" => {
                    dns_hostnames = child
                        .entries()
                        .first()
                        .and_then(|e| e.value().as_bool())
                        .ok_or_else(|| {
                            TopologyError::InvalidConfig(format!(
                                "network.{} には #true または #false を指定してください",
                                child.name().value()
                            ))
                        })?;
                }
                _ => {}
            }
        }
    }

    let cidr = cidr
        .ok_or_else(|| TopologyError::InvalidConfig("network には cidr が必要です".to_string()))?;
    Ok((cidr, dns_hostnames))
}
