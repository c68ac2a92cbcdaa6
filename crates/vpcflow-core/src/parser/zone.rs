//! zone ノードのパース

use super::{child_cidr, first_string};
use crate::error::{Result, TopologyError};
use crate::layout::ZoneLayout;
use kdl::KdlNode;

/// zone ノードをパース
pub fn parse_zone(node: &KdlNode) -> Result<ZoneLayout> {
    let availability_zone = first_string(node)
        .ok_or_else(|| {
            TopologyError::InvalidConfig("zone にはアベイラビリティゾーン名が必要です".to_string())
        })?
        .to_string();

    let mut public = None;
    let mut private = None;

    if let Some(children) = node.children() {
        for child in children.nodes() {
            match child.name().value() {
                "public" => public = Some(child_cidr(&availability_zone, child)?),
                "private" => private = Some(child_cidr(&availability_zone, child)?),
                _ => {}
            }
        }
    }

    let missing = |key: &str| {
        TopologyError::InvalidConfig(format!("zone {availability_zone} には {key} が必要です"))
    };
    let public_cidr = public.ok_or_else(|| missing("public"))?;
    let private_cidr = private.ok_or_else(|| missing("private"))?;

    Ok(ZoneLayout::new(availability_zone, public_cidr, private_cidr))
}
