//! ルートテーブル・関連付け・ルート

use super::{GatewayRef, Ipv4Cidr, NatGatewayRef, NetworkRef, RouteTableRef, SubnetRef, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ルートテーブル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    pub name: String,
    pub network: NetworkRef,
    pub tags: Vec<Tag>,
}

/// サブネットとルートテーブルの関連付け
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableAssociation {
    pub name: String,
    pub route_table: RouteTableRef,
    pub subnet: SubnetRef,
}

/// ルートのネクストホップ
///
/// インターネットゲートウェイと NAT ゲートウェイは排他。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    InternetGateway(GatewayRef),
    NatGateway(NatGatewayRef),
}

impl RouteTarget {
    pub fn is_internet_gateway(&self) -> bool {
        matches!(self, RouteTarget::InternetGateway(_))
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::InternetGateway(r) => r.fmt(f),
            RouteTarget::NatGateway(r) => r.fmt(f),
        }
    }
}

/// ルート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub route_table: RouteTableRef,
    pub destination: Ipv4Cidr,
    pub target: RouteTarget,
}

impl Route {
    pub fn is_default(&self) -> bool {
        self.destination.is_default_route()
    }
}
