//! 型付きハンドル
//!
//! 各 `define_*` 操作が返す参照。リソースの種類ごとに別の型なので、
//! サブネットを期待する場所にルートテーブルを渡すことはできません。

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// 同一種別内での宣言順インデックス
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

define_handle!(
    /// VPC への参照
    NetworkRef,
    "network"
);
define_handle!(
    /// インターネットゲートウェイへの参照
    GatewayRef,
    "internet-gateway"
);
define_handle!(
    /// ゲートウェイアタッチメントへの参照
    AttachmentRef,
    "gateway-attachment"
);
define_handle!(
    /// サブネットへの参照
    SubnetRef,
    "subnet"
);
define_handle!(
    /// ルートテーブルへの参照
    RouteTableRef,
    "route-table"
);
define_handle!(
    /// サブネットとルートテーブルの関連付けへの参照
    AssociationRef,
    "route-table-association"
);
define_handle!(
    /// ルートへの参照
    RouteRef,
    "route"
);
define_handle!(
    /// Elastic IP への参照
    ElasticIpRef,
    "elastic-ip"
);
define_handle!(
    /// NATゲートウェイへの参照
    NatGatewayRef,
    "nat-gateway"
);

/// 宣言順に並べるための種別付き参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "kebab-case")]
pub enum ResourceRef {
    Network(NetworkRef),
    InternetGateway(GatewayRef),
    GatewayAttachment(AttachmentRef),
    Subnet(SubnetRef),
    RouteTable(RouteTableRef),
    RouteTableAssociation(AssociationRef),
    Route(RouteRef),
    ElasticIp(ElasticIpRef),
    NatGateway(NatGatewayRef),
}

macro_rules! impl_from_handle {
    ($($variant:ident($handle:ident)),* $(,)?) => {
        $(
            impl From<$handle> for ResourceRef {
                fn from(r: $handle) -> Self {
                    ResourceRef::$variant(r)
                }
            }
        )*
    };
}

impl_from_handle!(
    Network(NetworkRef),
    InternetGateway(GatewayRef),
    GatewayAttachment(AttachmentRef),
    Subnet(SubnetRef),
    RouteTable(RouteTableRef),
    RouteTableAssociation(AssociationRef),
    Route(RouteRef),
    ElasticIp(ElasticIpRef),
    NatGateway(NatGatewayRef),
);

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Network(r) => r.fmt(f),
            ResourceRef::InternetGateway(r) => r.fmt(f),
            ResourceRef::GatewayAttachment(r) => r.fmt(f),
            ResourceRef::Subnet(r) => r.fmt(f),
            ResourceRef::RouteTable(r) => r.fmt(f),
            ResourceRef::RouteTableAssociation(r) => r.fmt(f),
            ResourceRef::Route(r) => r.fmt(f),
            ResourceRef::ElasticIp(r) => r.fmt(f),
            ResourceRef::NatGateway(r) => r.fmt(f),
        }
    }
}
