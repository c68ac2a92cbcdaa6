//! Elastic IP と NAT ゲートウェイ

use super::{ElasticIpRef, SubnetRef, Tag};
use serde::{Deserialize, Serialize};

/// 予約済みのパブリック IP（1つの NAT ゲートウェイが消費する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElasticIp {
    pub name: String,
    pub tags: Vec<Tag>,
}

/// NAT ゲートウェイ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatGateway {
    pub name: String,

    /// 配置先のパブリックサブネット
    pub subnet: SubnetRef,

    /// 割り当てる Elastic IP
    pub allocation: ElasticIpRef,

    pub tags: Vec<Tag>,
}
