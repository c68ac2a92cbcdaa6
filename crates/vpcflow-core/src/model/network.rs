//! VPC とインターネットゲートウェイ

use super::{GatewayRef, Ipv4Cidr, NetworkRef, Tag};
use serde::{Deserialize, Serialize};

/// VPC（すべてのサブリソースのルート）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// コンストラクト名（論理名）
    pub name: String,

    /// VPC 全体の CIDR ブロック
    pub cidr: Ipv4Cidr,

    /// インスタンスに DNS ホスト名を割り当てるか
    pub enable_dns_hostnames: bool,

    pub tags: Vec<Tag>,
}

/// インターネットゲートウェイ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternetGateway {
    pub name: String,
    pub tags: Vec<Tag>,
}

/// ゲートウェイを VPC にアタッチする宣言
///
/// 作成とアタッチを別の宣言にしておくことで、エンジン側が
/// 「ゲートウェイ作成 → アタッチ」の順序で処理できる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayAttachment {
    pub name: String,
    pub network: NetworkRef,
    pub gateway: GatewayRef,
}
