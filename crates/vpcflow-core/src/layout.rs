//! トポロジーのレイアウト（パラメータ）
//!
//! 記述子は「名前プレフィックス・VPC の CIDR・ゾーンごとの CIDR」という
//! 固定のパラメータ集合から作られる。`TopologyLayout::default()` は
//! plactice-dev の2ゾーン構成をそのまま再現する。

use crate::model::{Ipv4Cidr, Tag};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// デフォルトの名前プレフィックス
pub const DEFAULT_PROJECT: &str = "plactice-dev";

/// トポロジー全体のレイアウト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyLayout {
    /// 名前プレフィックス（plactice-dev など）
    pub name: String,

    /// スタック名（テンプレートのファイル名に使う）
    pub stack: String,

    /// テンプレートの説明文
    #[serde(default)]
    pub description: Option<String>,

    /// VPC の CIDR
    pub network_cidr: Ipv4Cidr,

    /// DNS ホスト名の有効化
    #[serde(default)]
    pub enable_dns_hostnames: bool,

    /// Name 以外に全リソースへ付けるタグ
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// ゾーンごとの構成（宣言順）
    pub zones: Vec<ZoneLayout>,
}

/// 1ゾーン分の構成
///
/// パブリックサブネット・プライベートサブネット・それぞれのルートテーブル・
/// NAT ゲートウェイ・Elastic IP の1セットに展開される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub availability_zone: String,
    pub public_cidr: Ipv4Cidr,
    pub private_cidr: Ipv4Cidr,
}

impl ZoneLayout {
    pub fn new(
        availability_zone: impl Into<String>,
        public_cidr: Ipv4Cidr,
        private_cidr: Ipv4Cidr,
    ) -> Self {
        Self {
            availability_zone: availability_zone.into(),
            public_cidr,
            private_cidr,
        }
    }

    /// 名前に使うゾーンのサフィックス
    ///
    /// 最後の `-` 以降（`ap-northeast-1a` → `1a`）。
    pub fn suffix(&self) -> &str {
        self.availability_zone
            .rsplit('-')
            .next()
            .unwrap_or(&self.availability_zone)
    }
}

impl TopologyLayout {
    /// プレフィックスと VPC CIDR だけを指定した空のレイアウト
    pub fn new(name: impl Into<String>, network_cidr: Ipv4Cidr) -> Self {
        let name = name.into();
        Self {
            stack: default_stack_name(&name),
            name,
            description: None,
            network_cidr,
            enable_dns_hostnames: false,
            tags: Vec::new(),
            zones: Vec::new(),
        }
    }

    pub fn with_zone(mut self, zone: ZoneLayout) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }
}

impl Default for TopologyLayout {
    fn default() -> Self {
        let cidr = |a, b, c, d, prefix| {
            Ipv4Cidr::new(Ipv4Addr::new(a, b, c, d), prefix)
                .unwrap_or(Ipv4Cidr::DEFAULT_ROUTE)
        };

        Self::new(DEFAULT_PROJECT, cidr(192, 168, 0, 0, 16))
            .with_zone(ZoneLayout::new(
                "ap-northeast-1a",
                cidr(192, 168, 1, 0, 24),
                cidr(192, 168, 3, 0, 24),
            ))
            .with_zone(ZoneLayout::new(
                "ap-northeast-1c",
                cidr(192, 168, 2, 0, 24),
                cidr(192, 168, 4, 0, 24),
            ))
    }
}

/// プロジェクト名からスタック名を作る（`plactice-dev` → `PlacticeDevVpcStack`）
pub fn default_stack_name(project: &str) -> String {
    format!("{}VpcStack", to_pascal_case(project))
}

/// 英数字以外で区切り、各区切りの先頭を大文字にして連結する
///
/// ```rust
/// use vpcflow_core::to_pascal_case;
///
/// assert_eq!(to_pascal_case("plactice-dev-public-subnet-1a"), "PlacticeDevPublicSubnet1a");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
