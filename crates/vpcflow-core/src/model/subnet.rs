//! サブネット

use super::{Ipv4Cidr, NetworkRef, Tag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// サブネットの公開区分
///
/// サブネット自体に公開フラグはなく、実際の区分は関連付けられた
/// ルートテーブルのデフォルトルートで決まる。ここでは作者の意図を記録し、
/// 検証時にルートテーブル側と突き合わせる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// サブネット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub name: String,

    /// 所属する VPC
    pub network: NetworkRef,

    /// アベイラビリティゾーン（ap-northeast-1a など）
    pub availability_zone: String,

    /// VPC の CIDR に含まれるサブブロック
    pub cidr: Ipv4Cidr,

    pub visibility: Visibility,

    pub tags: Vec<Tag>,
}

impl Subnet {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
