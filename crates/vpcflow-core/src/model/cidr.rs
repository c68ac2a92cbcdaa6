//! IPv4 CIDRブロック
//!
//! VPC・サブネット・ルートの宛先で使う CIDR 表記の値オブジェクト。
//! 構築時に正規形（ホスト部が 0）であることを保証します。

use crate::error::{Result, TopologyError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// IPv4 CIDRブロック
///
/// # Examples
///
/// ```rust
/// use vpcflow_core::Ipv4Cidr;
///
/// let vpc: Ipv4Cidr = "192.168.0.0/16".parse().unwrap();
/// let subnet: Ipv4Cidr = "192.168.1.0/24".parse().unwrap();
/// assert!(vpc.contains(&subnet));
/// assert_eq!(subnet.to_string(), "192.168.1.0/24");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Cidr {
    address: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Cidr {
    /// デフォルトルート (0.0.0.0/0)
    pub const DEFAULT_ROUTE: Ipv4Cidr = Ipv4Cidr {
        address: Ipv4Addr::UNSPECIFIED,
        prefix: 0,
    };

    /// アドレスとプレフィックス長から作成
    ///
    /// ホスト部にビットが立っている場合はエラー。
    pub fn new(address: Ipv4Addr, prefix: u8) -> Result<Self> {
        if prefix > 32 {
            return Err(TopologyError::InvalidPrefixLength(prefix));
        }

        let canonical = Ipv4Addr::from(u32::from(address) & mask(prefix));
        if canonical != address {
            return Err(TopologyError::HostBitsSet {
                cidr: format!("{}/{}", address, prefix),
                canonical: format!("{}/{}", canonical, prefix),
            });
        }

        Ok(Self { address, prefix })
    }

    /// ネットワークアドレス
    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// プレフィックス長
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// 先頭アドレス（数値）
    pub fn first(&self) -> u32 {
        u32::from(self.address)
    }

    /// 末尾アドレス（数値）
    pub fn last(&self) -> u32 {
        self.first() | !mask(self.prefix)
    }

    /// ブロックに含まれるアドレス数
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// 0.0.0.0/0 かどうか
    pub fn is_default_route(&self) -> bool {
        self.prefix == 0
    }

    /// `other` がこのブロックに完全に含まれるか（同一ブロックも含む）
    pub fn contains(&self, other: &Ipv4Cidr) -> bool {
        self.prefix <= other.prefix && self.first() <= other.first() && other.last() <= self.last()
    }

    /// `other` がこのブロックの真部分集合か
    pub fn strictly_contains(&self, other: &Ipv4Cidr) -> bool {
        self.contains(other) && self != other
    }

    /// 2つのブロックが重なるか
    pub fn overlaps(&self, other: &Ipv4Cidr) -> bool {
        self.first() <= other.last() && other.first() <= self.last()
    }

    /// `new_prefix` で分割したときの `index` 番目のサブブロック
    ///
    /// プレフィックスが短くなる場合や範囲外の場合は `None`。
    pub fn nth_subnet(&self, new_prefix: u8, index: u32) -> Option<Ipv4Cidr> {
        if new_prefix < self.prefix || new_prefix > 32 {
            return None;
        }

        let bits = u32::from(new_prefix - self.prefix);
        if bits < 32 && u64::from(index) >= (1u64 << bits) {
            return None;
        }

        let step = 1u64 << (32 - u32::from(new_prefix));
        let start = u64::from(self.first()) + u64::from(index) * step;
        let address = Ipv4Addr::from(u32::try_from(start).ok()?);
        Some(Ipv4Cidr {
            address,
            prefix: new_prefix,
        })
    }
}

fn mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

impl FromStr for Ipv4Cidr {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self> {
        let (addr_str, prefix_str) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| TopologyError::InvalidCidr(s.to_string()))?;

        let address = Ipv4Addr::from_str(addr_str)
            .map_err(|_| TopologyError::InvalidCidr(s.to_string()))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| TopologyError::InvalidCidr(s.to_string()))?;

        Self::new(address, prefix)
    }
}

impl Serialize for Ipv4Cidr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4Cidr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
