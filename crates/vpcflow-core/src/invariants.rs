//! 不変条件の検証
//!
//! トポロジーに対する純粋な検証関数群。副作用はなく、見つかった違反を
//! すべて集めて返す（最初の1件で止めない）。
//!
//! # 検証項目
//!
//! 1. **参照**: すべてのハンドルが宣言済みリソースを指し、参照先は参照元より先に宣言されている
//! 2. **名前**: コンストラクト名が重複しない
//! 3. **CIDR**: サブネットは VPC の真部分集合で、互いに重ならない
//! 4. **関連付け**: ルートテーブルとサブネットは 1:1、同じ VPC に属する
//! 5. **デフォルトルート**: 各ルートテーブルにちょうど1つ、公開区分に応じた宛先
//! 6. **NAT**: パブリックサブネットに置かれ、Elastic IP と 1:1、同一ゾーンから使われる
//! 7. **IGW**: ちょうど1つの VPC にアタッチされ、ルートの VPC と一致する

use crate::error::{Result, TopologyError};
use crate::model::*;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// 不変条件違反
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{from} が未宣言のリソース {target} を参照しています")]
    DanglingReference { from: String, target: String },

    #[error("{from} が後から宣言されたリソース {target} を参照しています")]
    ForwardReference { from: String, target: String },

    #[error("コンストラクト名が重複しています: {name}")]
    DuplicateName { name: String },

    #[error("サブネット {subnet} ({cidr}) が VPC の CIDR {network_cidr} の真部分集合ではありません")]
    SubnetOutsideNetwork {
        subnet: String,
        cidr: Ipv4Cidr,
        network_cidr: Ipv4Cidr,
    },

    #[error("サブネット {first} ({first_cidr}) と {second} ({second_cidr}) の CIDR が重なっています")]
    SubnetOverlap {
        first: String,
        first_cidr: Ipv4Cidr,
        second: String,
        second_cidr: Ipv4Cidr,
    },

    #[error("ルートテーブル {route_table} がどのサブネットにも関連付けられていません")]
    UnassociatedRouteTable { route_table: String },

    #[error("ルートテーブル {route_table} が {count} 個のサブネットに関連付けられています (1個のみ可)")]
    SharedRouteTable { route_table: String, count: usize },

    #[error("サブネット {subnet} に {count} 個のルートテーブルが関連付けられています (1個のみ可)")]
    MultipleRouteTables { subnet: String, count: usize },

    #[error("ルートテーブル {route_table} とサブネット {subnet} の所属 VPC が異なります")]
    NetworkMismatch { route_table: String, subnet: String },

    #[error("ルートテーブル {route_table} のデフォルトルート (0.0.0.0/0) が {count} 個あります (ちょうど1個必要)")]
    DefaultRouteCount { route_table: String, count: usize },

    #[error("{visibility} サブネット {subnet} のデフォルトルートが {target} を向いています")]
    DefaultRouteTargetMismatch {
        subnet: String,
        visibility: Visibility,
        target: String,
    },

    #[error("プライベートサブネット {subnet} ({subnet_zone}) が別ゾーンの NAT ゲートウェイ {nat_gateway} ({nat_zone}) を経由しています")]
    CrossZoneNat {
        subnet: String,
        subnet_zone: String,
        nat_gateway: String,
        nat_zone: String,
    },

    #[error("NAT ゲートウェイ {nat_gateway} がプライベートサブネット {subnet} に配置されています")]
    NatGatewayInPrivateSubnet { nat_gateway: String, subnet: String },

    #[error("Elastic IP {elastic_ip} を {count} 個の NAT ゲートウェイが使用しています (ちょうど1個必要)")]
    ElasticIpUsage { elastic_ip: String, count: usize },

    #[error("インターネットゲートウェイ {gateway} のアタッチメントが {count} 個あります (ちょうど1個必要)")]
    GatewayAttachmentCount { gateway: String, count: usize },

    #[error("ルート {route} のインターネットゲートウェイ {gateway} がルートテーブルの VPC にアタッチされていません")]
    GatewayNotAttached { route: String, gateway: String },
}

/// 検証結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// 違反があれば [`TopologyError::Invariant`] に変換
    pub fn into_result(self) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(TopologyError::Invariant {
                count: self.violations.len(),
                details: self.to_string(),
            })
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "違反なし");
        }
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", v)?;
        }
        Ok(())
    }
}

/// トポロジー全体を検証
pub fn validate(topology: &Topology) -> ValidationReport {
    let mut violations = Vec::new();
    violations.extend(check_references(topology));
    violations.extend(check_declaration_order(topology));
    violations.extend(check_names(topology));
    violations.extend(check_subnet_cidrs(topology));
    violations.extend(check_associations(topology));
    violations.extend(check_default_routes(topology));
    violations.extend(check_nat_gateways(topology));
    violations.extend(check_elastic_ips(topology));
    violations.extend(check_gateway_attachments(topology));

    debug!(
        resources = topology.len(),
        violations = violations.len(),
        "Topology validated"
    );
    ValidationReport { violations }
}

/// 表示用の名前（未宣言ならハンドル表記）
fn label(topology: &Topology, r: ResourceRef) -> String {
    topology
        .name_of(r)
        .map(str::to_string)
        .unwrap_or_else(|| r.to_string())
}

fn target_ref(target: RouteTarget) -> ResourceRef {
    match target {
        RouteTarget::InternetGateway(g) => ResourceRef::InternetGateway(g),
        RouteTarget::NatGateway(n) => ResourceRef::NatGateway(n),
    }
}

/// 各リソースが参照しているハンドル
fn references(topology: &Topology) -> Vec<(ResourceRef, ResourceRef)> {
    let mut edges: Vec<(ResourceRef, ResourceRef)> = Vec::new();

    for (h, a) in topology.attachments() {
        edges.push((h.into(), a.network.into()));
        edges.push((h.into(), a.gateway.into()));
    }
    for (h, s) in topology.subnets() {
        edges.push((h.into(), s.network.into()));
    }
    for (h, t) in topology.route_tables() {
        edges.push((h.into(), t.network.into()));
    }
    for (h, a) in topology.associations() {
        edges.push((h.into(), a.route_table.into()));
        edges.push((h.into(), a.subnet.into()));
    }
    for (h, r) in topology.routes() {
        edges.push((h.into(), r.route_table.into()));
        edges.push((h.into(), target_ref(r.target)));
    }
    for (h, n) in topology.nat_gateways() {
        edges.push((h.into(), n.subnet.into()));
        edges.push((h.into(), n.allocation.into()));
    }

    edges
}

/// すべての参照が宣言済みリソースを指しているか
pub fn check_references(topology: &Topology) -> Vec<Violation> {
    references(topology)
        .into_iter()
        .filter(|(_, target)| topology.name_of(*target).is_none())
        .map(|(from, target)| Violation::DanglingReference {
            from: label(topology, from),
            target: target.to_string(),
        })
        .collect()
}

/// 参照先が参照元より先に宣言されているか
///
/// 未宣言の参照は [`check_references`] が報告するのでここでは扱わない。
pub fn check_declaration_order(topology: &Topology) -> Vec<Violation> {
    let position: HashMap<ResourceRef, usize> = topology
        .declarations()
        .iter()
        .enumerate()
        .map(|(i, r)| (*r, i))
        .collect();

    references(topology)
        .into_iter()
        .filter_map(|(from, target)| {
            let from_pos = position.get(&from)?;
            let target_pos = position.get(&target)?;
            (target_pos > from_pos).then(|| Violation::ForwardReference {
                from: label(topology, from),
                target: label(topology, target),
            })
        })
        .collect()
}

/// コンストラクト名の重複
pub fn check_names(topology: &Topology) -> Vec<Violation> {
    let mut seen = HashSet::new();
    topology
        .declarations()
        .iter()
        .filter_map(|r| topology.name_of(*r))
        .filter(|name| !seen.insert(*name))
        .map(|name| Violation::DuplicateName {
            name: name.to_string(),
        })
        .collect()
}

/// サブネット CIDR が VPC 内に収まり、互いに重ならないか
pub fn check_subnet_cidrs(topology: &Topology) -> Vec<Violation> {
    let mut out = Vec::new();
    let subnets: Vec<&Subnet> = topology.subnets().map(|(_, s)| s).collect();

    for subnet in &subnets {
        if let Some(network) = topology.network(subnet.network)
            && !network.cidr.strictly_contains(&subnet.cidr)
        {
            out.push(Violation::SubnetOutsideNetwork {
                subnet: subnet.name.clone(),
                cidr: subnet.cidr,
                network_cidr: network.cidr,
            });
        }
    }

    for (i, first) in subnets.iter().enumerate() {
        for second in &subnets[i + 1..] {
            if first.network == second.network && first.cidr.overlaps(&second.cidr) {
                out.push(Violation::SubnetOverlap {
                    first: first.name.clone(),
                    first_cidr: first.cidr,
                    second: second.name.clone(),
                    second_cidr: second.cidr,
                });
            }
        }
    }

    out
}

/// ルートテーブルとサブネットの 1:1 関連付け
pub fn check_associations(topology: &Topology) -> Vec<Violation> {
    let mut out = Vec::new();

    for (r, table) in topology.route_tables() {
        match topology.subnets_associated_with(r).len() {
            0 => out.push(Violation::UnassociatedRouteTable {
                route_table: table.name.clone(),
            }),
            1 => {}
            count => out.push(Violation::SharedRouteTable {
                route_table: table.name.clone(),
                count,
            }),
        }
    }

    for (r, subnet) in topology.subnets() {
        let count = topology
            .associations()
            .filter(|(_, a)| a.subnet == r)
            .count();
        if count > 1 {
            out.push(Violation::MultipleRouteTables {
                subnet: subnet.name.clone(),
                count,
            });
        }
    }

    for (_, a) in topology.associations() {
        if let (Some(table), Some(subnet)) =
            (topology.route_table(a.route_table), topology.subnet(a.subnet))
            && table.network != subnet.network
        {
            out.push(Violation::NetworkMismatch {
                route_table: table.name.clone(),
                subnet: subnet.name.clone(),
            });
        }
    }

    out
}

/// デフォルトルートの数と宛先
///
/// パブリックサブネットのテーブルは IGW、プライベートサブネットのテーブルは
/// 同じゾーンの NAT ゲートウェイを向く必要がある。
pub fn check_default_routes(topology: &Topology) -> Vec<Violation> {
    let mut out = Vec::new();

    for (r, table) in topology.route_tables() {
        let defaults = topology.default_routes(r);
        let [(_, route)] = defaults.as_slice() else {
            out.push(Violation::DefaultRouteCount {
                route_table: table.name.clone(),
                count: defaults.len(),
            });
            continue;
        };

        for subnet_ref in topology.subnets_associated_with(r) {
            let Some(subnet) = topology.subnet(subnet_ref) else {
                continue;
            };

            if subnet.is_public() != route.target.is_internet_gateway() {
                out.push(Violation::DefaultRouteTargetMismatch {
                    subnet: subnet.name.clone(),
                    visibility: subnet.visibility,
                    target: label(topology, target_ref(route.target)),
                });
                continue;
            }

            if let RouteTarget::NatGateway(nat) = route.target
                && let Some(nat_zone) = topology.nat_gateway_zone(nat)
                && nat_zone != subnet.availability_zone
            {
                out.push(Violation::CrossZoneNat {
                    subnet: subnet.name.clone(),
                    subnet_zone: subnet.availability_zone.clone(),
                    nat_gateway: label(topology, ResourceRef::NatGateway(nat)),
                    nat_zone: nat_zone.to_string(),
                });
            }
        }
    }

    out
}

/// NAT ゲートウェイの配置先
pub fn check_nat_gateways(topology: &Topology) -> Vec<Violation> {
    topology
        .nat_gateways()
        .filter_map(|(_, nat)| {
            let subnet = topology.subnet(nat.subnet)?;
            (!subnet.is_public()).then(|| Violation::NatGatewayInPrivateSubnet {
                nat_gateway: nat.name.clone(),
                subnet: subnet.name.clone(),
            })
        })
        .collect()
}

/// Elastic IP と NAT ゲートウェイの 1:1 対応
pub fn check_elastic_ips(topology: &Topology) -> Vec<Violation> {
    topology
        .elastic_ips()
        .filter_map(|(r, eip)| {
            let count = topology
                .nat_gateways()
                .filter(|(_, n)| n.allocation == r)
                .count();
            (count != 1).then(|| Violation::ElasticIpUsage {
                elastic_ip: eip.name.clone(),
                count,
            })
        })
        .collect()
}

/// インターネットゲートウェイのアタッチ状態
pub fn check_gateway_attachments(topology: &Topology) -> Vec<Violation> {
    let mut out = Vec::new();

    for (r, gateway) in topology.gateways() {
        let count = topology
            .attachments()
            .filter(|(_, a)| a.gateway == r)
            .count();
        if count != 1 {
            out.push(Violation::GatewayAttachmentCount {
                gateway: gateway.name.clone(),
                count,
            });
        }
    }

    for (_, route) in topology.routes() {
        let RouteTarget::InternetGateway(gateway) = route.target else {
            continue;
        };
        let Some(table) = topology.route_table(route.route_table) else {
            continue;
        };
        if topology.gateway(gateway).is_none() {
            continue;
        }

        let attached = topology
            .attachments()
            .any(|(_, a)| a.gateway == gateway && a.network == table.network);
        if !attached {
            out.push(Violation::GatewayNotAttached {
                route: route.name.clone(),
                gateway: label(topology, ResourceRef::InternetGateway(gateway)),
            });
        }
    }

    out
}
