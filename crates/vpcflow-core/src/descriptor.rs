//! ネットワークトポロジー記述子
//!
//! レイアウトから VPC・IGW・ゾーンごとのサブネット/ルートテーブル/NAT を
//! 宣言する純粋関数。同じレイアウトからは常に同じトポロジーができる。

use crate::builder::TopologyBuilder;
use crate::layout::{TopologyLayout, ZoneLayout};
use crate::model::*;
use tracing::{debug, instrument};

/// レイアウトからトポロジーを組み立てる
///
/// 宣言順:
/// 1. VPC、インターネットゲートウェイ、アタッチメント
/// 2. パブリックサブネット → ルートテーブル → 関連付け → IGW 向けデフォルトルート
/// 3. Elastic IP → パブリックサブネット上の NAT ゲートウェイ
/// 4. プライベートサブネット → ルートテーブル → 関連付け → 同一ゾーンの NAT 向けデフォルトルート
///
/// プライベート側は必ず同じゾーンの NAT ゲートウェイを向く（ゾーンをまたぐ
/// NAT 通信を避けるため）。
#[instrument(skip(layout), fields(project = %layout.name, zones = layout.zones.len()))]
pub fn describe(layout: &TopologyLayout) -> Topology {
    let p = layout.name.as_str();
    let tags = |name: &str| named_tags(name, &layout.tags);
    let mut b = TopologyBuilder::new();

    // VPC
    let vpc_name = format!("{p}-vpc");
    let vpc = b.define_network(
        &vpc_name,
        layout.network_cidr,
        layout.enable_dns_hostnames,
        tags(&vpc_name),
    );

    // インターネットゲートウェイを作成してVPCにアタッチ
    let igw_name = format!("{p}-igw");
    let igw = b.define_internet_gateway(&igw_name, tags(&igw_name));
    b.attach_gateway(format!("{p}-vpc-igw-attachment"), igw, vpc);

    // パブリックサブネット
    let public: Vec<SubnetRef> = layout
        .zones
        .iter()
        .map(|zone| {
            let name = subnet_name(p, "public", zone);
            b.define_subnet(
                &name,
                vpc,
                &zone.availability_zone,
                zone.public_cidr,
                Visibility::Public,
                tags(&name),
            )
        })
        .collect();

    // パブリックサブネットのルートテーブル
    let public_tables: Vec<RouteTableRef> = layout
        .zones
        .iter()
        .map(|zone| {
            let name = format!("{}-rtb", subnet_name(p, "public", zone));
            b.define_route_table(&name, vpc, tags(&name))
        })
        .collect();
    for ((zone, table), subnet) in layout.zones.iter().zip(&public_tables).zip(&public) {
        b.associate(
            format!("{}-rtb-association", subnet_name(p, "public", zone)),
            *table,
            *subnet,
        );
    }
    for (zone, table) in layout.zones.iter().zip(&public_tables) {
        b.define_route(
            format!("{}-rtb-route", subnet_name(p, "public", zone)),
            *table,
            Ipv4Cidr::DEFAULT_ROUTE,
            RouteTarget::InternetGateway(igw),
        );
    }

    // パブリックサブネット内にNATゲートウェイを作成
    let eips: Vec<ElasticIpRef> = layout
        .zones
        .iter()
        .map(|zone| {
            let name = format!("{p}-eip-{}", zone.suffix());
            b.define_elastic_ip(&name, tags(&name))
        })
        .collect();
    let nat_gateways: Vec<NatGatewayRef> = layout
        .zones
        .iter()
        .zip(&public)
        .zip(&eips)
        .map(|((zone, subnet), eip)| {
            let name = format!("{p}-ngw-{}", zone.suffix());
            b.define_nat_gateway(&name, *subnet, *eip, tags(&name))
        })
        .collect();

    // プライベートサブネット
    let private: Vec<SubnetRef> = layout
        .zones
        .iter()
        .map(|zone| {
            let name = subnet_name(p, "private", zone);
            b.define_subnet(
                &name,
                vpc,
                &zone.availability_zone,
                zone.private_cidr,
                Visibility::Private,
                tags(&name),
            )
        })
        .collect();

    // プライベートサブネットのルートテーブル
    let private_tables: Vec<RouteTableRef> = layout
        .zones
        .iter()
        .map(|zone| {
            let name = format!("{}-rtb", subnet_name(p, "private", zone));
            b.define_route_table(&name, vpc, tags(&name))
        })
        .collect();
    for ((zone, table), subnet) in layout.zones.iter().zip(&private_tables).zip(&private) {
        b.associate(
            format!("{}-rtb-association", subnet_name(p, "private", zone)),
            *table,
            *subnet,
        );
    }
    for ((zone, table), nat) in layout.zones.iter().zip(&private_tables).zip(&nat_gateways) {
        b.define_route(
            format!("{}-rtb-route", subnet_name(p, "private", zone)),
            *table,
            Ipv4Cidr::DEFAULT_ROUTE,
            RouteTarget::NatGateway(*nat),
        );
    }

    let topology = b.build();
    debug!(resources = topology.len(), "Topology described");
    topology
}

fn subnet_name(prefix: &str, visibility: &str, zone: &ZoneLayout) -> String {
    format!("{prefix}-{visibility}-subnet-{}", zone.suffix())
}
