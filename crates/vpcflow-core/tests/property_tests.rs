//! トポロジー記述子のプロパティテスト
//!
//! ゾーン数と CIDR 配置を変えながら、記述子の出力が常に不変条件を満たし、
//! 決定的であることを確認する。

use proptest::prelude::*;
use std::net::Ipv4Addr;
use vpcflow_core::{
    Ipv4Cidr, RouteTarget, TopologyLayout, Violation, Visibility, ZoneLayout, describe, validate,
};

/// レイアウト生成の元になるパラメータ
#[derive(Debug, Clone)]
struct LayoutParams {
    base: u32,
    network_prefix: u8,
    subnet_bits: u8,
    zones: usize,
    dns_hostnames: bool,
}

impl LayoutParams {
    fn network(&self) -> Ipv4Cidr {
        let mask = u32::MAX << (32 - self.network_prefix);
        Ipv4Cidr::new(Ipv4Addr::from(self.base & mask), self.network_prefix).unwrap()
    }

    fn layout(&self) -> TopologyLayout {
        let network = self.network();
        let subnet_prefix = self.network_prefix + self.subnet_bits;
        let zones = self.zones as u32;

        (0..zones).fold(
            TopologyLayout::new("prop", network),
            |layout, i| {
                let az = format!("test-region-{}{}", i + 1, (b'a' + i as u8) as char);
                layout.with_zone(ZoneLayout::new(
                    az,
                    network.nth_subnet(subnet_prefix, i).unwrap(),
                    network.nth_subnet(subnet_prefix, zones + i).unwrap(),
                ))
            },
        )
    }
}

fn layout_params() -> impl Strategy<Value = LayoutParams> {
    (any::<u32>(), 8u8..=20, 4u8..=8, 1usize..=6, any::<bool>()).prop_map(
        |(base, network_prefix, subnet_bits, zones, dns_hostnames)| LayoutParams {
            base,
            network_prefix,
            subnet_bits,
            zones,
            dns_hostnames,
        },
    )
}

proptest! {
    /// 記述子の出力は常にすべての不変条件を満たす
    #[test]
    fn prop_described_topology_is_valid(params in layout_params()) {
        let mut layout = params.layout();
        layout.enable_dns_hostnames = params.dns_hostnames;
        let topology = describe(&layout);

        let report = validate(&topology);
        prop_assert!(report.is_ok(), "{}", report);
    }

    /// 1ゾーンあたり10リソース + VPC/IGW/アタッチメントの3つ
    #[test]
    fn prop_resource_count_scales_with_zones(params in layout_params()) {
        let topology = describe(&params.layout());
        prop_assert_eq!(topology.len(), 3 + 10 * params.zones);
        prop_assert_eq!(topology.nat_gateways().count(), params.zones);
        prop_assert_eq!(topology.elastic_ips().count(), params.zones);
    }

    /// 同じレイアウトからは同じトポロジーができる
    #[test]
    fn prop_describe_is_deterministic(params in layout_params()) {
        let layout = params.layout();
        prop_assert_eq!(describe(&layout), describe(&layout));
    }

    /// プライベートサブネットは同じゾーンの NAT ゲートウェイ経由で外に出る
    #[test]
    fn prop_private_subnets_use_zone_local_nat(params in layout_params()) {
        let topology = describe(&params.layout());

        for (r, subnet) in topology.subnets() {
            let table = topology.route_table_for(r).unwrap();
            let defaults = topology.default_routes(table);
            prop_assert_eq!(defaults.len(), 1);

            match (subnet.visibility, defaults[0].1.target) {
                (Visibility::Public, RouteTarget::InternetGateway(_)) => {}
                (Visibility::Private, RouteTarget::NatGateway(nat)) => {
                    prop_assert_eq!(
                        topology.nat_gateway_zone(nat),
                        Some(subnet.availability_zone.as_str())
                    );
                }
                (visibility, target) => {
                    prop_assert!(false, "{} subnet routed to {}", visibility, target);
                }
            }
        }
    }

    /// 公開側と非公開側の CIDR を重ねると必ず検出される
    #[test]
    fn prop_overlapping_zone_cidrs_are_detected(params in layout_params()) {
        let mut layout = params.layout();
        layout.zones[0].private_cidr = layout.zones[0].public_cidr;

        let report = validate(&describe(&layout));
        prop_assert!(!report.is_ok());
        let has_overlap = report
            .violations()
            .iter()
            .any(|v| matches!(v, Violation::SubnetOverlap { .. }));
        prop_assert!(has_overlap);
    }
}
