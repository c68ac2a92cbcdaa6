use crate::utils::{print_layout_source, resolve_layout};
use colored::Colorize;
use std::path::PathBuf;
use vpcflow_core::{ResourceRef, RouteTarget, Topology, describe};

pub fn handle(file: Option<PathBuf>) -> anyhow::Result<()> {
    let (layout, source) = resolve_layout(file)?;
    print_layout_source(&source);

    let topology = describe(&layout);
    println!(
        "{} ({}個のリソース)",
        layout.stack.bold(),
        topology.len()
    );

    for (i, r) in topology.declarations().iter().enumerate() {
        let name = topology.name_of(*r).unwrap_or("?");
        println!(
            "{:>3}. {:<24} {}  {}",
            i + 1,
            kind(*r),
            name.cyan(),
            details(&topology, *r).dimmed()
        );
    }

    Ok(())
}

fn kind(r: ResourceRef) -> &'static str {
    match r {
        ResourceRef::Network(_) => "vpc",
        ResourceRef::InternetGateway(_) => "internet-gateway",
        ResourceRef::GatewayAttachment(_) => "gateway-attachment",
        ResourceRef::Subnet(_) => "subnet",
        ResourceRef::RouteTable(_) => "route-table",
        ResourceRef::RouteTableAssociation(_) => "route-table-association",
        ResourceRef::Route(_) => "route",
        ResourceRef::ElasticIp(_) => "elastic-ip",
        ResourceRef::NatGateway(_) => "nat-gateway",
    }
}

/// 参照先と主要な属性
fn details(topology: &Topology, r: ResourceRef) -> String {
    let name = |r: ResourceRef| topology.name_of(r).unwrap_or("?").to_string();

    match r {
        ResourceRef::Network(h) => topology
            .network(h)
            .map(|n| format!("cidr={}", n.cidr))
            .unwrap_or_default(),
        ResourceRef::InternetGateway(_) | ResourceRef::ElasticIp(_) => String::new(),
        ResourceRef::GatewayAttachment(h) => topology
            .attachment(h)
            .map(|a| format!("vpc={} igw={}", name(a.network.into()), name(a.gateway.into())))
            .unwrap_or_default(),
        ResourceRef::Subnet(h) => topology
            .subnet(h)
            .map(|s| format!("{} cidr={} az={}", s.visibility, s.cidr, s.availability_zone))
            .unwrap_or_default(),
        ResourceRef::RouteTable(h) => topology
            .route_table(h)
            .map(|t| format!("vpc={}", name(t.network.into())))
            .unwrap_or_default(),
        ResourceRef::RouteTableAssociation(h) => topology
            .association(h)
            .map(|a| format!("rtb={} subnet={}", name(a.route_table.into()), name(a.subnet.into())))
            .unwrap_or_default(),
        ResourceRef::Route(h) => topology
            .route(h)
            .map(|route| {
                let target = match route.target {
                    RouteTarget::InternetGateway(g) => name(g.into()),
                    RouteTarget::NatGateway(n) => name(n.into()),
                };
                format!("{} -> {}", route.destination, target)
            })
            .unwrap_or_default(),
        ResourceRef::NatGateway(h) => topology
            .nat_gateway(h)
            .map(|n| format!("subnet={} eip={}", name(n.subnet.into()), name(n.allocation.into())))
            .unwrap_or_default(),
    }
}
