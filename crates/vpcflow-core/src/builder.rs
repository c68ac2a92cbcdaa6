//! トポロジービルダー
//!
//! リソースを1つずつ宣言し、型付きハンドルを受け取って次の宣言の参照先に使う。
//! ハンドルは `define_*` を呼んだ後にしか手に入らないので、後から宣言される
//! リソースを参照することはできない。
//!
//! この層ではエラーを返さない。CIDR の重なりや公開区分の食い違いといった
//! 作者側の誤りは [`crate::invariants::validate`] で検出する。

use crate::model::*;
use tracing::trace;

/// [`Topology`] を組み立てるビルダー
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    topology: Topology,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(&mut self, r: ResourceRef) {
        trace!(resource = %r, "declared");
        self.topology.order.push(r);
    }

    /// VPC を宣言
    pub fn define_network(
        &mut self,
        name: impl Into<String>,
        cidr: Ipv4Cidr,
        enable_dns_hostnames: bool,
        tags: Vec<Tag>,
    ) -> NetworkRef {
        let r = NetworkRef(self.topology.networks.len());
        self.topology.networks.push(Network {
            name: name.into(),
            cidr,
            enable_dns_hostnames,
            tags,
        });
        self.declare(ResourceRef::Network(r));
        r
    }

    /// インターネットゲートウェイを宣言（アタッチは別宣言）
    pub fn define_internet_gateway(&mut self, name: impl Into<String>, tags: Vec<Tag>) -> GatewayRef {
        let r = GatewayRef(self.topology.gateways.len());
        self.topology.gateways.push(InternetGateway {
            name: name.into(),
            tags,
        });
        self.declare(ResourceRef::InternetGateway(r));
        r
    }

    /// ゲートウェイを VPC にアタッチ
    pub fn attach_gateway(
        &mut self,
        name: impl Into<String>,
        gateway: GatewayRef,
        network: NetworkRef,
    ) -> AttachmentRef {
        let r = AttachmentRef(self.topology.attachments.len());
        self.topology.attachments.push(GatewayAttachment {
            name: name.into(),
            network,
            gateway,
        });
        self.declare(ResourceRef::GatewayAttachment(r));
        r
    }

    /// サブネットを宣言
    pub fn define_subnet(
        &mut self,
        name: impl Into<String>,
        network: NetworkRef,
        availability_zone: impl Into<String>,
        cidr: Ipv4Cidr,
        visibility: Visibility,
        tags: Vec<Tag>,
    ) -> SubnetRef {
        let r = SubnetRef(self.topology.subnets.len());
        self.topology.subnets.push(Subnet {
            name: name.into(),
            network,
            availability_zone: availability_zone.into(),
            cidr,
            visibility,
            tags,
        });
        self.declare(ResourceRef::Subnet(r));
        r
    }

    /// ルートテーブルを宣言
    pub fn define_route_table(
        &mut self,
        name: impl Into<String>,
        network: NetworkRef,
        tags: Vec<Tag>,
    ) -> RouteTableRef {
        let r = RouteTableRef(self.topology.route_tables.len());
        self.topology.route_tables.push(RouteTable {
            name: name.into(),
            network,
            tags,
        });
        self.declare(ResourceRef::RouteTable(r));
        r
    }

    /// ルートテーブルをサブネットに関連付け
    pub fn associate(
        &mut self,
        name: impl Into<String>,
        route_table: RouteTableRef,
        subnet: SubnetRef,
    ) -> AssociationRef {
        let r = AssociationRef(self.topology.associations.len());
        self.topology.associations.push(RouteTableAssociation {
            name: name.into(),
            route_table,
            subnet,
        });
        self.declare(ResourceRef::RouteTableAssociation(r));
        r
    }

    /// ルートを宣言
    pub fn define_route(
        &mut self,
        name: impl Into<String>,
        route_table: RouteTableRef,
        destination: Ipv4Cidr,
        target: RouteTarget,
    ) -> RouteRef {
        let r = RouteRef(self.topology.routes.len());
        self.topology.routes.push(Route {
            name: name.into(),
            route_table,
            destination,
            target,
        });
        self.declare(ResourceRef::Route(r));
        r
    }

    /// Elastic IP を宣言
    pub fn define_elastic_ip(&mut self, name: impl Into<String>, tags: Vec<Tag>) -> ElasticIpRef {
        let r = ElasticIpRef(self.topology.elastic_ips.len());
        self.topology.elastic_ips.push(ElasticIp {
            name: name.into(),
            tags,
        });
        self.declare(ResourceRef::ElasticIp(r));
        r
    }

    /// NAT ゲートウェイを宣言
    pub fn define_nat_gateway(
        &mut self,
        name: impl Into<String>,
        subnet: SubnetRef,
        allocation: ElasticIpRef,
        tags: Vec<Tag>,
    ) -> NatGatewayRef {
        let r = NatGatewayRef(self.topology.nat_gateways.len());
        self.topology.nat_gateways.push(NatGateway {
            name: name.into(),
            subnet,
            allocation,
            tags,
        });
        self.declare(ResourceRef::NatGateway(r));
        r
    }

    /// 組み立て途中のトポロジーを参照
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn build(self) -> Topology {
        self.topology
    }
}
