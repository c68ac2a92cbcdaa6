//! トポロジー全体
//!
//! `TopologyBuilder` が組み立てる不変の値。各リソースは型付きハンドルで
//! 引けるほか、宣言順にたどることもできる。

use super::*;
use serde::{Deserialize, Serialize};

/// 宣言済みリソースの集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub(crate) networks: Vec<Network>,
    pub(crate) gateways: Vec<InternetGateway>,
    pub(crate) attachments: Vec<GatewayAttachment>,
    pub(crate) subnets: Vec<Subnet>,
    pub(crate) route_tables: Vec<RouteTable>,
    pub(crate) associations: Vec<RouteTableAssociation>,
    pub(crate) routes: Vec<Route>,
    pub(crate) elastic_ips: Vec<ElasticIp>,
    pub(crate) nat_gateways: Vec<NatGateway>,
    pub(crate) order: Vec<ResourceRef>,
}

impl Topology {
    /// 宣言されたリソースの総数
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 宣言順のリソース一覧
    pub fn declarations(&self) -> &[ResourceRef] {
        &self.order
    }

    pub fn network(&self, r: NetworkRef) -> Option<&Network> {
        self.networks.get(r.0)
    }

    pub fn gateway(&self, r: GatewayRef) -> Option<&InternetGateway> {
        self.gateways.get(r.0)
    }

    pub fn attachment(&self, r: AttachmentRef) -> Option<&GatewayAttachment> {
        self.attachments.get(r.0)
    }

    pub fn subnet(&self, r: SubnetRef) -> Option<&Subnet> {
        self.subnets.get(r.0)
    }

    pub fn route_table(&self, r: RouteTableRef) -> Option<&RouteTable> {
        self.route_tables.get(r.0)
    }

    pub fn association(&self, r: AssociationRef) -> Option<&RouteTableAssociation> {
        self.associations.get(r.0)
    }

    pub fn route(&self, r: RouteRef) -> Option<&Route> {
        self.routes.get(r.0)
    }

    pub fn elastic_ip(&self, r: ElasticIpRef) -> Option<&ElasticIp> {
        self.elastic_ips.get(r.0)
    }

    pub fn nat_gateway(&self, r: NatGatewayRef) -> Option<&NatGateway> {
        self.nat_gateways.get(r.0)
    }

    pub fn networks(&self) -> impl Iterator<Item = (NetworkRef, &Network)> {
        self.networks.iter().enumerate().map(|(i, n)| (NetworkRef(i), n))
    }

    pub fn gateways(&self) -> impl Iterator<Item = (GatewayRef, &InternetGateway)> {
        self.gateways.iter().enumerate().map(|(i, g)| (GatewayRef(i), g))
    }

    pub fn attachments(&self) -> impl Iterator<Item = (AttachmentRef, &GatewayAttachment)> {
        self.attachments
            .iter()
            .enumerate()
            .map(|(i, a)| (AttachmentRef(i), a))
    }

    pub fn subnets(&self) -> impl Iterator<Item = (SubnetRef, &Subnet)> {
        self.subnets.iter().enumerate().map(|(i, s)| (SubnetRef(i), s))
    }

    pub fn route_tables(&self) -> impl Iterator<Item = (RouteTableRef, &RouteTable)> {
        self.route_tables
            .iter()
            .enumerate()
            .map(|(i, t)| (RouteTableRef(i), t))
    }

    pub fn associations(&self) -> impl Iterator<Item = (AssociationRef, &RouteTableAssociation)> {
        self.associations
            .iter()
            .enumerate()
            .map(|(i, a)| (AssociationRef(i), a))
    }

    pub fn routes(&self) -> impl Iterator<Item = (RouteRef, &Route)> {
        self.routes.iter().enumerate().map(|(i, r)| (RouteRef(i), r))
    }

    pub fn elastic_ips(&self) -> impl Iterator<Item = (ElasticIpRef, &ElasticIp)> {
        self.elastic_ips
            .iter()
            .enumerate()
            .map(|(i, e)| (ElasticIpRef(i), e))
    }

    pub fn nat_gateways(&self) -> impl Iterator<Item = (NatGatewayRef, &NatGateway)> {
        self.nat_gateways
            .iter()
            .enumerate()
            .map(|(i, n)| (NatGatewayRef(i), n))
    }

    /// リソースのコンストラクト名
    pub fn name_of(&self, r: ResourceRef) -> Option<&str> {
        let name = match r {
            ResourceRef::Network(r) => &self.network(r)?.name,
            ResourceRef::InternetGateway(r) => &self.gateway(r)?.name,
            ResourceRef::GatewayAttachment(r) => &self.attachment(r)?.name,
            ResourceRef::Subnet(r) => &self.subnet(r)?.name,
            ResourceRef::RouteTable(r) => &self.route_table(r)?.name,
            ResourceRef::RouteTableAssociation(r) => &self.association(r)?.name,
            ResourceRef::Route(r) => &self.route(r)?.name,
            ResourceRef::ElasticIp(r) => &self.elastic_ip(r)?.name,
            ResourceRef::NatGateway(r) => &self.nat_gateway(r)?.name,
        };
        Some(name.as_str())
    }

    /// コンストラクト名からリソースを探す
    pub fn find(&self, name: &str) -> Option<ResourceRef> {
        self.order
            .iter()
            .copied()
            .find(|r| self.name_of(*r) == Some(name))
    }

    /// サブネットに関連付けられたルートテーブル（最初の1つ）
    pub fn route_table_for(&self, subnet: SubnetRef) -> Option<RouteTableRef> {
        self.associations
            .iter()
            .find(|a| a.subnet == subnet)
            .map(|a| a.route_table)
    }

    /// ルートテーブルに関連付けられたサブネット
    pub fn subnets_associated_with(&self, route_table: RouteTableRef) -> Vec<SubnetRef> {
        self.associations
            .iter()
            .filter(|a| a.route_table == route_table)
            .map(|a| a.subnet)
            .collect()
    }

    /// ルートテーブルに属するルート
    pub fn routes_in(&self, route_table: RouteTableRef) -> impl Iterator<Item = (RouteRef, &Route)> {
        self.routes().filter(move |(_, r)| r.route_table == route_table)
    }

    /// ルートテーブルのデフォルトルート (0.0.0.0/0)
    pub fn default_routes(&self, route_table: RouteTableRef) -> Vec<(RouteRef, &Route)> {
        self.routes_in(route_table)
            .filter(|(_, r)| r.is_default())
            .collect()
    }

    /// 指定ゾーンのサブネット
    pub fn subnets_in_zone<'a>(&'a self, zone: &'a str) -> impl Iterator<Item = (SubnetRef, &'a Subnet)> {
        self.subnets()
            .filter(move |(_, s)| s.availability_zone == zone)
    }

    /// NAT ゲートウェイが置かれているゾーン
    pub fn nat_gateway_zone(&self, r: NatGatewayRef) -> Option<&str> {
        let nat = self.nat_gateway(r)?;
        self.subnet(nat.subnet)
            .map(|s| s.availability_zone.as_str())
    }

    /// 指定ゾーンに置かれた NAT ゲートウェイ（最初の1つ）
    pub fn nat_gateway_in_zone(&self, zone: &str) -> Option<NatGatewayRef> {
        self.nat_gateways()
            .map(|(r, _)| r)
            .find(|r| self.nat_gateway_zone(*r) == Some(zone))
    }

    /// ルーティングから決まる実際の公開区分
    ///
    /// 関連付けられたルートテーブルのデフォルトルートがちょうど1つのときだけ
    /// 判定でき、インターネットゲートウェイ向けなら Public、それ以外は Private。
    pub fn effective_visibility(&self, subnet: SubnetRef) -> Option<Visibility> {
        let table = self.route_table_for(subnet)?;
        match self.default_routes(table).as_slice() {
            [(_, route)] if route.target.is_internet_gateway() => Some(Visibility::Public),
            [_] => Some(Visibility::Private),
            _ => None,
        }
    }
}
