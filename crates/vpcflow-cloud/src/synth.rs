//! Topology → manifest synthesis

use crate::error::{CloudError, Result};
use crate::manifest::{Manifest, ResourceConfig};
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{debug, instrument};
use vpcflow_core::{
    GatewayRef, ResourceRef, RouteTableRef, RouteTarget, Tag, Topology, TopologyLayout,
    to_pascal_case,
};

/// Options that do not come from the topology itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOptions {
    pub description: Option<String>,
}

impl ManifestOptions {
    pub fn from_layout(layout: &TopologyLayout) -> Self {
        Self {
            description: layout.description.clone(),
        }
    }
}

/// Logical ID for a construct name (`plactice-dev-vpc` → `PlacticeDevVpc`)
pub fn logical_id(construct: &str) -> String {
    to_pascal_case(construct)
}

/// Synthesize the manifest for a topology
///
/// Every declared resource becomes one entry. References between resources
/// are emitted as `Fn::GetAtt` on the referenced logical ID.
#[instrument(skip_all, fields(resources = topology.len()))]
pub fn synthesize(topology: &Topology, options: &ManifestOptions) -> Result<Manifest> {
    let ids = LogicalIds::assign(topology)?;
    let mut manifest = Manifest::new(options.description.clone());

    for &r in topology.declarations() {
        let construct = ids.construct(r)?;
        let resource = resource_config(topology, &ids, r)?;
        manifest.add(ids.get(r)?, construct, resource)?;
    }

    debug!(logical_ids = manifest.len(), "Manifest synthesized");
    Ok(manifest)
}

/// Logical IDs assigned to every declaration
struct LogicalIds<'a> {
    ids: HashMap<ResourceRef, (String, &'a str)>,
}

impl<'a> LogicalIds<'a> {
    fn assign(topology: &'a Topology) -> Result<Self> {
        let mut ids = HashMap::new();
        let mut taken: HashMap<String, &str> = HashMap::new();

        for &r in topology.declarations() {
            let construct = topology
                .name_of(r)
                .ok_or_else(|| CloudError::UnresolvedReference(r.to_string()))?;
            let id = logical_id(construct);
            if let Some(first) = taken.insert(id.clone(), construct) {
                return Err(CloudError::DuplicateLogicalId {
                    logical_id: id,
                    first: first.to_string(),
                    second: construct.to_string(),
                });
            }
            ids.insert(r, (id, construct));
        }

        Ok(Self { ids })
    }

    fn get(&self, r: impl Into<ResourceRef>) -> Result<String> {
        let r = r.into();
        self.ids
            .get(&r)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| CloudError::UnresolvedReference(r.to_string()))
    }

    fn construct(&self, r: ResourceRef) -> Result<&'a str> {
        self.ids
            .get(&r)
            .map(|(_, construct)| *construct)
            .ok_or_else(|| CloudError::UnresolvedReference(r.to_string()))
    }

    /// `{"Fn::GetAtt": [<logical id>, <attribute>]}`
    fn get_att(&self, r: impl Into<ResourceRef>, attribute: &str) -> Result<Value> {
        Ok(json!({ "Fn::GetAtt": [self.get(r)?, attribute] }))
    }
}

fn tags(tags: &[Tag]) -> Value {
    Value::Array(
        tags.iter()
            .map(|t| json!({ "Key": t.key, "Value": t.value }))
            .collect(),
    )
}

fn unresolved(r: impl Into<ResourceRef>) -> CloudError {
    CloudError::UnresolvedReference(r.into().to_string())
}

fn resource_config(topology: &Topology, ids: &LogicalIds<'_>, r: ResourceRef) -> Result<ResourceConfig> {
    let config = match r {
        ResourceRef::Network(h) => {
            let vpc = topology.network(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new(
                "AWS::EC2::VPC",
                json!({
                    "CidrBlock": vpc.cidr.to_string(),
                    "EnableDnsHostnames": vpc.enable_dns_hostnames,
                    "Tags": tags(&vpc.tags),
                }),
            )
        }
        ResourceRef::InternetGateway(h) => {
            let igw = topology.gateway(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new("AWS::EC2::InternetGateway", json!({ "Tags": tags(&igw.tags) }))
        }
        ResourceRef::GatewayAttachment(h) => {
            let attachment = topology.attachment(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new(
                "AWS::EC2::VPCGatewayAttachment",
                json!({
                    "VpcId": ids.get_att(attachment.network, "VpcId")?,
                    "InternetGatewayId": ids.get_att(attachment.gateway, "InternetGatewayId")?,
                }),
            )
        }
        ResourceRef::Subnet(h) => {
            let subnet = topology.subnet(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new(
                "AWS::EC2::Subnet",
                json!({
                    "VpcId": ids.get_att(subnet.network, "VpcId")?,
                    "AvailabilityZone": subnet.availability_zone,
                    "CidrBlock": subnet.cidr.to_string(),
                    "Tags": tags(&subnet.tags),
                }),
            )
        }
        ResourceRef::RouteTable(h) => {
            let table = topology.route_table(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new(
                "AWS::EC2::RouteTable",
                json!({
                    "VpcId": ids.get_att(table.network, "VpcId")?,
                    "Tags": tags(&table.tags),
                }),
            )
        }
        ResourceRef::RouteTableAssociation(h) => {
            let association = topology.association(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new(
                "AWS::EC2::SubnetRouteTableAssociation",
                json!({
                    "RouteTableId": ids.get_att(association.route_table, "RouteTableId")?,
                    "SubnetId": ids.get_att(association.subnet, "SubnetId")?,
                }),
            )
        }
        ResourceRef::Route(h) => {
            let route = topology.route(h).ok_or_else(|| unresolved(h))?;
            let mut properties = json!({
                "RouteTableId": ids.get_att(route.route_table, "RouteTableId")?,
                "DestinationCidrBlock": route.destination.to_string(),
            });
            let (key, target) = match route.target {
                RouteTarget::InternetGateway(g) => {
                    ("GatewayId", ids.get_att(g, "InternetGatewayId")?)
                }
                RouteTarget::NatGateway(n) => ("NatGatewayId", ids.get_att(n, "NatGatewayId")?),
            };
            properties[key] = target;

            let config = ResourceConfig::new("AWS::EC2::Route", properties);
            match route.target {
                // IGW 経由のルートはアタッチ完了後に作る
                RouteTarget::InternetGateway(g) => attachments_of(topology, ids, g, route.route_table)?
                    .into_iter()
                    .fold(config, |config, id| config.depends_on(id)),
                RouteTarget::NatGateway(_) => config,
            }
        }
        ResourceRef::ElasticIp(h) => {
            let eip = topology.elastic_ip(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new("AWS::EC2::EIP", json!({ "Tags": tags(&eip.tags) }))
        }
        ResourceRef::NatGateway(h) => {
            let nat = topology.nat_gateway(h).ok_or_else(|| unresolved(h))?;
            ResourceConfig::new(
                "AWS::EC2::NatGateway",
                json!({
                    "SubnetId": ids.get_att(nat.subnet, "SubnetId")?,
                    "AllocationId": ids.get_att(nat.allocation, "AllocationId")?,
                    "Tags": tags(&nat.tags),
                }),
            )
        }
    };
    Ok(config)
}

/// Attachments joining `gateway` to the route table's network
fn attachments_of(
    topology: &Topology,
    ids: &LogicalIds<'_>,
    gateway: GatewayRef,
    route_table: RouteTableRef,
) -> Result<Vec<String>> {
    let network = topology
        .route_table(route_table)
        .ok_or_else(|| unresolved(route_table))?
        .network;
    topology
        .attachments()
        .filter(|(_, a)| a.gateway == gateway && a.network == network)
        .map(|(r, _)| ids.get(r))
        .collect()
}
