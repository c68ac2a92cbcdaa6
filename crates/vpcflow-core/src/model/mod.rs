//! モデル定義
//!
//! vpcflow で扱うネットワークリソースのデータモデルを定義します。
//! 各モデルはリソース種別ごとにモジュールに分離されています。

mod cidr;
mod handle;
mod nat;
mod network;
mod routing;
mod subnet;
mod tag;
mod topology;

// Re-exports
pub use cidr::*;
pub use handle::*;
pub use nat::*;
pub use network::*;
pub use routing::*;
pub use subnet::*;
pub use tag::*;
pub use topology::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_tags_puts_name_first() {
        let extra = vec![Tag::new("Environment", "dev"), Tag::new("Name", "ignored")];
        let tags = named_tags("plactice-dev-vpc", &extra);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0], Tag::name("plactice-dev-vpc"));
        assert_eq!(tags[1], Tag::new("Environment", "dev"));
        assert_eq!(name_tag(&tags), Some("plactice-dev-vpc"));
    }

    #[test]
    fn test_route_target_kind() {
        assert!(RouteTarget::InternetGateway(GatewayRef(0)).is_internet_gateway());
        assert!(!RouteTarget::NatGateway(NatGatewayRef(0)).is_internet_gateway());
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(SubnetRef(3).to_string(), "subnet#3");
        assert_eq!(
            ResourceRef::NatGateway(NatGatewayRef(1)).to_string(),
            "nat-gateway#1"
        );
    }

    #[test]
    fn test_resource_ref_serialization() {
        let json = serde_json::to_string(&ResourceRef::Subnet(SubnetRef(2))).unwrap();
        assert_eq!(json, r#"{"kind":"subnet","index":2}"#);

        let back: ResourceRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ResourceRef::Subnet(SubnetRef(2)));
    }

    #[test]
    fn test_visibility_serialization() {
        assert_eq!(serde_json::to_string(&Visibility::Public).unwrap(), "\"public\"");
        assert_eq!(Visibility::Private.to_string(), "private");
    }
}
