use super::*;
use std::fs;
use tempfile::tempdir;

const FULL: &str = r#"
project "plactice-dev"
stack "PlacticeDevVpcStack"
description "plactice dev network"

network {
    cidr "192.168.0.0/16"
    dns-hostnames #false
}

zone "ap-northeast-1a" {
    public "192.168.1.0/24"
    private "192.168.3.0/24"
}

zone "ap-northeast-1c" {
    public "192.168.2.0/24"
    private "192.168.4.0/24"
}
"#;

#[test]
fn test_parse_full_layout_matches_default() {
    let layout = parse_layout_string(FULL, "ignored".to_string()).unwrap();

    let mut expected = TopologyLayout::default();
    expected.description = Some("plactice dev network".to_string());
    assert_eq!(layout, expected);
}

#[test]
fn test_parse_minimal_layout_defaults() {
    let kdl = r#"
        network {
            cidr "10.0.0.0/16"
        }
        zone "us-east-1a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
    "#;

    let layout = parse_layout_string(kdl, "my-net".to_string()).unwrap();
    assert_eq!(layout.name, "my-net");
    assert_eq!(layout.stack, "MyNetVpcStack");
    assert_eq!(layout.description, None);
    assert!(!layout.enable_dns_hostnames);
    assert!(layout.tags.is_empty());
    assert_eq!(layout.zones.len(), 1);
    assert_eq!(layout.zones[0].suffix(), "1a");
}

#[test]
fn test_parse_project_overrides_default_name() {
    let kdl = r#"
        project "staging"
        network { cidr "10.0.0.0/16"; }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
    "#;

    let layout = parse_layout_string(kdl, "dir-name".to_string()).unwrap();
    assert_eq!(layout.name, "staging");
    assert_eq!(layout.stack, "StagingVpcStack");
}

#[test]
fn test_parse_dns_hostnames_and_tags() {
    let kdl = r#"
        network {
            cidr "10.0.0.0/16"
            dns-hostnames #true
        }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
        tags {
            Environment "dev"
            Owner "infra"
        }
    "#;

    let layout = parse_layout_string(kdl, "net".to_string()).unwrap();
    assert!(layout.enable_dns_hostnames);
    assert_eq!(
        layout.tags,
        vec![Tag::new("Environment", "dev"), Tag::new("Owner", "infra")]
    );
}

#[test]
fn test_parse_dns_hostnames_requires_bool() {
    for value in [r#""true""#, "1", ""] {
        let kdl = format!(
            r#"
            network {{
                cidr "10.0.0.0/16"
                dns-hostnames {value}
            }}
            zone "az-a" {{
                public "10.0.0.0/24"
                private "10.0.1.0/24"
            }}
            "#
        );

        let result = parse_layout_string(&kdl, "net".to_string());
        assert!(
            matches!(result, Err(TopologyError::InvalidConfig(_))),
            "dns-hostnames {value} should be rejected"
        );
    }
}

#[test]
fn test_parse_tag_value_requires_string() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
        tags {
            CostCenter 1234
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    match result {
        Err(TopologyError::InvalidConfig(message)) => assert!(message.contains("CostCenter")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_parse_tag_without_value_error() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
        tags {
            Owner
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    assert!(matches!(result, Err(TopologyError::InvalidConfig(_))));
}

#[test]
fn test_parse_stack_with_path_separator_error() {
    for stack in ["../x", "out/stack", r"..\x", ".."] {
        let kdl = format!(
            r#"
            stack "{}"
            network {{ cidr "10.0.0.0/16"; }}
            zone "az-a" {{
                public "10.0.0.0/24"
                private "10.0.1.0/24"
            }}
            "#,
            stack.replace('\\', "\\\\")
        );

        let result = parse_layout_string(&kdl, "net".to_string());
        assert!(
            matches!(result, Err(TopologyError::InvalidConfig(_))),
            "stack {stack:?} should be rejected"
        );
    }
}

#[test]
fn test_parse_zone_without_name_error() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
        zone {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    match result {
        Err(TopologyError::InvalidConfig(message)) => {
            assert!(message.contains("アベイラビリティゾーン名"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_parse_unknown_nodes_are_skipped() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
        flow-logs #true
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
            ipv6 #false
        }
    "#;

    let layout = parse_layout_string(kdl, "net".to_string()).unwrap();
    assert_eq!(layout.zones.len(), 1);
}

#[test]
fn test_parse_missing_network_error() {
    let kdl = r#"
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    assert!(matches!(result, Err(TopologyError::InvalidConfig(_))));
}

#[test]
fn test_parse_missing_network_cidr_error() {
    let kdl = r#"
        network { dns-hostnames #true; }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    assert!(matches!(result, Err(TopologyError::InvalidConfig(_))));
}

#[test]
fn test_parse_no_zones_error() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    assert!(matches!(result, Err(TopologyError::InvalidConfig(_))));
}

#[test]
fn test_parse_zone_without_private_error() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
        zone "az-a" {
            public "10.0.0.0/24"
        }
    "#;

    let err = parse_layout_string(kdl, "net".to_string()).unwrap_err();
    assert!(err.to_string().contains("private"));
}

#[test]
fn test_parse_duplicate_zone_error() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
        zone "az-a" {
            public "10.0.2.0/24"
            private "10.0.3.0/24"
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    assert!(matches!(result, Err(TopologyError::DuplicateZone(z)) if z == "az-a"));
}

#[test]
fn test_parse_malformed_cidr_error() {
    let kdl = r#"
        network { cidr "10.0.0.0/33"; }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    assert!(matches!(result, Err(TopologyError::InvalidPrefixLength(33))));
}

#[test]
fn test_parse_host_bits_error() {
    let kdl = r#"
        network { cidr "10.0.0.0/16"; }
        zone "az-a" {
            public "10.0.0.1/24"
            private "10.0.1.0/24"
        }
    "#;

    let result = parse_layout_string(kdl, "net".to_string());
    assert!(matches!(result, Err(TopologyError::HostBitsSet { .. })));
}

#[test]
fn test_parse_invalid_kdl_syntax() {
    let result = parse_layout_string("network {", "net".to_string());
    assert!(matches!(result, Err(TopologyError::KdlParse(_))));
}

#[test]
fn test_parse_file_uses_parent_directory_name() {
    let root = tempdir().unwrap();
    let project_dir = root.path().join("edge-net");
    fs::create_dir(&project_dir).unwrap();
    let path = project_dir.join("topology.kdl");
    fs::write(
        &path,
        r#"
        network { cidr "10.0.0.0/16"; }
        zone "az-a" {
            public "10.0.0.0/24"
            private "10.0.1.0/24"
        }
        "#,
    )
    .unwrap();

    let layout = parse_layout_file(&path).unwrap();
    assert_eq!(layout.name, "edge-net");
    assert_eq!(layout.stack, "EdgeNetVpcStack");
}

#[test]
fn test_parse_file_not_found() {
    let root = tempdir().unwrap();
    let result = parse_layout_file(root.path().join("missing.kdl"));
    assert!(matches!(result, Err(TopologyError::IoError { .. })));
}
