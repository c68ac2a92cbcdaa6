//! Synthesized template types

use crate::error::{CloudError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Template format version emitted in every manifest
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Synthesized resource set, shaped as a CloudFormation template
///
/// Resources are keyed by logical ID in a sorted map so that rendering the
/// same topology twice yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, ResourceConfig>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Manifest {
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            description,
            resources: BTreeMap::new(),
        }
    }

    /// Add a resource under `logical_id`
    ///
    /// `construct` is recorded in the resource metadata.
    pub fn add(
        &mut self,
        logical_id: impl Into<String>,
        construct: &str,
        resource: ResourceConfig,
    ) -> Result<()> {
        let logical_id = logical_id.into();
        if let Some(existing) = self.resources.get(&logical_id) {
            return Err(CloudError::DuplicateLogicalId {
                first: existing.construct.clone().unwrap_or_default(),
                second: construct.to_string(),
                logical_id,
            });
        }
        self.resources
            .insert(logical_id, resource.with_construct(construct));
        Ok(())
    }

    pub fn get(&self, logical_id: &str) -> Option<&ResourceConfig> {
        self.resources.get(logical_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceConfig)> {
        self.resources.iter().map(|(id, r)| (id.as_str(), r))
    }

    pub fn by_type(&self, resource_type: &str) -> Vec<(&str, &ResourceConfig)> {
        self.iter()
            .filter(|(_, r)| r.resource_type == resource_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)? + "\n")
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render in the given format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.to_json(),
            OutputFormat::Yaml => self.to_yaml(),
        }
    }

    /// Write `<stack>.template.<ext>` into `dir` and return its path
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn write_to<P: AsRef<Path>>(
        &self,
        dir: P,
        stack: &str,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        if stack.is_empty() || stack == "." || stack == ".." || stack.contains(['/', '\\']) {
            return Err(CloudError::InvalidConfig(format!(
                "スタック名にパス区切りは使えません: {stack:?}"
            )));
        }

        let dir = dir.as_ref();
        let path = dir.join(template_file_name(stack, format));
        let content = self.render(format)?;

        fs::create_dir_all(dir).map_err(|source| CloudError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        fs::write(&path, &content).map_err(|source| CloudError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(bytes = content.len(), "Template rendered");
        info!(path = %path.display(), resources = self.len(), "Template written");
        Ok(path)
    }
}

/// `<stack>.template.json` / `<stack>.template.yaml`
pub fn template_file_name(stack: &str, format: OutputFormat) -> String {
    format!("{}.template.{}", stack, format.extension())
}

/// A single resource entry in the manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource type (e.g., "AWS::EC2::VPC")
    #[serde(rename = "Type")]
    pub resource_type: String,

    /// Resource-specific properties
    #[serde(rename = "Properties")]
    pub properties: serde_json::Value,

    /// Logical IDs that must be created first
    #[serde(rename = "DependsOn", default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Construct name the resource was synthesized from
    #[serde(
        rename = "Metadata",
        default,
        skip_serializing_if = "Option::is_none",
        with = "construct_metadata"
    )]
    pub construct: Option<String>,
}

impl ResourceConfig {
    pub fn new(resource_type: impl Into<String>, properties: serde_json::Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            depends_on: Vec::new(),
            construct: None,
        }
    }

    pub fn depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }

    fn with_construct(mut self, construct: &str) -> Self {
        self.construct = Some(construct.to_string());
        self
    }

    /// Get a property value as a specific type
    pub fn get_property<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.properties
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// `Metadata: { "vpcflow:construct": "<name>" }`
mod construct_metadata {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    const KEY: &str = "vpcflow:construct";

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = BTreeMap::new();
        if let Some(name) = value {
            map.insert(KEY, name.as_str());
        }
        map.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let mut map = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(map.remove(KEY))
    }
}

/// Template output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(CloudError::InvalidConfig(format!(
                "未対応の出力形式: {other} (json または yaml)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vpc() -> ResourceConfig {
        ResourceConfig::new("AWS::EC2::VPC", json!({ "CidrBlock": "10.0.0.0/16" }))
    }

    #[test]
    fn test_add_and_lookup() {
        let mut manifest = Manifest::new(Some("test".to_string()));
        manifest.add("NetVpc", "net-vpc", vpc()).unwrap();

        assert_eq!(manifest.len(), 1);
        let resource = manifest.get("NetVpc").unwrap();
        assert_eq!(resource.construct.as_deref(), Some("net-vpc"));
        assert_eq!(
            resource.get_property::<String>("CidrBlock"),
            Some("10.0.0.0/16".to_string())
        );
        assert_eq!(manifest.by_type("AWS::EC2::VPC").len(), 1);
        assert!(manifest.by_type("AWS::EC2::Subnet").is_empty());
    }

    #[test]
    fn test_duplicate_logical_id() {
        let mut manifest = Manifest::default();
        manifest.add("NetVpc", "net-vpc", vpc()).unwrap();

        let err = manifest.add("NetVpc", "net_vpc", vpc()).unwrap_err();
        match err {
            CloudError::DuplicateLogicalId {
                logical_id,
                first,
                second,
            } => {
                assert_eq!(logical_id, "NetVpc");
                assert_eq!(first, "net-vpc");
                assert_eq!(second, "net_vpc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_shape() {
        let mut manifest = Manifest::new(None);
        manifest
            .add(
                "Route",
                "route",
                ResourceConfig::new("AWS::EC2::Route", json!({})).depends_on("Attachment"),
            )
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        assert!(value.get("Description").is_none());
        assert_eq!(value["Resources"]["Route"]["Type"], "AWS::EC2::Route");
        assert_eq!(value["Resources"]["Route"]["DependsOn"], json!(["Attachment"]));
        assert_eq!(
            value["Resources"]["Route"]["Metadata"]["vpcflow:construct"],
            "route"
        );
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut manifest = Manifest::new(Some("demo".to_string()));
        manifest.add("NetVpc", "net-vpc", vpc()).unwrap();

        let yaml = manifest.to_yaml().unwrap();
        assert!(yaml.contains("AWSTemplateFormatVersion:"));
        assert!(yaml.contains("AWS::EC2::VPC"));

        let back: Manifest = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, manifest);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("toml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }

    #[test]
    fn test_write_to_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("cdk.out");

        let mut manifest = Manifest::new(None);
        manifest.add("NetVpc", "net-vpc", vpc()).unwrap();

        let path = manifest.write_to(&out, "NetVpcStack", OutputFormat::Json).unwrap();
        assert_eq!(path, out.join("NetVpcStack.template.json"));

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, manifest.to_json().unwrap());
        assert_eq!(
            template_file_name("NetVpcStack", OutputFormat::Yaml),
            "NetVpcStack.template.yaml"
        );
    }

    #[test]
    fn test_write_to_rejects_path_in_stack_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("out");

        let mut manifest = Manifest::new(None);
        manifest.add("NetVpc", "net-vpc", vpc()).unwrap();

        for stack in ["../escape", "nested/stack", "win\\stack", "..", ""] {
            let result = manifest.write_to(&out, stack, OutputFormat::Json);
            assert!(
                matches!(result, Err(CloudError::InvalidConfig(_))),
                "{stack:?} should be rejected"
            );
        }
        assert!(!temp_dir.path().join("escape.template.json").exists());
        assert!(!out.exists());
    }
}
