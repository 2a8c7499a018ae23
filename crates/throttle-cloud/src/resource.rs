//! Declared resources and their engine-facing configuration

use crate::error::Result;
use crate::output::OutputRef;
use serde::Serialize;
use std::collections::BTreeSet;

/// A resource type understood by the provisioning engine
pub trait Resource: Serialize {
    /// Engine type token (e.g. `aws:s3/bucket:Bucket`)
    const TYPE: &'static str;

    /// Short label for summaries and logs
    const KIND: &'static str;
}

/// Build the identity of a resource from its type token and logical name
pub fn identity(resource_type: &str, name: &str) -> String {
    format!("{}::{}", resource_type, name)
}

/// A resource together with its stable logical name
///
/// Output handles for the resource are produced by typed accessor methods
/// (see [`crate::aws`]); each returns an [`OutputRef`] pointing back here.
#[derive(Debug, Clone, PartialEq)]
pub struct Declared<T> {
    /// Logical name used by the engine for identity tracking
    pub name: String,

    /// Resource properties
    pub props: T,
}

impl<T: Resource> Declared<T> {
    pub fn new(name: impl Into<String>, props: T) -> Self {
        Self {
            name: name.into(),
            props,
        }
    }

    /// Identity of the resource (`type::name`)
    pub fn key(&self) -> String {
        identity(T::TYPE, &self.name)
    }

    pub(crate) fn output(&self, property: &str) -> OutputRef {
        OutputRef::new(self.key(), property)
    }

    /// Convert into the untyped form written to the declaration
    pub fn to_config(&self) -> Result<ResourceConfig> {
        let properties = serde_json::to_value(&self.props)?;
        Ok(ResourceConfig::new(T::TYPE, self.name.clone(), properties))
    }
}

/// Untyped configuration for a declared resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    /// Resource type token
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Logical name
    pub name: String,

    /// Resource-specific properties
    pub properties: serde_json::Value,

    /// Identities of the resources whose outputs are referenced
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ResourceConfig {
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        properties: serde_json::Value,
    ) -> Self {
        let depends_on = collect_references(&properties)
            .into_iter()
            .map(|output| output.resource)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            properties,
            depends_on,
        }
    }

    /// Get the full resource key (type::name)
    pub fn key(&self) -> String {
        identity(&self.resource_type, &self.name)
    }

    /// Get a property value as a specific type
    pub fn get_property<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.properties
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// All output references found in the properties
    pub fn references(&self) -> Vec<OutputRef> {
        collect_references(&self.properties)
    }
}

/// Walk a serialized property tree and collect `{"output": {...}}` nodes
fn collect_references(value: &serde_json::Value) -> Vec<OutputRef> {
    let mut found = Vec::new();
    walk_references(value, &mut found);
    found
}

fn walk_references(value: &serde_json::Value, found: &mut Vec<OutputRef>) {
    match value {
        serde_json::Value::Object(map) => {
            if map.len() == 1
                && let Some(output) = map.get("output")
                && let (Some(resource), Some(property)) = (
                    output.get("resource").and_then(|v| v.as_str()),
                    output.get("property").and_then(|v| v.as_str()),
                )
            {
                found.push(OutputRef::new(resource, property));
                return;
            }
            for child in map.values() {
                walk_references(child, found);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                walk_references(item, found);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_depends_on_is_sorted_and_unique() {
        let config = ResourceConfig::new(
            "aws:route53/record:Record",
            "www",
            json!({
                "zoneId": {"output": {"resource": "zone::b", "property": "zoneId"}},
                "aliases": [{
                    "name": {"output": {"resource": "dist::a", "property": "domainName"}},
                    "zoneId": {"output": {"resource": "dist::a", "property": "hostedZoneId"}}
                }]
            }),
        );

        assert_eq!(config.depends_on, vec!["dist::a", "zone::b"]);
        assert_eq!(config.references().len(), 3);
    }

    #[test]
    fn test_plain_properties_have_no_dependencies() {
        let config = ResourceConfig::new(
            "aws:route53/zone:Zone",
            "throttlehead.dev",
            json!({"name": "throttlehead.dev", "comment": "output"}),
        );
        assert!(config.depends_on.is_empty());
        assert_eq!(config.key(), "aws:route53/zone:Zone::throttlehead.dev");
        assert_eq!(
            config.get_property::<String>("name"),
            Some("throttlehead.dev".to_string())
        );
    }
}
