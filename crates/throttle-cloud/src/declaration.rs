//! The declaration handed to the provisioning engine

use crate::error::{CloudError, Result};
use crate::output::OutputRef;
use crate::resource::{Declared, Resource, ResourceConfig};
use crate::secret::REDACTED;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Rendering format for a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Full set of resources and exports for one stack
///
/// Resources keep declaration order and exports are sorted by name, so the
/// same input always renders to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    /// Project name
    pub project: String,

    /// Stack (environment) name
    pub stack: String,

    /// Declared resources in declaration order
    pub resources: Vec<ResourceConfig>,

    /// Exported outputs indexed by export name
    pub exports: BTreeMap<String, OutputRef>,
}

impl Declaration {
    pub fn new(project: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            stack: stack.into(),
            resources: Vec::new(),
            exports: BTreeMap::new(),
        }
    }

    /// Add a typed resource
    pub fn declare<T: Resource>(&mut self, resource: &Declared<T>) -> Result<()> {
        self.add(resource.to_config()?)
    }

    /// Add an untyped resource; identities must be unique
    pub fn add(&mut self, resource: ResourceConfig) -> Result<()> {
        let key = resource.key();
        if self.resources.iter().any(|r| r.key() == key) {
            return Err(CloudError::ResourceAlreadyExists(key));
        }
        tracing::debug!(resource = %key, "Declared resource");
        self.resources.push(resource);
        Ok(())
    }

    /// Export an output under a stable name
    pub fn export(&mut self, name: impl Into<String>, output: OutputRef) {
        self.exports.insert(name.into(), output);
    }

    pub fn get(&self, resource_type: &str, name: &str) -> Option<&ResourceConfig> {
        self.resources
            .iter()
            .find(|r| r.resource_type == resource_type && r.name == name)
    }

    /// Check that every reference and export targets a declared resource
    pub fn validate(&self) -> Result<()> {
        let declared: BTreeSet<String> = self.resources.iter().map(|r| r.key()).collect();

        for resource in &self.resources {
            if let Some(target) = resource.depends_on.iter().find(|d| !declared.contains(*d)) {
                return Err(CloudError::DanglingReference {
                    resource: resource.key(),
                    target: target.clone(),
                });
            }
        }

        for (export, output) in &self.exports {
            if !declared.contains(&output.resource) {
                return Err(CloudError::DanglingExport {
                    export: export.clone(),
                    target: output.resource.clone(),
                });
            }
        }

        Ok(())
    }

    /// Copy of the declaration with every secret value replaced
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for resource in &mut copy.resources {
            redact(&mut resource.properties);
        }
        copy
    }

    /// Render to a string in the given format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    /// Summary of the declaration
    pub fn summary(&self) -> DeclarationSummary {
        let mut by_type = BTreeMap::new();
        for resource in &self.resources {
            *by_type.entry(resource.resource_type.clone()).or_insert(0) += 1;
        }
        DeclarationSummary {
            total: self.resources.len(),
            by_type,
            exports: self.exports.len(),
        }
    }
}

/// Replace the payload of every `{"secret": ...}` node
fn redact(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.len() == 1
                && let Some(secret) = map.get_mut("secret")
            {
                *secret = serde_json::Value::String(REDACTED.to_string());
                return;
            }
            for child in map.values_mut() {
                redact(child);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                redact(item);
            }
        }
        _ => {}
    }
}

/// Summary of declared resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub exports: usize,
}

impl DeclarationSummary {
    pub fn count(&self, resource_type: &str) -> usize {
        self.by_type.get(resource_type).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for DeclarationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} resources to declare, {} exports",
            self.total, self.exports
        )
    }
}
