//! References to outputs of sibling resources

use crate::secret::Secret;
use serde::Serialize;
use std::fmt;

/// A property of another declared resource, resolved by the engine
///
/// `resource` is the identity (`type::name`) of the referenced resource and
/// `property` the output it exposes, e.g. `bucketRegionalDomainName`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct OutputRef {
    pub resource: String,
    pub property: String,
}

impl OutputRef {
    pub fn new(resource: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for OutputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.property)
    }
}

/// A property value: a literal, a secret literal or a reference to an output
///
/// Serialized forms:
/// - `Output` → `{"output": {"resource": "...", "property": "..."}}`
/// - `Secret` → `{"secret": <value>}`
/// - `Value`  → the plain value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Input<T> {
    Output(OutputRef),
    Secret(Secret<T>),
    #[serde(untagged)]
    Value(T),
}

impl<T> From<OutputRef> for Input<T> {
    fn from(output: OutputRef) -> Self {
        Input::Output(output)
    }
}

impl<T> From<Secret<T>> for Input<T> {
    fn from(secret: Secret<T>) -> Self {
        Input::Secret(secret)
    }
}

impl From<&str> for Input<String> {
    fn from(value: &str) -> Self {
        Input::Value(value.to_string())
    }
}

impl From<String> for Input<String> {
    fn from(value: String) -> Self {
        Input::Value(value)
    }
}
