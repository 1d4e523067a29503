use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const CSV_KIND: &str = "ClusterServiceVersion";
pub const CRD_KIND: &str = "CustomResourceDefinition";

/// Standard object metadata, reduced to the fields a bundle reader cares about.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub annotations: HashMap<String, String>,
}

/// Any kubernetes object found in the bundle. Everything besides the type
/// and metadata stays untyped.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    #[serde(default)]
    pub api_version: String,

    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl Object {
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

/// The operator's primary descriptor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceVersion {
    pub api_version: String,

    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub spec: serde_json::Value,
}

impl ClusterServiceVersion {
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    pub fn annotations(&self) -> &HashMap<String, String> {
        &self.metadata.annotations
    }

    /// Returns the annotation value, treating an empty value like a missing one.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .annotations
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl TryFrom<Object> for ClusterServiceVersion {
    type Error = serde_json::Error;

    fn try_from(obj: Object) -> Result<Self, Self::Error> {
        serde_json::from_value(serde_json::to_value(obj)?)
    }
}
