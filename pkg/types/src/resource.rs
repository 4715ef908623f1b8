use anyhow::{Result, bail};
use pkg_constants::resource::METADATA_NAME;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Generic representation of a managed remote object.
///
/// On disk this is a YAML document:
/// ```yaml
/// apiVersion: grizzly.grafana.com/v1alpha1
/// kind: PrometheusRuleGroup
/// metadata:
///   name: latency
///   namespace: team-a
/// spec:
///   rules:
///     - type: alerting
///       name: HighLatency
///       query: up == 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub spec: Map<String, Value>,
}

impl Resource {
    /// Build a resource with `name` recorded in its metadata.
    pub fn new(api_version: &str, kind: &str, name: &str, spec: Map<String, Value>) -> Result<Self> {
        if kind.is_empty() {
            bail!("resource kind must not be empty");
        }
        if name.is_empty() {
            bail!("{} name must not be empty", kind);
        }
        let mut metadata = BTreeMap::new();
        metadata.insert(METADATA_NAME.to_string(), name.to_string());
        Ok(Self {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            metadata,
            spec,
        })
    }

    /// The resource name, or `""` when the metadata carries none.
    pub fn name(&self) -> &str {
        self.get_metadata(METADATA_NAME).unwrap_or_default()
    }

    pub fn spec(&self) -> &Map<String, Value> {
        &self.spec
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn set_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn has_metadata(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Look up a string-valued spec field. Non-string values count as absent.
    pub fn get_spec_string(&self, key: &str) -> Option<&str> {
        self.spec.get(key).and_then(Value::as_str)
    }

    /// Parse every YAML document in `content`. Empty documents are skipped.
    pub fn from_yaml_documents(content: &str) -> Result<Vec<Self>> {
        let mut resources = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(content) {
            let value = serde_yaml::Value::deserialize(doc)?;
            if value.is_null() {
                continue;
            }
            resources.push(serde_yaml::from_value(value)?);
        }
        Ok(resources)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
