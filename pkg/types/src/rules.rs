use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// --- Ruler wire shapes ---

/// A named, ordered collection of rules evaluated together by the ruler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_tenants: Vec<String>,
    #[serde(default)]
    pub rules: Vec<Map<String, Value>>,
}

impl RuleGroup {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interval: None,
            source_tenants: Vec::new(),
            rules: Vec::new(),
        }
    }
}

/// Rule groups pushed together under one ruler namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGrouping {
    pub namespace: String,
    pub groups: Vec<RuleGroup>,
}

/// Every rule group on the ruler, keyed by namespace.
pub type RuleGroupings = BTreeMap<String, Vec<RuleGroup>>;

// --- Host-side spec ---

/// Discriminator carried in a rule's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Recording,
    Alerting,
    /// Missing, non-string, or any other value.
    Untyped,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleKind::Recording => write!(f, "recording"),
            RuleKind::Alerting => write!(f, "alerting"),
            RuleKind::Untyped => write!(f, "untyped"),
        }
    }
}

/// One rule as written in a resource spec.
///
/// `name` and `query` are the generic field names; everything else
/// (`labels`, `annotations`, `for`, ...) rides along in `extra`.
/// `None` means the key is absent; an explicit `null` is `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub rule_type: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserialize a key that is present, keeping `null` as `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RuleSpec {
    pub fn kind(&self) -> RuleKind {
        match self.rule_type.as_ref().and_then(Value::as_str) {
            Some("recording") => RuleKind::Recording,
            Some("alerting") => RuleKind::Alerting,
            _ => RuleKind::Untyped,
        }
    }
}

/// The `spec` of a `PrometheusRuleGroup` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGroupSpec {
    pub rules: Vec<RuleSpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RuleGroupSpec {
    /// Parse a resource spec. Fails when `rules` is absent or is not a
    /// sequence of mappings.
    pub fn from_spec(spec: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(spec.clone()))
    }
}
