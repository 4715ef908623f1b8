//! Resource identity constants.

/// API version stamped on every resource this tool builds.
pub const API_VERSION: &str = "grizzly.grafana.com/v1alpha1";

/// Kind tag for Prometheus rule group resources.
pub const PROMETHEUS_RULE_GROUP_KIND: &str = "PrometheusRuleGroup";

/// Metadata key holding the resource name.
pub const METADATA_NAME: &str = "name";

/// Metadata key holding the ruler namespace of a rule group.
pub const METADATA_NAMESPACE: &str = "namespace";

/// Separator between namespace and group name in a composite UID.
pub const UID_SEPARATOR: char = '.';
