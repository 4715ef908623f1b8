//! Filesystem path constants.

/// Default config file path for the CLI.
pub const DEFAULT_CONFIG: &str = "grr.yaml";

/// Directory (relative to the pull target) holding Prometheus resources.
pub const PROMETHEUS_DIR: &str = "prometheus";

/// File name prefix for rule group resources inside `PROMETHEUS_DIR`.
/// Full path = `PROMETHEUS_DIR/RULE_GROUP_FILE_PREFIX<name>.<filetype>`.
pub const RULE_GROUP_FILE_PREFIX: &str = "rules-";

/// Extension used when writing pulled resources.
pub const DEFAULT_FILETYPE: &str = "yaml";
