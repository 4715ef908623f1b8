//! Ruler HTTP API constants.

/// Default ruler address when nothing is configured.
pub const DEFAULT_MIMIR_ADDRESS: &str = "http://127.0.0.1:9009";

/// Path listing every rule group, keyed by namespace.
pub const RULES_PATH: &str = "/prometheus/config/v1/rules";

/// Header carrying the tenant ID on multi-tenant rulers.
pub const TENANT_HEADER: &str = "X-Scope-OrgID";

/// Default HTTP timeout for ruler calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─── Environment ──────────────────────────────────────────────────────────

pub const ENV_ADDRESS: &str = "GRR_MIMIR_ADDRESS";
pub const ENV_TENANT: &str = "GRR_MIMIR_TENANT";
pub const ENV_API_KEY: &str = "GRR_MIMIR_API_KEY";
