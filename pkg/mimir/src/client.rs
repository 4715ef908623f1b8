use async_trait::async_trait;
use pkg_types::rules::{RuleGrouping, RuleGroupings};

use crate::error::ClientError;

/// Remote rules service.
/// Implementations: `HttpRulesClient` (Mimir/Cortex ruler), `InMemoryRulesClient`.
#[async_trait]
pub trait RulesClient: Send + Sync {
    /// Fetch every rule group, keyed by namespace.
    async fn list_rules(&self) -> Result<RuleGroupings, ClientError>;

    /// Push the groups of `grouping`. Used for both create and update; whether
    /// this is an upsert is up to the remote service.
    async fn create_rules(&self, grouping: RuleGrouping) -> Result<(), ClientError>;
}
