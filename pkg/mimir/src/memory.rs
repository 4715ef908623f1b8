use async_trait::async_trait;
use pkg_types::rules::{RuleGrouping, RuleGroupings};
use tokio::sync::RwLock;
use tracing::debug;

use crate::client::RulesClient;
use crate::error::ClientError;

/// Ruler held in process memory. `create_rules` upserts by group name,
/// matching the ruler's own overwrite behaviour.
#[derive(Default)]
pub struct InMemoryRulesClient {
    groupings: RwLock<RuleGroupings>,
}

impl InMemoryRulesClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groupings(groupings: RuleGroupings) -> Self {
        Self {
            groupings: RwLock::new(groupings),
        }
    }

    /// Copy of everything currently stored.
    pub async fn snapshot(&self) -> RuleGroupings {
        self.groupings.read().await.clone()
    }
}

#[async_trait]
impl RulesClient for InMemoryRulesClient {
    async fn list_rules(&self) -> Result<RuleGroupings, ClientError> {
        Ok(self.groupings.read().await.clone())
    }

    async fn create_rules(&self, grouping: RuleGrouping) -> Result<(), ClientError> {
        let mut groupings = self.groupings.write().await;
        let groups = groupings.entry(grouping.namespace.clone()).or_default();
        for group in grouping.groups {
            debug!("Storing rule group {}/{}", grouping.namespace, group.name);
            match groups.iter_mut().find(|g| g.name == group.name) {
                Some(existing) => *existing = group,
                None => groups.push(group),
            }
        }
        Ok(())
    }
}
