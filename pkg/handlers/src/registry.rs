use pkg_types::resource::Resource;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::error::{HandlerError, HandlerResult};
use crate::handler::Handler;

/// What `Registry::apply` did with a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Added,
    Updated,
}

impl std::fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyOutcome::Added => write!(f, "added"),
            ApplyOutcome::Updated => write!(f, "updated"),
        }
    }
}

/// Result of applying one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub uid: String,
    pub outcome: ApplyOutcome,
}

/// Handlers keyed by the resource kind they manage.
#[derive(Clone, Default)]
pub struct Registry {
    handlers: BTreeMap<String, Arc<dyn Handler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under its kind, replacing any earlier one.
    pub fn register(&mut self, handler: Arc<dyn Handler>) {
        self.handlers.insert(handler.kind().to_string(), handler);
    }

    pub fn get(&self, kind: &str) -> HandlerResult<Arc<dyn Handler>> {
        self.handlers
            .get(kind)
            .cloned()
            .ok_or_else(|| HandlerError::UnknownKind(kind.to_string()))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Push a local resource: add it when the remote side reports NotFound,
    /// update it when a remote copy exists. Any other failure is returned.
    pub async fn apply(&self, resource: &Resource) -> HandlerResult<Applied> {
        let handler = self.get(&resource.kind)?;
        handler.validate(resource)?;
        let uid = handler.get_uid(resource)?;

        let outcome = match handler.get_remote(resource).await {
            Ok(existing) => {
                handler.update(&existing, resource).await?;
                ApplyOutcome::Updated
            }
            Err(e) if e.is_not_found() => {
                handler.add(resource).await?;
                ApplyOutcome::Added
            }
            Err(e) => return Err(e),
        };
        info!("{} {} {}", resource.kind, uid, outcome);
        Ok(Applied { uid, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleHandler;
    use pkg_constants::resource::{API_VERSION, PROMETHEUS_RULE_GROUP_KIND};
    use pkg_mimir::InMemoryRulesClient;
    use serde_json::{Value, json};

    fn make_registry(client: Arc<InMemoryRulesClient>) -> Registry {
        let mut registry = Registry::new();
        registry.register(Arc::new(RuleHandler::new(client)));
        registry
    }

    fn make_resource(kind: &str, spec: Value) -> Resource {
        let spec = match spec {
            Value::Object(map) => map,
            _ => panic!("spec must be an object"),
        };
        let mut r = Resource::new(API_VERSION, kind, "latency", spec).unwrap();
        r.set_metadata("namespace", "teamA");
        r
    }

    #[test]
    fn test_lookup_by_kind() {
        let registry = make_registry(Arc::new(InMemoryRulesClient::new()));
        assert!(registry.get(PROMETHEUS_RULE_GROUP_KIND).is_ok());
        assert!(matches!(
            registry.get("Dashboard"),
            Err(HandlerError::UnknownKind(_))
        ));
        assert_eq!(
            registry.kinds().collect::<Vec<_>>(),
            vec![PROMETHEUS_RULE_GROUP_KIND]
        );
    }

    #[tokio::test]
    async fn test_apply_adds_then_updates() {
        let client = Arc::new(InMemoryRulesClient::new());
        let registry = make_registry(client.clone());
        let first = make_resource(
            PROMETHEUS_RULE_GROUP_KIND,
            json!({"rules": [{"type": "alerting", "name": "A", "query": "1"}]}),
        );
        let second = make_resource(
            PROMETHEUS_RULE_GROUP_KIND,
            json!({"rules": [{"type": "alerting", "name": "B", "query": "2"}]}),
        );

        assert_eq!(
            registry.apply(&first).await.unwrap(),
            Applied {
                uid: "teamA.latency".to_string(),
                outcome: ApplyOutcome::Added,
            }
        );
        let applied = registry.apply(&second).await.unwrap();
        assert_eq!(applied.uid, "teamA.latency");
        assert_eq!(applied.outcome, ApplyOutcome::Updated);

        let stored = client.snapshot().await;
        assert_eq!(stored["teamA"].len(), 1);
        assert_eq!(stored["teamA"][0].rules[0]["alert"], json!("B"));
    }

    #[tokio::test]
    async fn test_apply_validates_first() {
        let client = Arc::new(InMemoryRulesClient::new());
        let registry = make_registry(client.clone());
        let bad = make_resource(
            PROMETHEUS_RULE_GROUP_KIND,
            json!({"uid": "other", "rules": []}),
        );

        assert!(matches!(
            registry.apply(&bad).await,
            Err(HandlerError::Mismatch { .. })
        ));
        assert!(client.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_apply_unknown_kind() {
        let registry = make_registry(Arc::new(InMemoryRulesClient::new()));
        let r = make_resource("Dashboard", json!({}));
        assert!(matches!(
            registry.apply(&r).await,
            Err(HandlerError::UnknownKind(_))
        ));
    }
}
