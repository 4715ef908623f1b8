use async_trait::async_trait;
use pkg_constants::paths::{PROMETHEUS_DIR, RULE_GROUP_FILE_PREFIX};
use pkg_constants::resource::{METADATA_NAMESPACE, PROMETHEUS_RULE_GROUP_KIND, UID_SEPARATOR};
use pkg_mimir::RulesClient;
use pkg_types::resource::Resource;
use pkg_types::rules::{RuleGroup, RuleGroupSpec, RuleGrouping, RuleKind, RuleSpec};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{HandlerError, HandlerResult};
use crate::handler::Handler;

/// Handler for `PrometheusRuleGroup` resources stored in a ruler.
///
/// A rule group is addressed remotely as `<namespace>.<name>`. Writes always
/// overwrite the whole group; the remote copy is never diffed.
pub struct RuleHandler {
    client: Arc<dyn RulesClient>,
}

impl RuleHandler {
    pub fn new(client: Arc<dyn RulesClient>) -> Self {
        Self { client }
    }

    fn namespace<'a>(&self, resource: &'a Resource) -> HandlerResult<&'a str> {
        resource
            .get_metadata(METADATA_NAMESPACE)
            .ok_or_else(|| HandlerError::MissingMetadata {
                kind: PROMETHEUS_RULE_GROUP_KIND.to_string(),
                name: resource.name().to_string(),
                key: METADATA_NAMESPACE.to_string(),
            })
    }

    async fn get_remote_rule_group(&self, uid: &str) -> HandlerResult<Resource> {
        let (namespace, name) = split_uid(uid)?;

        debug!("Looking up rule group {} in namespace {}", name, namespace);
        let groupings = self.client.list_rules().await?;

        let group = groupings
            .get(namespace)
            .and_then(|groups| groups.iter().find(|g| g.name == name))
            .ok_or_else(|| HandlerError::NotFound {
                kind: PROMETHEUS_RULE_GROUP_KIND.to_string(),
                uid: uid.to_string(),
            })?;

        let rules = group.rules.iter().cloned().map(Value::Object).collect();
        let mut spec = Map::new();
        spec.insert("rules".to_string(), Value::Array(rules));

        let mut resource =
            Resource::new(self.api_version(), PROMETHEUS_RULE_GROUP_KIND, &group.name, spec)?;
        resource.set_metadata(METADATA_NAMESPACE, namespace);
        Ok(resource)
    }

    async fn get_remote_rule_group_list(&self) -> HandlerResult<Vec<String>> {
        let groupings = self.client.list_rules().await?;

        let uids = groupings
            .iter()
            .flat_map(|(namespace, groups)| {
                groups
                    .iter()
                    .map(move |g| format!("{}{}{}", namespace, UID_SEPARATOR, g.name))
            })
            .collect();
        Ok(uids)
    }

    async fn write_rule_group(&self, resource: &Resource) -> HandlerResult<()> {
        let namespace = self.namespace(resource)?;
        let spec =
            RuleGroupSpec::from_spec(resource.spec()).map_err(|source| HandlerError::InvalidSpec {
                kind: PROMETHEUS_RULE_GROUP_KIND.to_string(),
                name: resource.name().to_string(),
                source,
            })?;

        let mut group = RuleGroup::new(resource.name());
        for rule in spec.rules {
            if rule.kind() == RuleKind::Untyped {
                warn!(
                    "Rule {:?} in group {}/{} is neither recording nor alerting; 'name' is sent unchanged",
                    rule.name,
                    namespace,
                    resource.name()
                );
            }
            group.rules.push(to_wire_rule(rule));
        }

        info!(
            "Writing rule group {}/{} ({} rules)",
            namespace,
            group.name,
            group.rules.len()
        );
        let grouping = RuleGrouping {
            namespace: namespace.to_string(),
            groups: vec![group],
        };
        self.client.create_rules(grouping).await?;
        Ok(())
    }
}

#[async_trait]
impl Handler for RuleHandler {
    fn kind(&self) -> &str {
        PROMETHEUS_RULE_GROUP_KIND
    }

    fn resource_file_path(&self, resource: &Resource, filetype: &str) -> String {
        let filename = resource
            .name()
            .replace(['/', std::path::MAIN_SEPARATOR], "-");
        format!(
            "{}/{}{}.{}",
            PROMETHEUS_DIR, RULE_GROUP_FILE_PREFIX, filename, filetype
        )
    }

    fn validate(&self, resource: &Resource) -> HandlerResult<()> {
        match resource.get_spec_string("uid") {
            Some(uid) if uid != resource.name() => Err(HandlerError::Mismatch {
                uid: uid.to_string(),
                name: resource.name().to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn get_uid(&self, resource: &Resource) -> HandlerResult<String> {
        let namespace = self.namespace(resource)?;
        Ok(format!("{}{}{}", namespace, UID_SEPARATOR, resource.name()))
    }

    fn get_spec_uid(&self, _resource: &Resource) -> HandlerResult<String> {
        Err(HandlerError::Unsupported {
            operation: "GetSpecUID".to_string(),
            kind: PROMETHEUS_RULE_GROUP_KIND.to_string(),
        })
    }

    async fn get_by_uid(&self, uid: &str) -> HandlerResult<Resource> {
        self.get_remote_rule_group(uid).await
    }

    async fn get_remote(&self, resource: &Resource) -> HandlerResult<Resource> {
        let uid = self.get_uid(resource)?;
        self.get_remote_rule_group(&uid).await
    }

    async fn list_remote(&self) -> HandlerResult<Vec<String>> {
        self.get_remote_rule_group_list().await
    }

    async fn add(&self, resource: &Resource) -> HandlerResult<()> {
        self.write_rule_group(resource).await
    }

    async fn update(&self, _existing: &Resource, resource: &Resource) -> HandlerResult<()> {
        self.write_rule_group(resource).await
    }
}

/// Split `<namespace>.<name>` on the first separator.
fn split_uid(uid: &str) -> HandlerResult<(&str, &str)> {
    match uid.split_once(UID_SEPARATOR) {
        Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
            Ok((namespace, name))
        }
        _ => Err(HandlerError::InvalidArgument(format!(
            "rule group uid '{}' must have the form <namespace>.<name>",
            uid
        ))),
    }
}

/// Rename generic rule fields to the ruler's: `name` becomes `record` or
/// `alert` depending on `type`, and a non-null `query` becomes `expr`.
/// Untyped rules keep `name`; a null `query` is passed through as is.
fn to_wire_rule(rule: RuleSpec) -> Map<String, Value> {
    let kind = rule.kind();
    let RuleSpec {
        rule_type,
        name,
        query,
        mut extra,
    } = rule;

    if let Some(rule_type) = rule_type {
        extra.insert("type".to_string(), rule_type);
    }
    if let Some(name) = name {
        let key = match kind {
            RuleKind::Recording => "record",
            RuleKind::Alerting => "alert",
            RuleKind::Untyped => "name",
        };
        extra.insert(key.to_string(), name);
    }
    match query {
        Some(Value::Null) => {
            extra.insert("query".to_string(), Value::Null);
        }
        Some(query) => {
            extra.insert("expr".to_string(), query);
        }
        None => {}
    }
    extra
}
