use async_trait::async_trait;
use pkg_constants::mimir::{DEFAULT_TIMEOUT_SECS, RULES_PATH, TENANT_HEADER};
use pkg_types::rules::{RuleGrouping, RuleGroupings};
use reqwest::{RequestBuilder, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info};

use crate::client::RulesClient;
use crate::error::ClientError;

/// Connection settings for a Mimir/Cortex ruler.
#[derive(Debug, Clone)]
pub struct HttpRulesConfig {
    pub address: String,
    /// Sent as `X-Scope-OrgID` and used as the basic-auth user.
    pub tenant_id: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl HttpRulesConfig {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            tenant_id: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Ruler client speaking the Prometheus-compatible rules config API:
/// `GET /prometheus/config/v1/rules` and `POST /prometheus/config/v1/rules/{namespace}`.
pub struct HttpRulesClient {
    client: reqwest::Client,
    config: HttpRulesConfig,
}

impl HttpRulesClient {
    pub fn new(config: HttpRulesConfig) -> Result<Self, ClientError> {
        // Validate the address up front so a bad config fails before any request.
        rules_url(&config.address, None)?;
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(ref tenant) = self.config.tenant_id {
            request = request.header(TENANT_HEADER, tenant);
        }
        if let Some(ref key) = self.config.api_key {
            let user = self.config.tenant_id.as_deref().unwrap_or_default();
            request = request.basic_auth(user, Some(key));
        }
        request
    }
}

#[async_trait]
impl RulesClient for HttpRulesClient {
    async fn list_rules(&self) -> Result<RuleGroupings, ClientError> {
        let url = rules_url(&self.config.address, None)?;
        debug!("Listing rule groups from {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;

        // The ruler answers 404 when the tenant has no rule groups at all.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(RuleGroupings::new());
        }
        let body = check_status(response).await?;
        if body.trim().is_empty() {
            return Ok(RuleGroupings::new());
        }
        Ok(serde_yaml::from_str(&body)?)
    }

    async fn create_rules(&self, grouping: RuleGrouping) -> Result<(), ClientError> {
        let url = rules_url(&self.config.address, Some(&grouping.namespace))?;
        for group in &grouping.groups {
            let body = serde_yaml::to_string(group)?;
            debug!("Pushing rule group {}/{} to {}", grouping.namespace, group.name, url);

            let response = self
                .authorize(self.client.post(url.clone()))
                .header(reqwest::header::CONTENT_TYPE, "application/yaml")
                .body(body)
                .send()
                .await?;
            check_status(response).await?;

            info!(
                "Pushed rule group {}/{} ({} rules)",
                grouping.namespace,
                group.name,
                group.rules.len()
            );
        }
        Ok(())
    }
}

/// Build the rules endpoint URL, with `namespace` as a trailing
/// percent-encoded path segment when given.
fn rules_url(address: &str, namespace: Option<&str>) -> Result<Url, ClientError> {
    let mut url = Url::parse(address)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", address, e)))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(address.to_string()))?;
        segments.pop_if_empty();
        segments.extend(RULES_PATH.trim_start_matches('/').split('/'));
        if let Some(ns) = namespace {
            segments.push(ns);
        }
    }
    Ok(url)
}

/// Return the body of a successful response, or a `Status` error carrying it.
async fn check_status(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }
    Ok(body)
}
