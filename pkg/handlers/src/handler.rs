use async_trait::async_trait;
use pkg_constants::resource::API_VERSION;
use pkg_types::resource::Resource;

use crate::error::HandlerResult;

/// Capabilities every resource kind exposes to the host.
/// Implementations: `RuleHandler` (Prometheus rule groups).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Kind tag this handler is registered under.
    fn kind(&self) -> &str;

    fn api_version(&self) -> &str {
        API_VERSION
    }

    /// Relative path a resource is written to when pulled to disk.
    fn resource_file_path(&self, resource: &Resource, filetype: &str) -> String;

    /// Local consistency checks. Never touches the remote service.
    fn validate(&self, resource: &Resource) -> HandlerResult<()>;

    /// Identifier that addresses the resource on the remote service.
    fn get_uid(&self, resource: &Resource) -> HandlerResult<String>;

    /// Identifier embedded in the resource spec, for kinds that carry one.
    fn get_spec_uid(&self, resource: &Resource) -> HandlerResult<String>;

    /// Fetch a remote object by UID. `HandlerError::NotFound` when absent.
    async fn get_by_uid(&self, uid: &str) -> HandlerResult<Resource>;

    /// Fetch the remote counterpart of a local resource.
    async fn get_remote(&self, resource: &Resource) -> HandlerResult<Resource>;

    /// UIDs of every remote object of this kind.
    async fn list_remote(&self) -> HandlerResult<Vec<String>>;

    async fn add(&self, resource: &Resource) -> HandlerResult<()>;

    async fn update(&self, existing: &Resource, resource: &Resource) -> HandlerResult<()>;
}
