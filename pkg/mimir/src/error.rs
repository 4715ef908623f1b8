use thiserror::Error;

/// Anything the ruler client can report: transport, HTTP status, or payload failures.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to ruler failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ruler returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid ruler payload: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid ruler address '{0}'")]
    InvalidUrl(String),
}
