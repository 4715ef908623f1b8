use pkg_mimir::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("uid '{uid}' and name '{name}' don't match")]
    Mismatch { uid: String, name: String },

    #[error("{kind} {name} requires a {key} metadata entry")]
    MissingMetadata {
        kind: String,
        name: String,
        key: String,
    },

    #[error("{operation} not supported for {kind}")]
    Unsupported { operation: String, kind: String },

    #[error("{kind} '{uid}' not found")]
    NotFound { kind: String, uid: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid {kind} spec for '{name}': {source}")]
    InvalidSpec {
        kind: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no handler registered for kind '{0}'")]
    UnknownKind(String),

    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error(transparent)]
    Resource(#[from] anyhow::Error),
}

impl HandlerError {
    /// True when the remote side simply has no such object yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HandlerError::NotFound { .. })
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
