//! Resource handlers: the bridge between generic `Resource`s and the remote
//! services that own them. Each handler covers one resource kind and is
//! reached through the `Registry`.

pub mod error;
pub mod handler;
pub mod registry;
pub mod rules;

pub use error::{HandlerError, HandlerResult};
pub use handler::Handler;
pub use registry::{Applied, ApplyOutcome, Registry};
pub use rules::RuleHandler;
