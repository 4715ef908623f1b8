//! Client side of the ruler API: the `RulesClient` contract plus an HTTP
//! implementation and an in-memory one.

pub mod client;
pub mod error;
pub mod http;
pub mod memory;

pub use client::RulesClient;
pub use error::ClientError;
pub use http::HttpRulesClient;
pub use memory::InMemoryRulesClient;
