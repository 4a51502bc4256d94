//! URL redirection service library.
//!
//! Maps request paths to destination URLs through a chain of lookup
//! sources (durable store, JSON and YAML documents, literal maps). Each
//! source either redirects or hands the request to the next one; a base
//! handler answers whatever nobody resolved.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Handler, SharedHandler};
