//! Redirect resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → outermost resolver (highest precedence source)
//!         hit  → 302 Found, Location: <url>
//!         miss → next resolver
//!     → ...
//!     → DefaultHandler (200 OK, fixed body)
//!
//! Chain Compilation (at startup):
//!     SourceConfig[] (precedence order)
//!     → document.rs (parse JSON/YAML into PathRecord[])
//!     → table.rs (fold records into LookupTable)
//!     → resolver.rs / persistent.rs (one Handler per source)
//!     → chain.rs (link each handler to the next, base innermost)
//! ```
//!
//! # Design Decisions
//! - Chain built at startup, immutable at runtime
//! - Exact path match only; no prefixes, patterns or normalization
//! - Exactly one handler answers each request
//! - Any construction failure aborts the whole chain

pub mod chain;
pub mod document;
pub mod handler;
pub mod persistent;
pub mod resolver;
pub mod table;

pub use chain::{compose, ChainError, ResolverFactory};
pub use document::{DocumentFormat, ParseError};
pub use handler::{DefaultHandler, Handler, SharedHandler};
pub use persistent::StoreResolver;
pub use resolver::MapResolver;
pub use table::{LookupTable, PathRecord};
