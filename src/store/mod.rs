//! Durable key-value store subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     store.path → Store::open (once) → seed entries → shared handle
//!
//! Per request:
//!     StoreResolver → Store::lookup (read transaction, blocking pool)
//!     → Found(url) | NoPartition | NoKey
//! ```
//!
//! # Design Decisions
//! - One partition (redb table) per namespace, raw byte keys and values
//! - Database opened once and shared; redb readers never block each other
//! - Missing partitions are a lookup outcome, not an error

pub mod database;

pub use database::{Lookup, Store, StoreError};
