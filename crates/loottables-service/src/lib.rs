//! Layered, cached loading of loot tables.
//!
//! The entry point is [`service::TableService`]: given a table id it returns
//! a parsed, shared [`LootTable`](loottables_model::LootTable), resolving the
//! payload from an optional on-disk override directory or the bundled
//! resource set, memoizing the result with single-flight semantics, and
//! degrading every failure to the shared empty table.

pub mod bundled;
pub mod caching;
pub mod config;
pub mod logging;
pub mod resolve;
pub mod service;

pub use bundled::BundledAssets;
pub use caching::{LoadCache, LoadError, LoadResult};
pub use config::Config;
pub use resolve::{LayerKind, LayeredResolver, RawPayload};
pub use service::{JsonTableParser, TableParser, TableService};
