use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::condition::Condition;
use crate::entry::LootEntry;
use crate::range::NumberRange;

static EMPTY: Lazy<Arc<LootTable>> = Lazy::new(|| Arc::new(LootTable { pools: Vec::new() }));

/// A deserialized loot table: an ordered list of independently rolled pools.
///
/// Tables are immutable once constructed and are shared behind an [`Arc`] by
/// the loading service; callers must not rely on exclusive ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    /// The table's pools.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<LootPool>,
}

impl LootTable {
    /// The shared empty table.
    ///
    /// A process-wide constant handed out whenever a table cannot be loaded.
    /// Every call returns the same allocation.
    pub fn empty() -> Arc<LootTable> {
        Arc::clone(&EMPTY)
    }

    /// Whether this table has no pools.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// One pool: a set of weighted entries rolled a number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootPool {
    /// The pool only contributes when all of these hold.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// How many times the pool is rolled.
    pub rolls: NumberRange,
    /// Extra rolls applied per point of luck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_rolls: Option<NumberRange>,
    /// The weighted candidates.
    pub entries: Vec<LootEntry>,
}

/// Failure to deserialize a table payload.
#[derive(Debug, Error)]
#[error("invalid loot table: {0}")]
pub struct ParseTableError(#[from] serde_json::Error);

/// Parses a loot table from its JSON serialization.
///
/// Deterministic and side-effect free: identical input yields an identical
/// table or an identical error.
pub fn parse_table(text: &str) -> Result<LootTable, ParseTableError> {
    Ok(serde_json::from_str(text)?)
}
