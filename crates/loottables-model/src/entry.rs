use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::function::ItemFunction;
use crate::id::TableId;

fn default_weight() -> i32 {
    1
}

/// One weighted candidate within a pool.
///
/// The `type` tag selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LootEntry {
    /// Yields a stack of a named item.
    Item(ItemEntry),
    /// Yields the output of another table, resolved by id.
    LootTable(TableEntry),
    /// Yields nothing; used to weight "no drop" into a pool.
    Empty(EmptyEntry),
}

impl LootEntry {
    /// The entry's relative selection weight.
    pub fn weight(&self) -> i32 {
        match self {
            LootEntry::Item(entry) => entry.weight,
            LootEntry::LootTable(entry) => entry.weight,
            LootEntry::Empty(entry) => entry.weight,
        }
    }
}

/// An entry yielding an item stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    /// Registry name of the item.
    pub name: String,
    /// Relative selection weight within the pool.
    #[serde(default = "default_weight")]
    pub weight: i32,
    /// Weight adjustment applied per point of luck.
    #[serde(default)]
    pub quality: i32,
    /// Transformations applied to the yielded stack, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<ItemFunction>,
    /// The entry is only eligible when all of these hold.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// An entry delegating to another table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    /// Id of the referenced table.
    pub name: TableId,
    /// Relative selection weight within the pool.
    #[serde(default = "default_weight")]
    pub weight: i32,
    /// Weight adjustment applied per point of luck.
    #[serde(default)]
    pub quality: i32,
    /// The entry is only eligible when all of these hold.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// An entry yielding nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyEntry {
    /// Relative selection weight within the pool.
    #[serde(default = "default_weight")]
    pub weight: i32,
    /// Weight adjustment applied per point of luck.
    #[serde(default)]
    pub quality: i32,
    /// The entry is only eligible when all of these hold.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}
