use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::range::NumberRange;

/// A transformation applied to an item stack produced by an entry.
///
/// The `function` tag selects the variant. Every function may carry its own
/// list of conditions; a function whose conditions do not hold is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case")]
pub enum ItemFunction {
    /// Sets the stack size.
    SetCount {
        /// The stack size to apply.
        count: NumberRange,
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
    /// Sets the item's metadata value.
    SetData {
        /// The metadata value to apply.
        data: NumberRange,
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
    /// Sets the item's damage as a fraction of its durability.
    SetDamage {
        /// Damage fraction in `0.0..=1.0`.
        damage: NumberRange,
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
    /// Merges a raw data tag into the stack.
    SetNbt {
        /// The tag to merge, in its textual form.
        tag: String,
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
    /// Enchants the item as an enchanting table would at the given level.
    EnchantWithLevels {
        /// Enchantment level to emulate.
        levels: NumberRange,
        /// Whether treasure enchantments may be applied.
        #[serde(default)]
        treasure: bool,
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
    /// Applies one random applicable enchantment.
    EnchantRandomly {
        /// Restricts the pick to these enchantments; empty means any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        enchantments: Vec<String>,
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
    /// Grows the stack per looting level on the killing weapon.
    LootingEnchant {
        /// Items added per looting level.
        count: NumberRange,
        /// Upper bound on the final stack size; `0` means unlimited.
        #[serde(default)]
        limit: i32,
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
    /// Replaces the item with its smelted form.
    FurnaceSmelt {
        /// Gating conditions.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<Condition>,
    },
}
