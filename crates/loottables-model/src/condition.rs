use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::range::NumberRange;

/// An entity involved in the kill that produced a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTarget {
    /// The looted entity itself.
    This,
    /// Whatever dealt the killing blow.
    Killer,
    /// The killer, only if it was a player.
    KillerPlayer,
}

/// A predicate gating a pool, entry or item function.
///
/// The `condition` tag selects the variant; each variant carries its own
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Condition {
    /// Passes with the given probability.
    RandomChance {
        /// Success probability in `0.0..=1.0`.
        chance: f32,
    },
    /// Like `random_chance`, with the probability raised per looting level.
    RandomChanceWithLooting {
        /// Base success probability.
        chance: f32,
        /// Probability added per level of looting.
        looting_multiplier: f32,
    },
    /// Passes when the kill was (not) performed by a player.
    KilledByPlayer {
        /// Inverts the check.
        #[serde(default)]
        inverse: bool,
    },
    /// Passes when the targeted entity has all of the given boolean properties.
    EntityProperties {
        /// Which entity to inspect.
        entity: EntityTarget,
        /// Property name to required value.
        properties: BTreeMap<String, bool>,
    },
    /// Passes when the targeted entity's scores fall within the given ranges.
    EntityScores {
        /// Which entity to inspect.
        entity: EntityTarget,
        /// Objective name to accepted range.
        scores: BTreeMap<String, NumberRange>,
    },
}
