use serde::{Deserialize, Serialize};

/// A quantity that is either fixed or drawn uniformly from a closed range.
///
/// Serialized as a bare number (`2`) for the fixed form, or as a
/// `{"min": 1, "max": 3}` object for the ranged form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberRange {
    /// A fixed amount.
    Exact(f32),
    /// An amount between `min` and `max`, inclusive.
    Range {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
}

impl NumberRange {
    /// The smallest value this range can produce.
    pub fn min(&self) -> f32 {
        match *self {
            NumberRange::Exact(n) => n,
            NumberRange::Range { min, .. } => min,
        }
    }

    /// The largest value this range can produce.
    pub fn max(&self) -> f32 {
        match *self {
            NumberRange::Exact(n) => n,
            NumberRange::Range { max, .. } => max,
        }
    }
}
