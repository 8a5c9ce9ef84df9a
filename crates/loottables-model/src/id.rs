use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Separates the namespace and path parts in the string form of a [`TableId`].
pub const NAMESPACE_SEPARATOR: char = ':';

/// The character reserved for file extensions in backing layers.
///
/// Table paths containing it can never map to a distinct on-disk location,
/// so such ids are permanently invalid.
pub const EXTENSION_SEPARATOR: char = '.';

/// A two-part key addressing a loadable loot table.
///
/// Ids are immutable values with structural equality and hashing, which makes
/// them directly usable as cache keys. The canonical string form is
/// `namespace:path`, e.g. `core:entities/bandit`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId {
    namespace: String,
    path: String,
}

impl TableId {
    /// Creates an id from its two parts.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        TableId {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path part.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this id may be resolved against backing layers.
    ///
    /// False iff the path contains [`EXTENSION_SEPARATOR`]. Invalid ids are
    /// never resolved; they load as the empty table.
    pub fn is_valid(&self) -> bool {
        !self.path.contains(EXTENSION_SEPARATOR)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.path)
    }
}

/// The error returned when parsing a malformed id string.
#[derive(Debug, Error)]
#[error("table ids take the form `namespace:path`, got {0:?}")]
pub struct InvalidTableId(String);

impl FromStr for TableId {
    type Err = InvalidTableId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, path)) if !namespace.is_empty() && !path.is_empty() => {
                Ok(TableId::new(namespace, path))
            }
            _ => Err(InvalidTableId(s.into())),
        }
    }
}

impl Serialize for TableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TableId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
