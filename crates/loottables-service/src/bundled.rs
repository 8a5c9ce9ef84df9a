//! The embedded, read-only resource layer.

use std::borrow::Cow;

use rustc_hash::FxHashMap;

/// The fixed set of table payloads shipped with the application.
///
/// Keys are relative sub-paths as produced by
/// [`table_path`](crate::resolve::table_path). The set is assembled once at
/// startup, typically from `include_str!` constants, and treated as immutable
/// configuration afterwards.
#[derive(Debug, Default)]
pub struct BundledAssets {
    entries: FxHashMap<String, Cow<'static, str>>,
}

impl BundledAssets {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a payload under the given relative sub-path.
    ///
    /// Static payloads are stored without copying.
    pub fn insert(&mut self, relative_path: impl Into<String>, text: impl Into<Cow<'static, str>>) {
        self.entries.insert(relative_path.into(), text.into());
    }

    /// Looks up the payload stored under a relative sub-path.
    pub fn get(&self, relative_path: &str) -> Option<&str> {
        self.entries.get(relative_path).map(|text| text.as_ref())
    }

    /// Number of bundled payloads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set contains no payloads.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P, T> FromIterator<(P, T)> for BundledAssets
where
    P: Into<String>,
    T: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut assets = BundledAssets::new();
        for (path, text) in iter {
            assets.insert(path, text);
        }
        assets
    }
}
