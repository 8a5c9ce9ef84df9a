//! Resolution of raw table payloads from the backing layers.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use loottables_model::TableId;

use crate::bundled::BundledAssets;
use crate::caching::{LoadError, LoadResult};

/// Identifies which backing layer produced, or failed to produce, a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// The optional on-disk override directory.
    Override,
    /// The embedded resource set.
    Bundled,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Override => write!(f, "override"),
            LayerKind::Bundled => write!(f, "bundled"),
        }
    }
}

/// Raw payload text together with where it came from.
///
/// The provenance fields exist for diagnostics only and are discarded once
/// the payload has been parsed.
#[derive(Debug, Clone)]
pub struct RawPayload {
    /// UTF-8 payload text.
    pub text: String,
    /// The layer that produced the payload.
    pub layer: LayerKind,
    /// Physical location within the layer.
    pub location: String,
}

/// Relative location of a table inside every layer: `namespace/path.json`.
pub fn table_path(id: &TableId) -> String {
    format!("{}/{}.json", id.namespace(), id.path())
}

/// Tries the backing layers in precedence order and returns the first answer.
///
/// The override directory is consulted before the bundled set. A layer that
/// has an entry terminates resolution even when the entry cannot be read:
/// presence at a higher layer masks lower layers, so a broken override never
/// silently falls back to the bundled copy. Only a layer with no entry at
/// all defers to the next one.
#[derive(Debug, Clone)]
pub struct LayeredResolver {
    override_root: Option<PathBuf>,
    bundled: Arc<BundledAssets>,
}

impl LayeredResolver {
    /// Creates a resolver over the given layers.
    pub fn new(override_root: Option<PathBuf>, bundled: Arc<BundledAssets>) -> Self {
        LayeredResolver {
            override_root,
            bundled,
        }
    }

    /// Fetches the raw payload for `id`.
    ///
    /// Never panics; all failures are reported through [`LoadError`].
    pub async fn resolve(&self, id: &TableId) -> LoadResult<RawPayload> {
        let relative = table_path(id);

        if let Some(root) = &self.override_root {
            let path = root.join(&relative);
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    return Ok(RawPayload {
                        text,
                        layer: LayerKind::Override,
                        location: path.display().to_string(),
                    });
                }
                // The only case that defers to the next layer.
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                // Unreadable or a directory instead of a leaf file.
                Err(err) => {
                    return Err(LoadError::Unreadable {
                        layer: LayerKind::Override,
                        location: path.display().to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        if let Some(text) = self.bundled.get(&relative) {
            return Ok(RawPayload {
                text: text.to_owned(),
                layer: LayerKind::Bundled,
                location: relative,
            });
        }

        Err(LoadError::NotFound)
    }
}
