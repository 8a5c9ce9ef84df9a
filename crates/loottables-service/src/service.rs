//! The public façade: cached, layered table access that never fails.

use std::fmt;
use std::sync::Arc;

use loottables_model::{LootTable, ParseTableError, TableId, parse_table};

use crate::bundled::BundledAssets;
use crate::caching::{LoadCache, LoadError, LoadResult};
use crate::config::Config;
use crate::resolve::LayeredResolver;

/// Turns raw payload text into a table.
///
/// The default implementation is [`JsonTableParser`]; a different grammar can
/// be plugged in through [`TableService::with_parser`]. Implementations must
/// be deterministic and side-effect free for identical input, and must report
/// failures through [`ParseTableError`] rather than panicking.
pub trait TableParser: Send + Sync {
    /// Parses one payload.
    fn parse(&self, text: &str) -> Result<LootTable, ParseTableError>;
}

/// The standard JSON parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTableParser;

impl TableParser for JsonTableParser {
    fn parse(&self, text: &str) -> Result<LootTable, ParseTableError> {
        parse_table(text)
    }
}

/// Cached, layered access to loot tables.
///
/// [`get_table`](Self::get_table) is total: whatever goes wrong during a load,
/// the caller receives a usable table (at worst the shared empty one) and the
/// failure is reported through diagnostics only. Loaded tables are shared and
/// must be treated as immutable.
pub struct TableService {
    resolver: LayeredResolver,
    parser: Arc<dyn TableParser>,
    cache: LoadCache<Arc<LootTable>>,
    known: Vec<TableId>,
}

impl TableService {
    /// Creates a service using the standard JSON parser.
    ///
    /// Construction does not populate the cache; call
    /// [`reload_all`](Self::reload_all) once afterwards to load the known set
    /// eagerly.
    pub fn new(config: Config, bundled: BundledAssets) -> Self {
        Self::with_parser(config, bundled, Arc::new(JsonTableParser))
    }

    /// Creates a service with a custom payload parser.
    pub fn with_parser(
        config: Config,
        bundled: BundledAssets,
        parser: Arc<dyn TableParser>,
    ) -> Self {
        TableService {
            resolver: LayeredResolver::new(config.override_dir, Arc::new(bundled)),
            parser,
            cache: LoadCache::new(),
            known: config.known_tables,
        }
    }

    /// Returns the table for `id`, loading and caching it on first access.
    ///
    /// Concurrent calls for the same id share a single load, and every
    /// observer of a completed load receives the same instance.
    pub async fn get_table(&self, id: &TableId) -> Arc<LootTable> {
        self.cache.get_with(id, self.load_table(id)).await
    }

    /// Drops all cached tables and eagerly reloads the known set.
    ///
    /// After this returns, no caller observes a table cached before the call.
    /// Eager repopulation surfaces reload diagnostics immediately instead of
    /// on next access.
    pub async fn reload_all(&self) {
        self.cache.invalidate_all();
        futures::future::join_all(self.known.iter().map(|id| self.get_table(id))).await;
    }

    /// The loader behind the cache. Total: failures degrade to the empty
    /// table with a diagnostic.
    async fn load_table(&self, id: &TableId) -> Arc<LootTable> {
        match self.try_load(id).await {
            Ok(table) => Arc::new(table),
            Err(err) => {
                report(id, &err);
                LootTable::empty()
            }
        }
    }

    async fn try_load(&self, id: &TableId) -> LoadResult<LootTable> {
        if !id.is_valid() {
            return Err(LoadError::InvalidName);
        }

        let payload = self.resolver.resolve(id).await?;
        self.parser
            .parse(&payload.text)
            .map_err(|err| LoadError::Malformed {
                layer: payload.layer,
                location: payload.location,
                reason: err.to_string(),
            })
    }
}

impl fmt::Debug for TableService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableService")
            .field("cached tables", &self.cache.entry_count())
            .field("known tables", &self.known.len())
            .finish()
    }
}

/// One diagnostic per failed load, at a severity matching the failure kind.
fn report(id: &TableId, err: &LoadError) {
    match err {
        LoadError::InvalidName => {
            tracing::debug!(%id, "invalid table name, skipped");
        }
        LoadError::NotFound => {
            tracing::warn!(%id, "table not found in any layer");
        }
        LoadError::Unreadable { .. } => {
            tracing::warn!(%id, error = %err, "failed to read table");
        }
        LoadError::Malformed { .. } => {
            tracing::error!(%id, error = %err, "failed to parse table");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use loottables_model::LootEntry;
    use tempfile::TempDir;

    use super::*;

    /// Delegates to the JSON parser while counting invocations; the optional
    /// delay widens the race window in the coalescing test.
    struct CountingParser {
        parses: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl TableParser for CountingParser {
        fn parse(&self, text: &str) -> Result<LootTable, ParseTableError> {
            self.parses.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            JsonTableParser.parse(text)
        }
    }

    fn counting_service(
        config: Config,
        bundled: BundledAssets,
        delay: Duration,
    ) -> (TableService, Arc<AtomicUsize>) {
        let parses = Arc::new(AtomicUsize::new(0));
        let parser = CountingParser {
            parses: Arc::clone(&parses),
            delay,
        };
        let service = TableService::with_parser(config, bundled, Arc::new(parser));
        (service, parses)
    }

    fn payload(item: &str) -> String {
        format!(
            r#"{{"pools": [{{"rolls": 1, "entries": [{{"type": "item", "name": "{item}"}}]}}]}}"#
        )
    }

    fn first_item_name(table: &LootTable) -> &str {
        let LootEntry::Item(item) = &table.pools[0].entries[0] else {
            panic!("expected an item entry");
        };
        &item.name
    }

    fn write_override(root: &TempDir, relative: &str, text: &str) {
        let path = root.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[tokio::test]
    async fn test_invalid_name_never_touches_layers() {
        let id = TableId::new("core", "chests/mine.json");
        // Plant readable payloads at the exact sub-path the invalid id would
        // map to; if resolution ran, a real table would come back.
        let root = TempDir::new().unwrap();
        write_override(&root, "core/chests/mine.json.json", &payload("decoy"));
        let bundled =
            BundledAssets::from_iter([("core/chests/mine.json.json", payload("decoy"))]);

        let config = Config {
            override_dir: Some(root.path().to_path_buf()),
            ..Default::default()
        };
        let (service, parses) = counting_service(config, bundled, Duration::ZERO);

        let table = service.get_table(&id).await;
        assert!(Arc::ptr_eq(&table, &LootTable::empty()));
        assert_eq!(parses.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_override_takes_precedence() {
        let id = TableId::new("core", "chests/mine");
        let root = TempDir::new().unwrap();
        write_override(&root, "core/chests/mine.json", &payload("from_override"));
        let bundled = BundledAssets::from_iter([("core/chests/mine.json", payload("bundled"))]);

        let config = Config {
            override_dir: Some(root.path().to_path_buf()),
            ..Default::default()
        };
        let service = TableService::new(config, bundled);

        let table = service.get_table(&id).await;
        assert_eq!(first_item_name(&table), "from_override");
    }

    #[tokio::test]
    async fn test_unreadable_override_does_not_fall_through() {
        let id = TableId::new("core", "chests/mine");
        let root = TempDir::new().unwrap();
        // A directory at the payload path: present in the layer, not a leaf.
        fs::create_dir_all(root.path().join("core/chests/mine.json")).unwrap();
        let bundled = BundledAssets::from_iter([("core/chests/mine.json", payload("bundled"))]);

        let config = Config {
            override_dir: Some(root.path().to_path_buf()),
            ..Default::default()
        };
        let (service, parses) = counting_service(config, bundled, Duration::ZERO);

        let table = service.get_table(&id).await;
        assert!(Arc::ptr_eq(&table, &LootTable::empty()));
        assert_eq!(parses.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_absent_everywhere_yields_empty() {
        let service = TableService::new(Config::default(), BundledAssets::new());

        let table = service.get_table(&TableId::new("core", "nope")).await;
        assert!(Arc::ptr_eq(&table, &LootTable::empty()));
    }

    #[tokio::test]
    async fn test_malformed_payload_yields_empty() {
        let id = TableId::new("core", "chests/mine");
        let bundled = BundledAssets::from_iter([("core/chests/mine.json", "{ not json")]);
        let (service, parses) = counting_service(Config::default(), bundled, Duration::ZERO);

        let table = service.get_table(&id).await;
        assert!(Arc::ptr_eq(&table, &LootTable::empty()));
        assert_eq!(parses.load(Ordering::SeqCst), 1);

        // The sentinel is cached like any other result.
        let again = service.get_table(&id).await;
        assert!(Arc::ptr_eq(&again, &LootTable::empty()));
        assert_eq!(parses.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sequential_gets_share_one_load() {
        let id = TableId::new("core", "chests/mine");
        let bundled = BundledAssets::from_iter([("core/chests/mine.json", payload("ruby"))]);
        let (service, parses) = counting_service(Config::default(), bundled, Duration::ZERO);

        let first = service.get_table(&id).await;
        let second = service.get_table(&id).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(parses.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_gets_coalesce() {
        let id = TableId::new("core", "chests/mine");
        let bundled = BundledAssets::from_iter([("core/chests/mine.json", payload("ruby"))]);
        let (service, parses) =
            counting_service(Config::default(), bundled, Duration::from_millis(25));
        let service = Arc::new(service);

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                let id = id.clone();
                tokio::spawn(async move { service.get_table(&id).await })
            })
            .collect();

        let tables: Vec<_> = futures::future::try_join_all(tasks).await.unwrap();

        assert_eq!(parses.load(Ordering::SeqCst), 1);
        for table in &tables {
            assert!(Arc::ptr_eq(table, &tables[0]));
        }
    }

    #[tokio::test]
    async fn test_reload_all_picks_up_changed_content() {
        let id = TableId::new("core", "chests/mine");
        let root = TempDir::new().unwrap();
        write_override(&root, "core/chests/mine.json", &payload("before"));

        let config = Config {
            override_dir: Some(root.path().to_path_buf()),
            known_tables: vec![id.clone()],
        };
        let (service, parses) = counting_service(config, BundledAssets::new(), Duration::ZERO);

        let table = service.get_table(&id).await;
        assert_eq!(first_item_name(&table), "before");
        assert_eq!(parses.load(Ordering::SeqCst), 1);

        write_override(&root, "core/chests/mine.json", &payload("after"));
        service.reload_all().await;
        // Repopulation happened eagerly, exactly once for the key.
        assert_eq!(parses.load(Ordering::SeqCst), 2);

        let table = service.get_table(&id).await;
        assert_eq!(first_item_name(&table), "after");
        assert_eq!(parses.load(Ordering::SeqCst), 2);
    }
}
