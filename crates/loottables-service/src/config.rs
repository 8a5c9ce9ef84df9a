use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use loottables_model::TableId;

/// Static configuration for a [`TableService`](crate::service::TableService).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding per-installation table overrides.
    ///
    /// When set, `<override_dir>/<namespace>/<path>.json` takes precedence
    /// over the bundled copy of the same table. When unset, only the bundled
    /// set is consulted.
    pub override_dir: Option<PathBuf>,

    /// Ids repopulated eagerly by
    /// [`reload_all`](crate::service::TableService::reload_all), in string
    /// form (`namespace:path`).
    pub known_tables: Vec<TableId>,
}

impl Config {
    /// Reads the configuration from a YAML file, or returns the defaults when
    /// no path is given.
    pub fn get(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_reader(
                fs::File::open(path).context("failed to open config file")?,
            ),
            None => Ok(Config::default()),
        }
    }

    fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut config = String::new();
        reader
            .read_to_string(&mut config)
            .context("failed to read config file")?;

        if config.is_empty() {
            anyhow::bail!("config file empty");
        }

        serde_yaml::from_str(&config).context("failed to parse config YAML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let result = Config::from_reader("".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_unspecified_fields_default() {
        let yaml = r#"
            override_dir: /data/tables
        "#;
        let cfg = Config::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(cfg.override_dir, Some(PathBuf::from("/data/tables")));
        assert!(cfg.known_tables.is_empty());
    }

    #[test]
    fn test_known_tables() {
        let yaml = r#"
            known_tables:
              - core:entities/bandit
              - core:chests/mine
        "#;
        let cfg = Config::from_reader(yaml.as_bytes()).unwrap();
        assert_eq!(
            cfg.known_tables,
            vec![
                TableId::new("core", "entities/bandit"),
                TableId::new("core", "chests/mine"),
            ]
        );
        assert_eq!(cfg.override_dir, None);
    }

    #[test]
    fn test_malformed_id_rejected() {
        let yaml = r#"
            known_tables: ["not-an-id"]
        "#;
        assert!(Config::from_reader(yaml.as_bytes()).is_err());
    }
}
