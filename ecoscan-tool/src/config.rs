use std::path::{Path, PathBuf};

use ecoscan_core::StoreOptions;
use serde::Deserialize;
use tracing::warn;

use crate::store::default_store_path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub serialize_appends: bool,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ecoscan").join("config.toml"))
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    load_config_from(&path)
}

/// Reads a config file; a missing or malformed file yields defaults.
pub fn load_config_from(path: &Path) -> Config {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Config::default();
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring invalid config");
        Config::default()
    })
}

/// CLI flags win over the config file, which wins over defaults.
pub fn resolve_store_config(
    config: Config,
    cli_path: Option<PathBuf>,
    cli_serialize: bool,
) -> (PathBuf, StoreOptions) {
    let store_path = cli_path
        .or(config.store.path)
        .unwrap_or_else(default_store_path);
    let options = StoreOptions {
        serialize_appends: cli_serialize || config.store.serialize_appends,
    };

    (store_path, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cli_overrides_config() {
        let config = Config {
            store: StoreConfig {
                path: Some(PathBuf::from("/from/config")),
                serialize_appends: false,
            },
        };

        let (path, options) = resolve_store_config(config, Some(PathBuf::from("/from/cli")), true);

        assert_eq!(path, PathBuf::from("/from/cli"));
        assert!(options.serialize_appends);
    }

    #[test]
    fn config_overrides_default() {
        let config = Config {
            store: StoreConfig {
                path: Some(PathBuf::from("/from/config")),
                serialize_appends: true,
            },
        };

        let (path, options) = resolve_store_config(config, None, false);

        assert_eq!(path, PathBuf::from("/from/config"));
        assert!(options.serialize_appends);
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\npath = \"/data/ecoscan\"\nserialize_appends = true").unwrap();

        let config = load_config_from(file.path());

        assert_eq!(config.store.path, Some(PathBuf::from("/data/ecoscan")));
        assert!(config.store.serialize_appends);
    }

    #[test]
    fn invalid_or_missing_file_gives_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store = 3").unwrap();

        assert!(load_config_from(file.path()).store.path.is_none());
        assert!(load_config_from(Path::new("/nonexistent/ecoscan.toml")).store.path.is_none());
    }
}
