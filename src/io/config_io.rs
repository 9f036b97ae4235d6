use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

pub const CONFIG_FILE: &str = "todo.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load `todo.toml` from the storage directory. A missing file yields the
/// defaults; a malformed file is an error surfaced at startup.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => {
            return Err(ConfigError::Read {
                path,
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::Parse { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::CompactionPolicy;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn config_overrides_apply() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "color = false\ncompact-on-remove = \"keep-gaps\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(!config.color);
        assert_eq!(config.compact_on_remove, CompactionPolicy::KeepGaps);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "color = maybe").unwrap();
        assert!(matches!(
            load_config(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
