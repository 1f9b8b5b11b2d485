use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BookstockConfig {
    pub database: Option<String>,
    pub fixtures: Option<String>,
    pub sale_window_start: Option<String>,
    pub sale_window_end: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bookstock.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("bookstock.db")
}

pub fn default_fixtures_path() -> PathBuf {
    PathBuf::from("tests_data.json")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BookstockConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BookstockConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BookstockConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstock.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstock.toml");

        let config = BookstockConfig {
            database: Some("data/bookstock.db".to_string()),
            fixtures: Some("tests_data.json".to_string()),
            sale_window_start: Some("2018-10-24".to_string()),
            sale_window_end: Some("2018-10-26".to_string()),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("data/bookstock.db"));
        assert_eq!(loaded.sale_window_end.as_deref(), Some("2018-10-26"));
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookstock.toml");

        write_config(&path, &BookstockConfig::default(), false).unwrap();
        assert!(write_config(&path, &BookstockConfig::default(), false).is_err());
        assert!(write_config(&path, &BookstockConfig::default(), true).is_ok());
    }
}
