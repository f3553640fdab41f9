use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Relative path of the database when neither flag nor config names one
pub const DEFAULT_DATABASE: &str = "food_wastage.db";
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_UI_DIR: &str = "ui/build";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FoodshareConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub ui_dir: Option<String>,
}

impl FoodshareConfig {
    /// Config written by `foodshare init`
    pub fn with_defaults() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_string()),
            port: Some(DEFAULT_PORT),
            ui_dir: Some(DEFAULT_UI_DIR.to_string()),
        }
    }

    /// Flag value, then config value, then the default
    pub fn database_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    pub fn port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn ui_dir(&self) -> PathBuf {
        PathBuf::from(self.ui_dir.as_deref().unwrap_or(DEFAULT_UI_DIR))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("foodshare.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<FoodshareConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: FoodshareConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &FoodshareConfig, force: bool) -> anyhow::Result<()> {
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
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("foodshare.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foodshare.toml");
        let config = FoodshareConfig {
            database: Some("data/food.db".into()),
            port: Some(9000),
            ui_dir: None,
        };
        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &FoodshareConfig::default(), true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(FoodshareConfig::default()));
    }

    #[test]
    fn test_precedence() {
        let config = FoodshareConfig {
            database: Some("from_config.db".into()),
            port: None,
            ui_dir: None,
        };
        assert_eq!(config.database_path(Some(PathBuf::from("flag.db"))), PathBuf::from("flag.db"));
        assert_eq!(config.database_path(None), PathBuf::from("from_config.db"));
        assert_eq!(FoodshareConfig::default().database_path(None), PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(config.port(None), DEFAULT_PORT);
        assert_eq!(config.port(Some(80)), 80);
        assert_eq!(config.ui_dir(), PathBuf::from(DEFAULT_UI_DIR));
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("food.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
