use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    #[serde(default)]
    pub show_group_ids: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_datetime_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            datetime_format: default_datetime_format(),
            show_group_ids: false,
        }
    }
}

impl Config {
    /// `~/.config/torego` on every platform.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("torego")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("torego.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("torego.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Resolve a user-supplied database name: absolute paths are kept,
    /// relative names live in the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize the configuration file and return the database path to use.
    ///
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        Self::init_at(&Self::config_file(), custom_db, is_test)
    }

    /// A config file that does not parse is reported, never overwritten.
    fn init_at(config_file: &Path, custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let mut cfg = Self::load_from(config_file)?;

        if let Some(name) = custom_db {
            cfg.database = Self::resolve_db_path(name).to_string_lossy().to_string();
        }

        if !is_test {
            if let Some(dir) = config_file.parent() {
                fs::create_dir_all(dir)?;
            }
            cfg.save_to(config_file)?;
        }

        if let Some(parent) = Path::new(&cfg.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str) -> PathBuf {
        let p = env::temp_dir().join(format!("{}_torego.conf", name));
        fs::remove_file(&p).ok();
        p
    }

    #[test]
    fn missing_file_means_defaults() {
        let cfg = Config::load_from(&temp_conf("missing")).unwrap();
        assert_eq!(cfg.datetime_format, "%Y-%m-%d %H:%M");
        assert!(!cfg.show_group_ids);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let path = temp_conf("partial");
        fs::write(&path, "show_group_ids: true\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert!(cfg.show_group_ids);
        assert!(cfg.database.ends_with("torego.sqlite"));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = temp_conf("saved");
        let cfg = Config {
            database: "/tmp/elsewhere.sqlite".into(),
            datetime_format: "%d/%m %H:%M".into(),
            show_group_ids: true,
        };
        cfg.save_to(&path).unwrap();

        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.database, "/tmp/elsewhere.sqlite");
        assert_eq!(back.datetime_format, "%d/%m %H:%M");
    }

    #[test]
    fn broken_yaml_is_a_config_error() {
        let path = temp_conf("broken");
        fs::write(&path, "show_group_ids: [not, a, bool\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn init_keeps_a_broken_config_file() {
        let path = temp_conf("init_broken");
        let broken = "datetime_format: [oops\n";
        fs::write(&path, broken).unwrap();

        let db = env::temp_dir().join("init_broken_torego.sqlite");
        let res = Config::init_at(&path, Some(db.to_str().unwrap()), false);

        assert!(matches!(res, Err(AppError::Config(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn init_writes_the_config_file() {
        let path = temp_conf("init_fresh");
        let db = env::temp_dir().join("init_fresh_torego.sqlite");

        let cfg = Config::init_at(&path, Some(db.to_str().unwrap()), false).unwrap();
        assert_eq!(cfg.database, db.to_string_lossy());
        assert_eq!(Config::load_from(&path).unwrap().database, cfg.database);
    }
}
