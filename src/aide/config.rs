use crate::error::{AideError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CURRENCY: &str = "RUB";

/// Keys accepted by `get`/`set`, in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "notes-file",
    "tasks-file",
    "contacts-file",
    "finance-file",
    "report-dir",
    "currency",
];

/// Configuration for aide, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AideConfig {
    /// Collection file names, relative to the data directory unless absolute.
    #[serde(default = "default_notes_file")]
    pub notes_file: String,

    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,

    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,

    #[serde(default = "default_finance_file")]
    pub finance_file: String,

    /// Where finance reports are written. Defaults to the data directory.
    #[serde(default)]
    pub report_dir: Option<PathBuf>,

    /// Suffix appended to money amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_notes_file() -> String {
    "notes.json".to_string()
}

fn default_tasks_file() -> String {
    "tasks.json".to_string()
}

fn default_contacts_file() -> String {
    "contacts.json".to_string()
}

fn default_finance_file() -> String {
    "finance.json".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for AideConfig {
    fn default() -> Self {
        Self {
            notes_file: default_notes_file(),
            tasks_file: default_tasks_file(),
            contacts_file: default_contacts_file(),
            finance_file: default_finance_file(),
            report_dir: None,
            currency: default_currency(),
        }
    }
}

impl AideConfig {
    /// Load config from the given directory, or return defaults if not found.
    ///
    /// An unparseable file also yields defaults (with a warning); the next
    /// `save` overwrites it.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AideError::Io)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(
                    "Config file {} is corrupt ({}); using defaults",
                    config_path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AideError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AideError::Serialization)?;
        fs::write(config_path, content).map_err(AideError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "notes-file" => Some(self.notes_file.clone()),
            "tasks-file" => Some(self.tasks_file.clone()),
            "contacts-file" => Some(self.contacts_file.clone()),
            "finance-file" => Some(self.finance_file.clone()),
            "report-dir" => Some(
                self.report_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "currency" => Some(self.currency.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        let require_file = |v: &str| -> std::result::Result<String, String> {
            if v.is_empty() {
                Err(format!("{} cannot be empty", key))
            } else {
                Ok(v.to_string())
            }
        };

        match key {
            "notes-file" => self.notes_file = require_file(value)?,
            "tasks-file" => self.tasks_file = require_file(value)?,
            "contacts-file" => self.contacts_file = require_file(value)?,
            "finance-file" => self.finance_file = require_file(value)?,
            "report-dir" => {
                self.report_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "currency" => self.currency = value.to_string(),
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    /// Resolve a configured file name against the data directory.
    pub fn resolve(&self, data_dir: &Path, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            data_dir.join(path)
        }
    }

    pub fn report_dir(&self, data_dir: &Path) -> PathBuf {
        match &self.report_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => data_dir.join(dir),
            None => data_dir.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AideConfig::default();
        assert_eq!(config.notes_file, "notes.json");
        assert_eq!(config.currency, "RUB");
        assert_eq!(config.report_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = AideConfig::load(dir.path()).unwrap();
        assert_eq!(config, AideConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("aide");

        let mut config = AideConfig::default();
        config.set("currency", "EUR").unwrap();
        config.set("report-dir", "reports").unwrap();
        config.save(&nested).unwrap();

        let loaded = AideConfig::load(&nested).unwrap();
        assert_eq!(loaded.currency, "EUR");
        assert_eq!(loaded.report_dir(&nested), nested.join("reports"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"currency": "USD"}"#).unwrap();

        let config = AideConfig::load(dir.path()).unwrap();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.tasks_file, "tasks.json");
    }

    #[test]
    fn test_corrupt_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ currency: ").unwrap();

        let mut config = AideConfig::load(dir.path()).unwrap();
        assert_eq!(config, AideConfig::default());

        config.set("currency", "EUR").unwrap();
        config.save(dir.path()).unwrap();
        assert_eq!(AideConfig::load(dir.path()).unwrap().currency, "EUR");
    }

    #[test]
    fn test_set_rejects_unknown_and_empty() {
        let mut config = AideConfig::default();
        assert!(config.set("colour", "red").is_err());
        assert!(config.set("notes-file", "  ").is_err());
        assert_eq!(config.notes_file, "notes.json");
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = AideConfig::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "{key} should be readable");
        }
    }

    #[test]
    fn test_resolve_paths() {
        let config = AideConfig::default();
        let data = Path::new("/data");
        assert_eq!(config.resolve(data, "notes.json"), data.join("notes.json"));
        assert_eq!(config.report_dir(data), data.to_path_buf());
    }
}
