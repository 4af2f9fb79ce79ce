//! User settings: which currencies and stocks to show on the dashboard.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use spendlens_core::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub user_currencies: Vec<String>,
    pub user_stocks: Vec<String>,
}

impl Settings {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Settings(format!("invalid settings JSON: {e}")))
    }
}

/// Anything that can hand out a fresh copy of the settings
pub trait SettingsSource {
    fn load_settings(&self) -> Result<Settings>;
}

impl SettingsSource for Settings {
    fn load_settings(&self) -> Result<Settings> {
        Ok(self.clone())
    }
}

/// `user_settings.json` on disk, re-read on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSource for JsonSettingsFile {
    fn load_settings(&self) -> Result<Settings> {
        let s = fs::read_to_string(&self.path).map_err(|e| {
            Error::Settings(format!("cannot read {}: {e}", self.path.display()))
        })?;
        Settings::from_json(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let s = Settings::from_json(
            r#"{"user_currencies": ["USD", "EUR"], "user_stocks": ["AAPL", "AMZN", "GOOGL"]}"#,
        )
        .unwrap();
        assert_eq!(s.user_currencies, vec!["USD", "EUR"]);
        assert_eq!(s.user_stocks.len(), 3);
    }

    #[test]
    fn test_missing_key_is_error() {
        assert!(matches!(
            Settings::from_json(r#"{"user_currencies": []}"#),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_settings.json");
        fs::write(&path, r#"{"user_currencies": ["USD"], "user_stocks": []}"#).unwrap();

        let settings = JsonSettingsFile::new(&path).load_settings().unwrap();
        assert_eq!(settings.user_currencies, vec!["USD"]);

        let missing = JsonSettingsFile::new(dir.path().join("nope.json"));
        assert!(matches!(missing.load_settings(), Err(Error::Settings(_))));
    }
}
