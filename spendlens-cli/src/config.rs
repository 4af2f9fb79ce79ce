use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use spendlens_core::Locale;
use spendlens_finance::ReportWriter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataSection,
    pub report: ReportSection,
    pub locale: LocaleSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Statement export (.csv, .xlsx, .xls, .ods)
    pub statement: PathBuf,
    /// `user_settings.json` with the followed currencies and stocks
    pub settings: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub enabled: bool,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleSection {
    /// "ru" or "en"
    pub language: String,
    /// IANA name used when no --date is given
    pub timezone: String,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            statement: PathBuf::from("data/operations.csv"),
            settings: PathBuf::from("data/user_settings.json"),
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("."),
        }
    }
}

impl Default for LocaleSection {
    fn default() -> Self {
        Self {
            language: "ru".to_string(),
            timezone: "Europe/Moscow".to_string(),
        }
    }
}

impl Config {
    pub fn locale(&self) -> Result<Locale> {
        match Locale::from_code(&self.locale.language) {
            Some(locale) => Ok(locale),
            None => bail!("unknown language '{}' (use ru or en)", self.locale.language),
        }
    }

    pub fn report_writer(&self) -> ReportWriter {
        if self.report.enabled {
            ReportWriter::new(&self.report.dir)
        } else {
            ReportWriter::disabled()
        }
    }
}

/// Read `path`, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.locale().unwrap(), Locale::russian());
        assert!(cfg.report_writer().is_enabled());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[locale]\nlanguage = \"en\"\n\n[report]\nenabled = false\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.locale().unwrap(), Locale::english());
        assert_eq!(cfg.locale.timezone, "Europe/Moscow");
        assert!(!cfg.report_writer().is_enabled());
        assert_eq!(cfg.data, DataSection::default());
    }

    #[test]
    fn test_init_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        init_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_language() {
        let mut cfg = Config::default();
        cfg.locale.language = "fr".into();
        assert!(cfg.locale().is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[report\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
