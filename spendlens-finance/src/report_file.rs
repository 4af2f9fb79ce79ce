//! Optional persistence of report results as text files.
//!
//! Wrap an aggregator call with [`ReportWriter::record`] to save its rendering
//! to `report_<function>_<YYYYMMDD>.txt`. Write failures are logged and never
//! reach the caller.

use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

use spendlens_core::Result;

use crate::render::Render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWriter {
    enabled: bool,
    dir: PathBuf,
    file_name: Option<String>,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::disabled()
    }
}

impl ReportWriter {
    /// Write reports into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            dir: dir.into(),
            file_name: None,
        }
    }

    /// A writer that never touches the filesystem.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from("."),
            file_name: None,
        }
    }

    /// Use a fixed file name instead of the dated default.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a report of `function` produced on `day`.
    pub fn path_for(&self, function: &str, day: NaiveDate) -> PathBuf {
        let name = match &self.file_name {
            Some(name) => name.clone(),
            None => format!("report_{}_{}.txt", function, day.format("%Y%m%d")),
        };
        self.dir.join(name)
    }

    /// Run `f` and, on success, save its rendering. Errors from `f` pass through untouched.
    pub fn record<T, F>(&self, function: &str, f: F) -> Result<T>
    where
        T: Render,
        F: FnOnce() -> Result<T>,
    {
        let value = f()?;
        self.save(function, &value);
        Ok(value)
    }

    /// Save a rendering now. Returns the written path, or `None` when
    /// disabled or the write failed.
    pub fn save<T: Render + ?Sized>(&self, function: &str, value: &T) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        let path = self.path_for(function, Local::now().date_naive());
        match fs::write(&path, value.render()) {
            Ok(()) => {
                log::info!("saved {function} report to {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::warn!("could not save report to {}: {e}", path.display());
                None
            }
        }
    }
}
