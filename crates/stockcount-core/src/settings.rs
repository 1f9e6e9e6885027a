use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use stockcount_parser::parse_timezone;

use crate::error::Result;
use crate::outputs::DEFAULT_SHEET_NAME;

pub const DEFAULT_TIMEZONE: &str = "America/Bogota";

pub const TIMEZONE_ENV: &str = "STOCKCOUNT_TIMEZONE";
pub const SHEET_NAME_ENV: &str = "STOCKCOUNT_SHEET_NAME";

/// Per-export configuration. Every timestamp in one export is normalized into `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// IANA identifier, e.g. `America/Bogota`.
    pub timezone: String,
    pub sheet_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the optional settings file, then applies `STOCKCOUNT_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn with_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            timezone: lookup(TIMEZONE_ENV).unwrap_or(self.timezone),
            sheet_name: lookup(SHEET_NAME_ENV).unwrap_or(self.sheet_name),
        }
    }

    pub fn resolve_timezone(&self) -> Result<Tz> {
        Ok(parse_timezone(&self.timezone)?)
    }
}
