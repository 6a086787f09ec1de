//! Picker configuration read from a TOML file:
//!
//! ```toml
//! year-select-from = 2015
//! year-select-to = 2035
//!
//! [[ranges]]
//! label = "Q1"
//! start = "2025-01-01"
//! end = "2025-03-31"
//! ```
//!
//! Range endpoints are either `YYYY-MM-DD` or `YYYY-MM-DD HH:MM[:SS]`.
use crate::dates::parse_date;
use crate::picker::PickerOptions;
use crate::selection::PredefinedRange;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, PrimitiveDateTime};

static DATETIME_FMT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

static DATETIME_SECS_FMT: &[FormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub year_select_from: Option<i32>,
    pub year_select_to: Option<i32>,
    #[serde(default)]
    pub ranges: Vec<RangeConfig>,
}

impl Config {
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid configuration.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Config::from_toml(&src).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        log::debug!(
            "Loaded configuration from {} with {} predefined range(s)",
            path.display(),
            config.ranges.len()
        );
        Ok(config)
    }

    /// # Errors
    ///
    /// Fails if `src` is not valid TOML or does not match the configuration
    /// schema.
    pub fn from_toml(src: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(src)
    }

    /// # Errors
    ///
    /// Fails if a range endpoint cannot be parsed.
    pub fn into_options(self) -> Result<PickerOptions, ConfigError> {
        let mut options = PickerOptions::new();
        if let Some(year) = self.year_select_from {
            options = options.year_select_from(year);
        }
        if let Some(year) = self.year_select_to {
            options = options.year_select_to(year);
        }
        for range in self.ranges {
            options = options.predefined_range(range.into_range()?);
        }
        Ok(options)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub label: String,
    pub start: String,
    pub end: String,
}

impl RangeConfig {
    /// # Errors
    ///
    /// Fails if either endpoint cannot be parsed.
    pub fn into_range(self) -> Result<PredefinedRange, ConfigError> {
        let start = parse_endpoint(&self.start)?;
        let end = parse_endpoint(&self.end)?;
        Ok(PredefinedRange::new(self.label, start, end))
    }
}

/// Parse a range endpoint.  A bare date is taken to be midnight.
///
/// # Errors
///
/// Fails if `s` is neither `YYYY-MM-DD` nor `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_endpoint(s: &str) -> Result<PrimitiveDateTime, ConfigError> {
    let s = s.trim();
    if let Ok(date) = parse_date(s) {
        return Ok(date.midnight());
    }
    PrimitiveDateTime::parse(s, &DATETIME_FMT)
        .or_else(|_| PrimitiveDateTime::parse(s, &DATETIME_SECS_FMT))
        .map_err(|source| ConfigError::Date {
            value: s.to_owned(),
            source,
        })
}

/// Parse a predefined range given on the command line as
/// `LABEL=START~END`
///
/// # Errors
///
/// Fails if the argument is not of that form or an endpoint cannot be
/// parsed.
pub fn parse_range_arg(s: &str) -> Result<PredefinedRange, ConfigError> {
    let syntax_error = || ConfigError::RangeSyntax(s.to_owned());
    let (label, dates) = s.split_once('=').ok_or_else(syntax_error)?;
    let (start, end) = dates.split_once('~').ok_or_else(syntax_error)?;
    let label = label.trim();
    if label.is_empty() {
        return Err(syntax_error());
    }
    Ok(PredefinedRange::new(
        label,
        parse_endpoint(start)?,
        parse_endpoint(end)?,
    ))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid date or time: {value:?}")]
    Date {
        value: String,
        source: time::error::Parse,
    },
    #[error("invalid range {0:?}; expected LABEL=START~END")]
    RangeSyntax(String),
}
