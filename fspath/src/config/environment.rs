//! Environment variable overrides.
//!
//! `FSPATH_*` variables override values loaded from files.

use std::env;

use crate::comparer::ComparisonKind;
use crate::config::schema::Settings;
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::logging::{LogLevel, LOG_MODE_ENV};

/// Overrides the comparison policy.
pub const COMPARISON_ENV: &str = "FSPATH_COMPARISON";
/// Overrides the text encoding.
pub const ENCODING_ENV: &str = "FSPATH_ENCODING";
/// Overrides the stream buffer size.
pub const BUFFER_SIZE_ENV: &str = "FSPATH_BUFFER_SIZE";
/// Names a YAML settings file to load.
pub const CONFIG_ENV: &str = "FSPATH_CONFIG";

/// Reads `FSPATH_*` overrides.
///
/// # Examples
///
/// ```no_run
/// use fspath::config::{EnvironmentSettings, Settings};
///
/// let mut settings = Settings::default();
/// EnvironmentSettings::apply_overrides(&mut settings).unwrap();
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Apply every set `FSPATH_*` variable to `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable if a value cannot
    /// be parsed.
    pub fn apply_overrides(settings: &mut Settings) -> Result<()> {
        if let Ok(value) = env::var(COMPARISON_ENV) {
            settings.comparison = Some(parse(COMPARISON_ENV, &value, ComparisonKind::parse)?);
        }

        if let Ok(value) = env::var(ENCODING_ENV) {
            settings.encoding = Some(parse(ENCODING_ENV, &value, TextEncoding::parse)?);
        }

        if let Ok(value) = env::var(BUFFER_SIZE_ENV) {
            let size = value.trim().parse().map_err(|_| Error::Validation {
                field: BUFFER_SIZE_ENV.into(),
                message: format!("must be a positive integer, got {value:?}"),
            })?;
            settings.buffer_size = Some(size);
        }

        if let Ok(value) = env::var(LOG_MODE_ENV) {
            settings.log_mode = Some(parse(LOG_MODE_ENV, &value, LogLevel::parse)?);
        }

        Ok(())
    }
}

fn parse<T>(
    field: &str,
    value: &str,
    parser: impl FnOnce(&str) -> std::result::Result<T, String>,
) -> Result<T> {
    parser(value.trim()).map_err(|message| Error::Validation {
        field: field.into(),
        message,
    })
}
