//! Settings validation.

use crate::config::schema::Settings;
use crate::error::{Error, Result};

/// Validates merged settings.
///
/// # Examples
///
/// ```
/// use fspath::config::{Settings, SettingsValidator};
///
/// SettingsValidator::validate(&Settings::default()).unwrap();
///
/// let bad = Settings { buffer_size: Some(0), ..Default::default() };
/// assert!(SettingsValidator::validate(&bad).is_err());
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Check every set field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `buffer_size` is zero.
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.buffer_size == Some(0) {
            return Err(Error::Validation {
                field: "buffer_size".into(),
                message: "buffer size must be greater than 0".into(),
            });
        }
        Ok(())
    }
}
