//! Settings builder.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentSettings;
use crate::config::loader::SettingsLoader;
use crate::config::merger::SettingsMerger;
use crate::config::schema::Settings;
use crate::config::validator::SettingsValidator;
use crate::error::Result;

/// Assembles [`Settings`] from every source.
///
/// Precedence, lowest to highest: built-in defaults, the settings file
/// (an explicit [`with_file`](Self::with_file) or `$FSPATH_CONFIG`),
/// `FSPATH_*` environment variables, then [`with_settings`](Self::with_settings).
///
/// # Examples
///
/// ```
/// use fspath::config::{Settings, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_settings(Settings { buffer_size: Some(16384), ..Default::default() })
///     .build()
///     .unwrap();
/// assert_eq!(settings.buffer_size, Some(16384));
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Settings>,
}

impl SettingsBuilder {
    /// A builder reading every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from `path` instead of `$FSPATH_CONFIG`.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Do not read any settings file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not read `FSPATH_*` variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply `settings` on top of every other source.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.overrides = Some(settings);
        self
    }

    /// Merge and validate the configured sources.
    ///
    /// # Errors
    ///
    /// Fails if a settings file cannot be loaded, an environment variable is
    /// malformed, or the merged result is invalid.
    pub fn build(self) -> Result<Settings> {
        let mut sources = Vec::new();

        if !self.skip_files {
            match &self.file {
                Some(path) => sources.push(SettingsLoader::load_file(path)?),
                None => {
                    if let Some(source) = SettingsLoader::load_from_env()? {
                        sources.push(source.settings);
                    }
                }
            }
        }

        let mut settings = SettingsMerger::merge(&sources);

        if !self.skip_env {
            EnvironmentSettings::apply_overrides(&mut settings)?;
        }

        if let Some(overrides) = &self.overrides {
            SettingsMerger::merge_into(&mut settings, overrides);
        }

        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }

    /// [`build`](Self::build), then [`apply`](Settings::apply) the result.
    ///
    /// # Errors
    ///
    /// Fails as [`build`](Self::build) does; nothing is applied on failure.
    pub fn build_and_apply(self) -> Result<Settings> {
        let settings = self.build()?;
        settings.apply();
        Ok(settings)
    }
}
