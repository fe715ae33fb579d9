//! Settings file loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::environment::CONFIG_ENV;
use crate::config::schema::Settings;
use crate::error::{Error, Result};

/// A parsed settings file.
#[derive(Debug, Clone)]
pub struct SettingsSource {
    /// Where the settings were read from.
    pub path: PathBuf,
    /// The parsed settings.
    pub settings: Settings,
}

/// Loads YAML settings files.
///
/// # Examples
///
/// ```no_run
/// use fspath::config::SettingsLoader;
/// use std::path::Path;
///
/// let settings = SettingsLoader::load_file(Path::new("fspath.yaml")).unwrap();
/// println!("{settings:?}");
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load and parse a YAML settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings
    /// YAML.
    pub fn load_file(path: &Path) -> Result<Settings> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::from_io(path.display().to_string(), e))?;
        log::debug!("loading settings from {}", path.display());
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Load the file named by `$FSPATH_CONFIG`, if the variable is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable names a file that cannot be read or
    /// parsed.
    pub fn load_from_env() -> Result<Option<SettingsSource>> {
        let Some(path) = env::var_os(CONFIG_ENV) else {
            return Ok(None);
        };
        let path = PathBuf::from(path);
        let settings = Self::load_file(&path)?;
        Ok(Some(SettingsSource { path, settings }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::ComparisonKind;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = SettingsLoader::load_file(Path::new("/nonexistent/path/fspath.yaml"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "invalid: yaml: syntax:").unwrap();

        assert!(matches!(
            SettingsLoader::load_file(&path),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fspath.yaml");
        fs::write(&path, "comparison: case-sensitive\n").unwrap();

        let settings = SettingsLoader::load_file(&path).unwrap();
        assert_eq!(settings.comparison, Some(ComparisonKind::CaseSensitive));
    }

    #[test]
    #[serial]
    fn test_load_from_env() {
        env::remove_var(CONFIG_ENV);
        assert!(SettingsLoader::load_from_env().unwrap().is_none());

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("env.yaml");
        fs::write(&path, "buffer_size: 1024\n").unwrap();
        env::set_var(CONFIG_ENV, &path);
        let source = SettingsLoader::load_from_env();
        env::remove_var(CONFIG_ENV);

        let source = source.unwrap().unwrap();
        assert_eq!(source.path, path);
        assert_eq!(source.settings.buffer_size, Some(1024));
    }
}
