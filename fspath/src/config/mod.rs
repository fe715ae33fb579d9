//! Process-wide defaults.
//!
//! Settings choose the fallback comparison policy and text encoding, the
//! stream buffer size, and the log level. They are merged from several
//! sources, highest precedence first:
//!
//! 1. Programmatic overrides (via `SettingsBuilder::with_settings`)
//! 2. Environment variables (`FSPATH_*`)
//! 3. A YAML settings file (`SettingsBuilder::with_file` or `$FSPATH_CONFIG`)
//! 4. Built-in defaults
//!
//! Building settings has no effect by itself; call [`Settings::apply`] to
//! install them. Scoped overrides made with
//! [`Comparer::begin_default`](crate::Comparer::begin_default) and friends
//! still take precedence over applied settings.
//!
//! # Examples
//!
//! ```no_run
//! use fspath::config::SettingsBuilder;
//!
//! let settings = SettingsBuilder::new()
//!     .with_file("fspath.yaml")
//!     .build_and_apply()
//!     .unwrap();
//! println!("comparison: {:?}", settings.comparison);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::SettingsBuilder;
pub use environment::EnvironmentSettings;
pub use loader::{SettingsLoader, SettingsSource};
pub use merger::SettingsMerger;
pub use schema::Settings;
pub use validator::SettingsValidator;
