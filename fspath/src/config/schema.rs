//! Settings schema.

use serde::{Deserialize, Serialize};

use crate::comparer::{Comparer, ComparisonKind};
use crate::encoding::TextEncoding;
use crate::fs::set_buffer_size;
use crate::logging::LogLevel;

/// Library-wide defaults.
///
/// Every field is optional so partial sources can be merged; unset fields
/// keep their built-in default when the settings are applied.
///
/// # Examples
///
/// ```
/// use fspath::config::Settings;
/// use fspath::ComparisonKind;
///
/// let settings: Settings = serde_yaml::from_str("comparison: case-sensitive\n").unwrap();
/// assert_eq!(settings.comparison, Some(ComparisonKind::CaseSensitive));
/// assert!(settings.encoding.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Fallback comparison policy.
    pub comparison: Option<ComparisonKind>,

    /// Fallback text encoding.
    pub encoding: Option<TextEncoding>,

    /// Buffer size for stream readers and writers, in bytes.
    pub buffer_size: Option<usize>,

    /// Maximum level passed to the installed logger.
    pub log_mode: Option<LogLevel>,
}

impl Settings {
    /// Make these settings the process-wide defaults.
    ///
    /// Sets the fallback of the ambient comparer and encoding states and the
    /// stream buffer size. Active layers keep taking precedence.
    pub fn apply(&self) {
        if let Some(kind) = self.comparison {
            Comparer::state().set_fallback(Comparer::for_kind(kind));
        }
        if let Some(encoding) = self.encoding {
            TextEncoding::state().set_fallback(encoding);
        }
        if let Some(size) = self.buffer_size {
            set_buffer_size(size);
        }
        if let Some(level) = self.log_mode {
            log::set_max_level(level.filter());
        }
        log::debug!("applied settings: {self:?}");
    }
}
