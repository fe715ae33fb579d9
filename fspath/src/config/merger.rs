//! Settings merging.

use crate::config::schema::Settings;

/// Merges settings sources by precedence.
///
/// # Examples
///
/// ```
/// use fspath::config::{Settings, SettingsMerger};
///
/// let low = Settings { buffer_size: Some(1024), ..Default::default() };
/// let high = Settings { buffer_size: Some(8192), ..Default::default() };
///
/// let mut result = low;
/// SettingsMerger::merge_into(&mut result, &high);
/// assert_eq!(result.buffer_size, Some(8192));
/// ```
pub struct SettingsMerger;

impl SettingsMerger {
    /// Merge `sources`, given from lowest to highest precedence.
    #[must_use]
    pub fn merge<'a>(sources: impl IntoIterator<Item = &'a Settings>) -> Settings {
        let mut result = Settings::default();
        for source in sources {
            Self::merge_into(&mut result, source);
        }
        result
    }

    /// Overwrite each field of `target` that `source` sets.
    pub fn merge_into(target: &mut Settings, source: &Settings) {
        if source.comparison.is_some() {
            target.comparison = source.comparison;
        }

        if source.encoding.is_some() {
            target.encoding = source.encoding;
        }

        if source.buffer_size.is_some() {
            target.buffer_size = source.buffer_size;
        }

        if source.log_mode.is_some() {
            target.log_mode = source.log_mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::ComparisonKind;
    use crate::encoding::TextEncoding;

    #[test]
    fn test_unset_fields_do_not_overwrite() {
        let mut target = Settings {
            comparison: Some(ComparisonKind::CaseSensitive),
            buffer_size: Some(10),
            ..Settings::default()
        };
        let source = Settings {
            encoding: Some(TextEncoding::Utf8Lossy),
            ..Settings::default()
        };

        SettingsMerger::merge_into(&mut target, &source);
        assert_eq!(target.comparison, Some(ComparisonKind::CaseSensitive));
        assert_eq!(target.buffer_size, Some(10));
        assert_eq!(target.encoding, Some(TextEncoding::Utf8Lossy));
    }

    #[test]
    fn test_later_sources_win() {
        let sources = [
            Settings {
                buffer_size: Some(1),
                comparison: Some(ComparisonKind::CaseSensitive),
                ..Settings::default()
            },
            Settings {
                buffer_size: Some(2),
                ..Settings::default()
            },
        ];
        let merged = SettingsMerger::merge(&sources);
        assert_eq!(merged.buffer_size, Some(2));
        assert_eq!(merged.comparison, Some(ComparisonKind::CaseSensitive));
    }

    #[test]
    fn test_merge_nothing_is_default() {
        assert_eq!(SettingsMerger::merge([]), Settings::default());
    }
}
