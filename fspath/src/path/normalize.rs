//! Path normalization functions.
//!
//! Normalization turns a raw, user-supplied string into the canonical form
//! stored inside every path entity:
//! - Trailing separators are trimmed (the root keeps exactly one)
//! - Both `/` and `\` are accepted and rewritten to the platform separator
//! - Relative paths are resolved against the current directory
//! - `.` and `..` components are resolved lexically
//!
//! Symlinks are never followed; the result names the same location the OS
//! would reach by resolving the string, not the target of any link.

use std::path::{self, Component, Path, PathBuf};

use super::segments::{is_separator, ALT_SEPARATOR, SEPARATOR, VOLUME_SEPARATOR};
use crate::error::{Error, Result};

/// Trim trailing separators while keeping root intent.
///
/// An input made only of separators becomes a single separator. On platforms
/// with a volume separator, `C:/` keeps its separator because `C:` alone
/// means "the current directory on C".
///
/// # Examples
///
/// ```
/// use fspath::path::normalize::trim_trailing_separators;
///
/// assert_eq!(trim_trailing_separators("foo/bar/\\/"), "foo/bar");
/// assert_eq!(trim_trailing_separators("///"), std::path::MAIN_SEPARATOR.to_string());
/// ```
#[must_use]
pub fn trim_trailing_separators(raw: &str) -> String {
    let trimmed = raw.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return SEPARATOR.to_string();
    }
    if trimmed.len() != raw.len() && VOLUME_SEPARATOR.is_some_and(|v| trimmed.ends_with(v)) {
        return format!("{trimmed}{SEPARATOR}");
    }
    trimmed.to_string()
}

/// Resolve `.` and `..` components in an absolute path.
///
/// A `..` at the root stays at the root, matching how the OS resolves full
/// paths.
///
/// # Examples
///
/// ```
/// use fspath::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/a/./b/../c"));
/// assert_eq!(resolved, PathBuf::from("/a/c"));
///
/// let resolved = resolve_components(Path::new("/a/../../c"));
/// assert_eq!(resolved, PathBuf::from("/c"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => result.push(component.as_os_str()),
            Component::Normal(c) => result.push(c),
            Component::CurDir => {}
            Component::ParentDir => {
                // No-op at the root.
                result.pop();
            }
        }
    }

    result
}

/// Normalize a raw path string to its canonical absolute form.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if:
/// - `raw` is empty or contains a NUL character
/// - The current directory cannot be determined
/// - The resolved path is not valid UTF-8
///
/// # Examples
///
/// ```
/// # #[cfg(unix)] {
/// use fspath::path::normalize::normalize;
///
/// assert_eq!(normalize("/a/./b/../c/").unwrap(), "/a/c");
/// assert_eq!(normalize("/").unwrap(), "/");
/// assert!(normalize("").is_err());
/// # }
/// ```
pub fn normalize(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::invalid_path(raw, "path is empty"));
    }
    if raw.contains('\0') {
        return Err(Error::invalid_path(raw, "path contains a NUL character"));
    }

    let trimmed = trim_trailing_separators(raw).replace(ALT_SEPARATOR, &SEPARATOR.to_string());
    let absolute = path::absolute(&trimmed).map_err(|e| {
        Error::invalid_path(raw, format!("cannot resolve against current directory: {e}"))
    })?;

    let canonical = resolve_components(&absolute)
        .into_os_string()
        .into_string()
        .map_err(|_| Error::invalid_path(raw, "path is not valid UTF-8"))?;

    log::trace!("normalized '{raw}' to '{canonical}'");
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn cwd_string() -> String {
        env::current_dir().unwrap().to_str().unwrap().to_string()
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(matches!(normalize(""), Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_nul_is_rejected() {
        assert!(normalize("a\0b").is_err());
    }

    #[test]
    fn test_trim_keeps_single_root() {
        assert_eq!(trim_trailing_separators("/"), SEPARATOR.to_string());
        assert_eq!(trim_trailing_separators("\\/\\"), SEPARATOR.to_string());
        assert_eq!(trim_trailing_separators("a/b"), "a/b");
    }

    #[test]
    #[cfg(windows)]
    fn test_trim_keeps_drive_root() {
        assert_eq!(trim_trailing_separators("C:/"), "C:\\");
        assert_eq!(trim_trailing_separators("C:"), "C:");
    }

    #[test]
    #[cfg(unix)]
    fn test_normalize_absolute() {
        assert_eq!(normalize("/a/./b/../c").unwrap(), "/a/c");
        assert_eq!(normalize("///").unwrap(), "/");
        assert_eq!(normalize("/..").unwrap(), "/");
    }

    #[test]
    #[serial]
    fn test_relative_path_uses_current_directory() {
        let expected = format!("{}{SEPARATOR}test", cwd_string());
        assert_eq!(normalize("test").unwrap(), expected);
    }

    #[test]
    #[serial]
    fn test_mixed_separators_are_normalized() {
        let expected = format!(
            "{}{SEPARATOR}foo{SEPARATOR}bar{SEPARATOR}baz",
            cwd_string()
        );
        assert_eq!(normalize("foo/bar\\baz").unwrap(), expected);
        assert_eq!(normalize("foo/bar\\baz/\\/").unwrap(), expected);
    }

    #[test]
    #[serial]
    fn test_normalize_current_dir() {
        assert_eq!(normalize(".").unwrap(), cwd_string());
    }

    // Property-based tests
    #[cfg(unix)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn raw_path_strategy() -> impl Strategy<Value = String> {
            (
                prop::bool::ANY,
                prop::collection::vec(
                    prop_oneof![
                        Just(".".to_string()),
                        Just("..".to_string()),
                        "[a-zA-Z0-9_.-]{1,10}",
                    ],
                    0..=6,
                ),
                "[/\\\\]{0,3}",
            )
                .prop_map(|(absolute, parts, trailing)| {
                    let body = parts.join("/");
                    let lead = if absolute || body.is_empty() { "/" } else { "" };
                    format!("{lead}{body}{trailing}")
                })
        }

        proptest! {
            /// Normalization is idempotent
            #[test]
            fn normalize_idempotent(raw in raw_path_strategy()) {
                let once = normalize(&raw).unwrap();
                let twice = normalize(&once).unwrap();
                prop_assert_eq!(once, twice);
            }

            /// Only a root keeps a trailing separator
            #[test]
            fn normalize_no_trailing_separator(raw in raw_path_strategy()) {
                let normalized = normalize(&raw).unwrap();
                prop_assert!(normalized == "/" || !normalized.ends_with('/'));
                prop_assert!(Path::new(&normalized).is_absolute());
            }

            /// Normalized paths have no `.` or `..` components
            #[test]
            fn normalize_no_dot_components(raw in raw_path_strategy()) {
                let normalized = normalize(&raw).unwrap();
                for component in Path::new(&normalized).components() {
                    prop_assert_ne!(component, Component::CurDir);
                    prop_assert_ne!(component, Component::ParentDir);
                }
            }
        }
    }
}
