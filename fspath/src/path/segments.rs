//! String-level helpers over canonical paths.
//!
//! Every function here assumes its input was produced by
//! [`normalize`](super::normalize::normalize): absolute, separated only by
//! [`SEPARATOR`], with no trailing separator except at a root. They never touch
//! the filesystem.

use std::path::{Path, MAIN_SEPARATOR};

/// The primary path separator of the host platform.
pub const SEPARATOR: char = MAIN_SEPARATOR;

/// The alternate separator, accepted in raw input and rewritten to [`SEPARATOR`].
pub const ALT_SEPARATOR: char = if MAIN_SEPARATOR == '/' { '\\' } else { '/' };

/// The character that ends a volume name (`C:`), if the platform has one.
#[cfg(windows)]
pub const VOLUME_SEPARATOR: Option<char> = Some(':');

/// The character that ends a volume name (`C:`), if the platform has one.
#[cfg(not(windows))]
pub const VOLUME_SEPARATOR: Option<char> = None;

/// Whether `c` is either the primary or the alternate separator.
#[must_use]
pub fn is_separator(c: char) -> bool {
    c == SEPARATOR || c == ALT_SEPARATOR
}

/// Byte length of the root prefix (`/`, `C:\`, `\\server\share\`).
pub(crate) fn root_len(path: &str) -> usize {
    Path::new(path)
        .ancestors()
        .last()
        .map_or(0, |root| root.as_os_str().len())
}

pub(crate) fn is_root(path: &str) -> bool {
    root_len(path) >= path.len()
}

pub(crate) fn root(path: &str) -> &str {
    &path[..root_len(path)]
}

/// The path one segment up, or `None` at a root.
pub(crate) fn parent(path: &str) -> Option<&str> {
    let root = root_len(path);
    if root >= path.len() {
        return None;
    }
    match path[root..].rfind(is_separator) {
        Some(idx) => Some(&path[..root + idx]),
        None => Some(&path[..root]),
    }
}

/// Successive parents of `path`, nearest first, ending with the root.
pub(crate) fn parents(path: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(parent(path), |current| parent(current))
}

/// The final segment; empty at a root.
pub(crate) fn file_name(path: &str) -> &str {
    let tail = &path[root_len(path)..];
    tail.rfind(is_separator).map_or(tail, |idx| &tail[idx + 1..])
}

/// Extension of a name including the leading dot.
///
/// Empty when there is no dot or the name ends with one.
pub(crate) fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

pub(crate) fn name_without_extension(name: &str) -> &str {
    name.rfind('.').map_or(name, |idx| &name[..idx])
}

/// Replace the extension of the final segment of `path`.
///
/// Leading dots of `ext` are ignored; an empty remainder removes the extension.
/// A removal that would leave the name empty or all dots (`.bashrc`, `..x`)
/// returns `path` unchanged.
pub(crate) fn change_extension(path: &str, ext: &str) -> String {
    let name_start = path.len() - file_name(path).len();
    let base = match path[name_start..].rfind('.') {
        Some(idx) => &path[..name_start + idx],
        None => path,
    };
    let ext = ext.trim_start_matches('.');
    if !ext.is_empty() {
        return format!("{base}.{ext}");
    }
    if base[name_start..].chars().all(|c| c == '.') {
        path.to_string()
    } else {
        base.to_string()
    }
}

/// Join `relative` onto a canonical `base` without consulting the OS.
///
/// Returns `None` when `relative` is rooted or contains `.`/`..` or volume
/// segments; such input must go through full normalization instead.
pub(crate) fn join(base: &str, relative: &str) -> Option<String> {
    if relative.starts_with(is_separator) || Path::new(relative).has_root() {
        return None;
    }
    let mut joined = String::with_capacity(base.len() + relative.len() + 1);
    joined.push_str(base);
    let mut any = false;
    for segment in relative.split(is_separator).filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains('\0') {
            return None;
        }
        if VOLUME_SEPARATOR.is_some_and(|v| segment.contains(v)) {
            return None;
        }
        if !joined.ends_with(SEPARATOR) {
            joined.push(SEPARATOR);
        }
        joined.push_str(segment);
        any = true;
    }
    any.then_some(joined)
}
