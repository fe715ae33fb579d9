//! Error types for the fspath library.
//!
//! This module provides the error hierarchy for all path operations, using
//! `thiserror` for ergonomic error handling. Normalization and comparison only
//! fail on malformed input; filesystem failures carry the path they concern.

use std::io;

use thiserror::Error;

/// Result type alias for operations that may fail with an fspath error.
///
/// # Examples
///
/// ```
/// use fspath::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/tmp".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the fspath library.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw path could not be turned into a canonical path.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The rejected input.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },

    /// The parent of a filesystem root was requested.
    #[error("root directory does not have a parent: {path}")]
    NoParent {
        /// The root path.
        path: String,
    },

    /// An operation required an entry that does not exist.
    #[error("path not found: {path}")]
    NotFound {
        /// The missing path.
        path: String,
    },

    /// An operation required an entry to be absent.
    #[error("path already exists: {path}")]
    AlreadyExists {
        /// The conflicting path.
        path: String,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be accessed.
        path: String,
    },

    /// A non-recursive directory delete hit a directory with entries.
    #[error("directory is not empty: {path}")]
    DirectoryNotEmpty {
        /// The directory that still has entries.
        path: String,
    },

    /// An I/O error reported by the filesystem.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The path the operation was applied to.
        path: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// File content could not be decoded with the requested encoding.
    #[error("cannot decode {path}: {reason}")]
    Encoding {
        /// The file being decoded.
        path: String,
        /// Details about the decoding failure.
        reason: String,
    },

    /// An enumeration or stream was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// A settings file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A settings value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Map an I/O error for `path` onto the matching variant.
    ///
    /// `NotFound`, `AlreadyExists` and `PermissionDenied` get their own
    /// variants; everything else is wrapped as [`Error::Io`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::Error;
    /// use std::io;
    ///
    /// let err = Error::from_io("/missing", io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn from_io(path: impl Into<String>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::DirectoryNotEmpty => Self::DirectoryNotEmpty { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::Error;
    ///
    /// let err = Error::NotFound { path: "/nonexistent".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::Error;
    ///
    /// let err = Error::PermissionDenied { path: "/restricted".into() };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
