//! Capability markers for path entities.
//!
//! A path entity is parameterized by an [`Access`] marker. [`ReadOnly`]
//! entities expose queries, reads and copies into destructive targets;
//! [`Destructive`] entities additionally expose deletes, moves, writes and
//! attribute changes. The marker is zero-sized: both views hold the same
//! canonical string.
//!
//! A destructive view is only obtained by an explicit upgrade:
//!
//! ```
//! use fspath::{FilePath, DestructiveFilePath};
//!
//! let file = FilePath::new("/tmp/report.txt").unwrap();
//! let writable: DestructiveFilePath = file.to_destructive();
//! assert_eq!(writable, file);
//!
//! let back: FilePath = writable.into();
//! assert_eq!(back, file);
//! ```

use std::fmt;

use crate::path::{DirectoryPath, FilePath};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::ReadOnly {}
    impl Sealed for super::Destructive {}
}

/// The capability carried by a path entity.
///
/// This trait is sealed; [`ReadOnly`] and [`Destructive`] are the only
/// implementations.
pub trait Access:
    sealed::Sealed + Copy + Default + fmt::Debug + Send + Sync + Unpin + 'static
{
    /// Prefix used by the entity's `Debug` output.
    const LABEL: &'static str;
}

/// Queries, reads and copies only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReadOnly;

impl Access for ReadOnly {
    const LABEL: &'static str = "";
}

/// Everything [`ReadOnly`] allows plus mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Destructive;

impl Access for Destructive {
    const LABEL: &'static str = "Destructive";
}

/// A file path that permits mutation.
pub type DestructiveFilePath = FilePath<Destructive>;

/// A directory path that permits mutation.
pub type DestructiveDirectoryPath = DirectoryPath<Destructive>;

/// Whether a delete removed something.
///
/// Real failures are reported as errors, never as an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteOutcome {
    /// The entry existed and was removed.
    Deleted,
    /// There was nothing to remove.
    NotFound,
}

impl DeleteOutcome {
    /// Whether the entry was removed by this call.
    #[must_use]
    pub fn was_deleted(self) -> bool {
        self == Self::Deleted
    }
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => write!(f, "deleted"),
            Self::NotFound => write!(f, "not found"),
        }
    }
}
