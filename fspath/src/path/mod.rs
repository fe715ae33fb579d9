//! Typed file and directory paths.
//!
//! # Key Concepts
//!
//! ## Normalization
//!
//! Every entity holds one canonical string, produced by
//! [`normalize`](normalize::normalize):
//! - Relative input is resolved against the working directory
//! - `.` and `..` segments are resolved lexically, clamping at the root
//! - Alternate separators become the platform separator
//! - Trailing separators are removed except on a root
//!
//! Normalization never touches the filesystem and never follows symlinks.
//! Paths derived from an entity (parents, children, enumeration results) are
//! built from canonical parts and are not normalized again.
//!
//! ## Kinds
//!
//! [`FilePath`] and [`DirectoryPath`] are distinct types even when their
//! strings are equal; a file and a directory never compare equal.
//!
//! ## Relationships
//!
//! ```
//! # #[cfg(unix)] {
//! use fspath::path::PathRelationship;
//! use fspath::Comparer;
//!
//! let rel = PathRelationship::between("/home/user", "/home/user/project", &Comparer::case_sensitive());
//! assert_eq!(rel, PathRelationship::Ancestor);
//! # }
//! ```

mod directory;
mod entity;
mod file;
pub mod normalize;
pub mod relationship;
pub(crate) mod segments;

#[cfg(windows)]
pub(crate) const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub(crate) const LINE_ENDING: &str = "\n";

#[cfg(all(test, unix, feature = "property-tests"))]
mod proptests;

pub use directory::{DirectoryPath, PathEntry};
pub use entity::{Ancestors, FileSystemPath};
pub use file::FilePath;
pub use relationship::PathRelationship;
pub use segments::is_separator;
