#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # fspath
//!
//! Typed, normalized filesystem paths.
//!
//! Paths are values: a [`FilePath`] or [`DirectoryPath`] holds one canonical
//! absolute string, compares and hashes by it, and never changes. Filesystem
//! access happens only when an operation asks for it, through the
//! [`FileSystem`](fs::FileSystem) boundary.
//!
//! ## Core Types
//!
//! - [`FilePath`] and [`DirectoryPath`]: Normalized path entities
//! - [`Destructive`] views: The only way to delete, move or write
//! - [`Comparer`]: Case-sensitive or case-insensitive path comparison
//! - [`LayeredState`]: Scoped defaults that follow async tasks
//! - [`TextReader`] and [`TextWriter`]: Text streams in a [`TextEncoding`]
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use fspath::prelude::*;
//!
//! let dir = DirectoryPath::new("/projects/app").unwrap();
//! let main = dir.child_file("src/main.rs").unwrap();
//! assert_eq!(main.extension(), ".rs");
//! assert!(main.is_descendant_of(&dir));
//!
//! // Comparisons follow the ambient comparer, case-insensitive by default.
//! assert!(main.equals(&FilePath::new("/PROJECTS/app/src/MAIN.rs").unwrap()));
//! {
//!     let _exact = Comparer::case_sensitive().begin_default();
//!     assert!(!main.equals(&FilePath::new("/PROJECTS/app/src/MAIN.rs").unwrap()));
//! }
//! ```

pub mod access;
pub mod ambient;
pub mod comparer;
pub mod config;
pub mod encoding;
pub mod enumerate;
pub mod error;
pub mod fs;
pub mod logging;
pub mod path;
pub mod text;

// Re-export key types at crate root for convenience
pub use access::{
    Access, DeleteOutcome, Destructive, DestructiveDirectoryPath, DestructiveFilePath, ReadOnly,
};
pub use ambient::{AmbientContext, LayerGuard, LayeredState};
pub use comparer::{Comparer, ComparisonKind, PathComparer, PathKey};
pub use config::{Settings, SettingsBuilder};
pub use encoding::TextEncoding;
pub use enumerate::{Entries, EntryStream, SafeWalk};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{DirectoryPath, FilePath, FileSystemPath, PathEntry, PathRelationship};
pub use text::{TextLines, TextReader, TextWriter};

/// The types most code needs, for glob import.
pub mod prelude {
    pub use crate::access::{DeleteOutcome, DestructiveDirectoryPath, DestructiveFilePath};
    pub use crate::comparer::Comparer;
    pub use crate::encoding::TextEncoding;
    pub use crate::path::{DirectoryPath, FilePath, FileSystemPath, PathEntry};
}
