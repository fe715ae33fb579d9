//! Behavior shared by file and directory paths.

use std::io;
use std::iter::FusedIterator;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use super::relationship::{self, PathRelationship};
use super::segments;
use super::{DirectoryPath, FilePath};
use crate::access::Access;
use crate::comparer::Comparer;
use crate::error::{Error, Result};
use crate::fs::{EntryKind, EntryMetadata, FileAttributes, FileSystem, OsFileSystem};

pub(crate) mod sealed {
    pub trait Sealed {}

    impl<A: crate::access::Access> Sealed for crate::path::FilePath<A> {}
    impl<A: crate::access::Access> Sealed for crate::path::DirectoryPath<A> {}
    impl<A: crate::access::Access> Sealed for crate::path::PathEntry<A> {}
}

/// Maps an I/O error for `path` onto [`Error`].
pub(crate) fn io_at(path: &str) -> impl FnOnce(io::Error) -> Error + '_ {
    move |err| Error::from_io(path, err)
}

/// Queries common to [`FilePath`] and [`DirectoryPath`].
///
/// Methods without a comparer argument resolve one through
/// [`Comparer::ambient_for`] with this entity's path. Methods ending in `_on`
/// use the given [`FileSystem`]; the others use [`OsFileSystem`].
///
/// This trait is sealed.
pub trait FileSystemPath: sealed::Sealed {
    /// The canonical absolute path.
    fn full_name(&self) -> &str;

    /// Whether this entity denotes a file or a directory.
    fn kind(&self) -> EntryKind;

    /// The canonical path as a [`Path`].
    fn as_path(&self) -> &Path {
        Path::new(self.full_name())
    }

    /// The final segment; empty at a root.
    fn name(&self) -> &str {
        segments::file_name(self.full_name())
    }

    /// The final segment without its extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::prelude::*;
    ///
    /// let file = FilePath::new("foo/bar.baz.qux").unwrap();
    /// assert_eq!(file.name_without_extension(), "bar.baz");
    /// assert_eq!(file.extension(), ".qux");
    /// ```
    fn name_without_extension(&self) -> &str {
        segments::name_without_extension(self.name())
    }

    /// The extension including its leading dot; empty if there is none or
    /// the name ends with a dot.
    fn extension(&self) -> &str {
        segments::extension(self.name())
    }

    /// The comparer that applies to this entity right now.
    fn comparer(&self) -> Comparer {
        Comparer::ambient_for(self.full_name())
    }

    /// Whether the extension equals `extension`, ignoring leading dots.
    fn extension_equals(&self, extension: &str) -> bool {
        self.extension_equals_with(extension, &self.comparer())
    }

    /// [`extension_equals`](Self::extension_equals) under `comparer`.
    fn extension_equals_with(&self, extension: &str, comparer: &Comparer) -> bool {
        comparer.equals(
            self.extension().trim_start_matches('.'),
            extension.trim_start_matches('.'),
        )
    }

    /// Whether the name matches the glob `pattern`.
    fn name_matches(&self, pattern: &str) -> bool {
        self.name_matches_with(pattern, &self.comparer())
    }

    /// [`name_matches`](Self::name_matches) under `comparer`.
    fn name_matches_with(&self, pattern: &str, comparer: &Comparer) -> bool {
        comparer.matches(self.name(), pattern)
    }

    /// Whether the extension matches the glob `pattern`.
    ///
    /// Leading dots are ignored on both sides, so `"t?t"` and `".t?t"` both
    /// match `.txt`.
    fn extension_matches(&self, pattern: &str) -> bool {
        self.extension_matches_with(pattern, &self.comparer())
    }

    /// [`extension_matches`](Self::extension_matches) under `comparer`.
    fn extension_matches_with(&self, pattern: &str, comparer: &Comparer) -> bool {
        comparer.matches(
            self.extension().trim_start_matches('.'),
            pattern.trim_start_matches('.'),
        )
    }

    /// Whether the full path matches the glob `pattern`.
    ///
    /// `*` also matches separators.
    fn full_name_matches(&self, pattern: &str) -> bool {
        self.full_name_matches_with(pattern, &self.comparer())
    }

    /// [`full_name_matches`](Self::full_name_matches) under `comparer`.
    fn full_name_matches_with(&self, pattern: &str, comparer: &Comparer) -> bool {
        comparer.matches(self.full_name(), pattern)
    }

    /// Whether this entity lies strictly beneath `directory`.
    ///
    /// A path equal to `directory` is not its descendant.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::prelude::*;
    ///
    /// let dir = DirectoryPath::new("/work").unwrap();
    /// let file = FilePath::new("/WORK/src/main.rs").unwrap();
    /// assert!(file.is_descendant_of(&dir));
    /// assert!(!dir.is_descendant_of(&dir));
    /// ```
    fn is_descendant_of<B: Access>(&self, directory: &DirectoryPath<B>) -> bool {
        self.is_descendant_of_with(directory, &self.comparer())
    }

    /// [`is_descendant_of`](Self::is_descendant_of) under `comparer`.
    fn is_descendant_of_with<B: Access>(
        &self,
        directory: &DirectoryPath<B>,
        comparer: &Comparer,
    ) -> bool {
        relationship::is_strict_descendant(self.full_name(), directory.full_name(), comparer)
    }

    /// How this entity relates to `other` in the hierarchy.
    fn relationship_to(&self, other: &impl FileSystemPath) -> PathRelationship {
        PathRelationship::between(self.full_name(), other.full_name(), &self.comparer())
    }

    /// The parent directory, or `None` at a root.
    fn try_parent(&self) -> Option<DirectoryPath> {
        segments::parent(self.full_name()).map(|p| DirectoryPath::from_canonical(p.to_string()))
    }

    /// The parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoParent`] at a filesystem root.
    fn parent(&self) -> Result<DirectoryPath> {
        self.try_parent().ok_or_else(|| Error::NoParent {
            path: self.full_name().to_string(),
        })
    }

    /// The root of this entity's volume.
    fn root(&self) -> DirectoryPath {
        DirectoryPath::from_canonical(segments::root(self.full_name()).to_string())
    }

    /// Whether this entity is a filesystem root.
    fn is_root(&self) -> bool {
        segments::is_root(self.full_name())
    }

    /// Parents from nearest to the root, inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(unix)] {
    /// use fspath::prelude::*;
    ///
    /// let file = FilePath::new("/a/b/c.txt").unwrap();
    /// let names: Vec<String> = file.ancestors().map(|d| d.to_string()).collect();
    /// assert_eq!(names, ["/a/b", "/a", "/"]);
    /// # }
    /// ```
    fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: segments::parent(self.full_name()),
        }
    }

    /// Whether the entity exists as the right kind. Never fails.
    fn exists(&self) -> bool {
        self.exists_on(OsFileSystem::shared())
    }

    /// [`exists`](Self::exists) on `fs`.
    fn exists_on(&self, fs: &dyn FileSystem) -> bool {
        match self.kind() {
            EntryKind::File => fs.exists_file(self.full_name()),
            EntryKind::Directory => fs.exists_dir(self.full_name()),
        }
    }

    /// The entry's attributes.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be inspected.
    fn attributes(&self) -> Result<FileAttributes> {
        self.attributes_on(OsFileSystem::shared())
    }

    /// [`attributes`](Self::attributes) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be inspected.
    fn attributes_on(&self, fs: &dyn FileSystem) -> Result<FileAttributes> {
        Ok(metadata_of(self.full_name(), fs)?.attributes)
    }

    /// Creation time.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or the platform has no creation time.
    fn created(&self) -> Result<DateTime<Utc>> {
        self.created_on(OsFileSystem::shared())
    }

    /// [`created`](Self::created) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or the platform has no creation time.
    fn created_on(&self, fs: &dyn FileSystem) -> Result<DateTime<Utc>> {
        timestamp(self.full_name(), fs, "creation", |m| m.created)
    }

    /// Last access time.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be inspected.
    fn accessed(&self) -> Result<DateTime<Utc>> {
        self.accessed_on(OsFileSystem::shared())
    }

    /// [`accessed`](Self::accessed) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be inspected.
    fn accessed_on(&self, fs: &dyn FileSystem) -> Result<DateTime<Utc>> {
        timestamp(self.full_name(), fs, "access", |m| m.accessed)
    }

    /// Last modification time.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be inspected.
    fn modified(&self) -> Result<DateTime<Utc>> {
        self.modified_on(OsFileSystem::shared())
    }

    /// [`modified`](Self::modified) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be inspected.
    fn modified_on(&self, fs: &dyn FileSystem) -> Result<DateTime<Utc>> {
        timestamp(self.full_name(), fs, "modification", |m| m.modified)
    }
}

pub(crate) fn metadata_of(path: &str, fs: &dyn FileSystem) -> Result<EntryMetadata> {
    fs.metadata(path).map_err(io_at(path))
}

fn timestamp(
    path: &str,
    fs: &dyn FileSystem,
    label: &str,
    pick: impl FnOnce(&EntryMetadata) -> Option<SystemTime>,
) -> Result<DateTime<Utc>> {
    let metadata = metadata_of(path, fs)?;
    pick(&metadata).map(DateTime::<Utc>::from).ok_or_else(|| Error::Io {
        path: path.to_string(),
        source: io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{label} time is not available"),
        ),
    })
}

/// Iterator over the parents of a path, ending with its root.
///
/// Cloning restarts nothing and copies the position, so the sequence can be
/// walked again from any point.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a str>,
}

impl Iterator for Ancestors<'_> {
    type Item = DirectoryPath;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = segments::parent(current);
        Some(DirectoryPath::from_canonical(current.to_string()))
    }
}

impl FusedIterator for Ancestors<'_> {}

impl<A: Access> FileSystemPath for FilePath<A> {
    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn kind(&self) -> EntryKind {
        EntryKind::File
    }
}

impl<A: Access> FileSystemPath for DirectoryPath<A> {
    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn kind(&self) -> EntryKind {
        EntryKind::Directory
    }
}

/// Equality, hashing, ordering and formatting for a path entity type.
///
/// Native comparisons are exact and ignore the ambient comparer.
macro_rules! impl_path_value {
    ($ty:ident, $label:literal) => {
        impl<A: Access, B: Access> PartialEq<$ty<B>> for $ty<A> {
            fn eq(&self, other: &$ty<B>) -> bool {
                self.full_name == other.full_name
            }
        }

        impl<A: Access> Eq for $ty<A> {}

        impl<A: Access> std::hash::Hash for $ty<A> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.full_name.hash(state);
            }
        }

        impl<A: Access> PartialOrd for $ty<A> {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<A: Access> Ord for $ty<A> {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.full_name.cmp(&other.full_name)
            }
        }

        impl<A: Access> std::fmt::Display for $ty<A> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.full_name)
            }
        }

        impl<A: Access> std::fmt::Debug for $ty<A> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}({:?})", A::LABEL, $label, self.full_name)
            }
        }

        impl<A: Access> AsRef<str> for $ty<A> {
            fn as_ref(&self) -> &str {
                &self.full_name
            }
        }

        impl<A: Access> AsRef<std::path::Path> for $ty<A> {
            fn as_ref(&self) -> &std::path::Path {
                std::path::Path::new(&self.full_name)
            }
        }

        impl From<$ty<crate::access::Destructive>> for $ty<crate::access::ReadOnly> {
            fn from(path: $ty<crate::access::Destructive>) -> Self {
                path.into_read_only()
            }
        }

        impl std::str::FromStr for $ty<crate::access::ReadOnly> {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $ty<crate::access::ReadOnly> {
            type Error = Error;

            fn try_from(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<&std::path::Path> for $ty<crate::access::ReadOnly> {
            type Error = Error;

            fn try_from(path: &std::path::Path) -> Result<Self> {
                let raw = path.to_str().ok_or_else(|| {
                    Error::invalid_path(path.display().to_string(), "path is not valid UTF-8")
                })?;
                Self::new(raw)
            }
        }
    };
}

impl_path_value!(FilePath, "File");
impl_path_value!(DirectoryPath, "Dir");

/// Attribute and timestamp setters for a destructive entity type.
macro_rules! impl_destructive_metadata {
    () => {
        /// Apply `attributes`; only the read-only flag is settable.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed.
        pub fn set_attributes(
            &self,
            attributes: $crate::fs::FileAttributes,
        ) -> $crate::error::Result<()> {
            self.set_attributes_on($crate::fs::OsFileSystem::shared(), attributes)
        }

        /// [`set_attributes`](Self::set_attributes) on `fs`.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed.
        pub fn set_attributes_on(
            &self,
            fs: &dyn $crate::fs::FileSystem,
            attributes: $crate::fs::FileAttributes,
        ) -> $crate::error::Result<()> {
            fs.set_read_only(&self.full_name, attributes.read_only)
                .map_err($crate::path::entity::io_at(&self.full_name))
        }

        /// Set the creation time.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed or the platform cannot set it.
        pub fn set_created(
            &self,
            time: ::chrono::DateTime<::chrono::Utc>,
        ) -> $crate::error::Result<()> {
            self.set_created_on($crate::fs::OsFileSystem::shared(), time)
        }

        /// [`set_created`](Self::set_created) on `fs`.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed or `fs` cannot set it.
        pub fn set_created_on(
            &self,
            fs: &dyn $crate::fs::FileSystem,
            time: ::chrono::DateTime<::chrono::Utc>,
        ) -> $crate::error::Result<()> {
            fs.set_created(&self.full_name, time.into())
                .map_err($crate::path::entity::io_at(&self.full_name))
        }

        /// Set the last access time.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed.
        pub fn set_accessed(
            &self,
            time: ::chrono::DateTime<::chrono::Utc>,
        ) -> $crate::error::Result<()> {
            self.set_accessed_on($crate::fs::OsFileSystem::shared(), time)
        }

        /// [`set_accessed`](Self::set_accessed) on `fs`.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed.
        pub fn set_accessed_on(
            &self,
            fs: &dyn $crate::fs::FileSystem,
            time: ::chrono::DateTime<::chrono::Utc>,
        ) -> $crate::error::Result<()> {
            fs.set_times(&self.full_name, Some(time.into()), None)
                .map_err($crate::path::entity::io_at(&self.full_name))
        }

        /// Set the last modification time.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed.
        pub fn set_modified(
            &self,
            time: ::chrono::DateTime<::chrono::Utc>,
        ) -> $crate::error::Result<()> {
            self.set_modified_on($crate::fs::OsFileSystem::shared(), time)
        }

        /// [`set_modified`](Self::set_modified) on `fs`.
        ///
        /// # Errors
        ///
        /// Fails if the entry cannot be changed.
        pub fn set_modified_on(
            &self,
            fs: &dyn $crate::fs::FileSystem,
            time: ::chrono::DateTime<::chrono::Utc>,
        ) -> $crate::error::Result<()> {
            fs.set_times(&self.full_name, None, Some(time.into()))
                .map_err($crate::path::entity::io_at(&self.full_name))
        }

        /// Encrypt the entry in place.
        ///
        /// # Errors
        ///
        /// Fails if the filesystem does not support encryption.
        pub fn encrypt(&self) -> $crate::error::Result<()> {
            self.encrypt_on($crate::fs::OsFileSystem::shared())
        }

        /// [`encrypt`](Self::encrypt) on `fs`.
        ///
        /// # Errors
        ///
        /// Fails if `fs` does not support encryption.
        pub fn encrypt_on(&self, fs: &dyn $crate::fs::FileSystem) -> $crate::error::Result<()> {
            fs.encrypt(&self.full_name).map_err($crate::path::entity::io_at(&self.full_name))
        }

        /// Decrypt the entry in place.
        ///
        /// # Errors
        ///
        /// Fails if the filesystem does not support encryption.
        pub fn decrypt(&self) -> $crate::error::Result<()> {
            self.decrypt_on($crate::fs::OsFileSystem::shared())
        }

        /// [`decrypt`](Self::decrypt) on `fs`.
        ///
        /// # Errors
        ///
        /// Fails if `fs` does not support encryption.
        pub fn decrypt_on(&self, fs: &dyn $crate::fs::FileSystem) -> $crate::error::Result<()> {
            fs.decrypt(&self.full_name).map_err($crate::path::entity::io_at(&self.full_name))
        }
    };
}

pub(crate) use impl_destructive_metadata;
