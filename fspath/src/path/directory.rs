//! Directory paths and enumeration.

use std::marker::PhantomData;

use super::entity::{impl_destructive_metadata, io_at, FileSystemPath};
use super::file::FilePath;
use super::normalize::normalize;
use super::segments::{self, is_separator, SEPARATOR};
use crate::access::{Access, DeleteOutcome, Destructive, ReadOnly};
use crate::comparer::Comparer;
use crate::enumerate::{Entries, EntryStream, SafeWalk};
use crate::error::{Error, Result};
use crate::fs::{EntryInfo, EntryKind, FileSystem, OsFileSystem, WalkError, WalkOptions};

/// A normalized, absolute path to a directory.
///
/// Enumeration is lazy: the `enumerate_*` methods return [`Entries`], which
/// touches the filesystem only as it is iterated. Patterns are globs
/// matched against entry names with the ambient comparer.
///
/// # Examples
///
/// ```
/// use fspath::prelude::*;
///
/// let dir = DirectoryPath::new("/srv/app").unwrap();
/// let config = dir.child_file("config.yaml").unwrap();
/// assert!(config.is_descendant_of(&dir));
/// assert_eq!(config.parent().unwrap(), dir);
/// ```
#[derive(Clone)]
pub struct DirectoryPath<A: Access = ReadOnly> {
    pub(crate) full_name: String,
    access: PhantomData<A>,
}

impl DirectoryPath<ReadOnly> {
    /// Normalize `raw` into a directory path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `raw` cannot be normalized.
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self::from_canonical(normalize(raw)?))
    }

    /// The process working directory.
    ///
    /// # Errors
    ///
    /// Fails if the working directory is unavailable or not valid UTF-8.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(io_at("."))?;
        Self::try_from(cwd.as_path())
    }

    /// The system temporary directory.
    ///
    /// # Errors
    ///
    /// Fails if the path is not valid UTF-8.
    pub fn temp_dir() -> Result<Self> {
        Self::try_from(std::env::temp_dir().as_path())
    }

    /// The current user's home directory, if one is known.
    #[must_use]
    pub fn home_dir() -> Option<Self> {
        let home = home::home_dir()?;
        Self::try_from(home.as_path()).ok()
    }

    /// A destructive view of this path.
    #[must_use]
    pub fn into_destructive(self) -> DirectoryPath<Destructive> {
        DirectoryPath::from_canonical(self.full_name)
    }

    /// A destructive copy of this path.
    #[must_use]
    pub fn to_destructive(&self) -> DirectoryPath<Destructive> {
        DirectoryPath::from_canonical(self.full_name.clone())
    }
}

impl<A: Access> DirectoryPath<A> {
    pub(crate) fn from_canonical(full_name: String) -> Self {
        Self {
            full_name,
            access: PhantomData,
        }
    }

    /// The canonical path string.
    #[must_use]
    pub fn into_full_name(self) -> String {
        self.full_name
    }

    /// Whether `other` names the same directory under the ambient comparer.
    pub fn equals<B: Access>(&self, other: &DirectoryPath<B>) -> bool {
        self.equals_with(other, &self.comparer())
    }

    /// Whether `other` names the same directory under `comparer`.
    pub fn equals_with<B: Access>(&self, other: &DirectoryPath<B>, comparer: &Comparer) -> bool {
        comparer.equals(&self.full_name, &other.full_name)
    }

    /// `Some(self)` if the directory exists.
    #[must_use]
    pub fn exists_or_none(self) -> Option<Self> {
        self.exists_or_none_on(OsFileSystem::shared())
    }

    /// [`exists_or_none`](Self::exists_or_none) on `fs`.
    #[must_use]
    pub fn exists_or_none_on(self, fs: &dyn FileSystem) -> Option<Self> {
        self.exists_on(fs).then_some(self)
    }

    /// The same directory with its extension replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `extension` contains a separator or
    /// this is a root.
    pub fn with_extension(&self, extension: &str) -> Result<DirectoryPath> {
        if extension.contains(is_separator) {
            return Err(Error::invalid_path(
                extension,
                "extension contains a path separator",
            ));
        }
        if self.is_root() {
            return Err(Error::invalid_path(&self.full_name, "a root has no name"));
        }
        Ok(DirectoryPath::from_canonical(segments::change_extension(
            &self.full_name,
            extension,
        )))
    }

    /// The file at `relative` beneath this directory.
    ///
    /// A rooted `relative` replaces this directory entirely; `.` and `..`
    /// segments are resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `relative` is empty or the result
    /// cannot be normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(unix)] {
    /// use fspath::prelude::*;
    ///
    /// let dir = DirectoryPath::new("/data").unwrap();
    /// assert_eq!(dir.child_file("a/b.txt").unwrap().to_string(), "/data/a/b.txt");
    /// assert_eq!(dir.child_file("../x").unwrap().to_string(), "/x");
    /// # }
    /// ```
    pub fn child_file(&self, relative: &str) -> Result<FilePath> {
        Ok(FilePath::from_canonical(self.child(relative)?))
    }

    /// The directory at `relative` beneath this directory.
    ///
    /// Joining follows the same rules as [`child_file`](Self::child_file).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `relative` is empty or the result
    /// cannot be normalized.
    pub fn child_directory(&self, relative: &str) -> Result<DirectoryPath> {
        Ok(DirectoryPath::from_canonical(self.child(relative)?))
    }

    fn child(&self, relative: &str) -> Result<String> {
        if relative.is_empty() {
            return Err(Error::invalid_path(relative, "child name is empty"));
        }
        if let Some(joined) = segments::join(&self.full_name, relative) {
            return Ok(joined);
        }
        if relative.starts_with(is_separator) || std::path::Path::new(relative).has_root() {
            return normalize(relative);
        }
        let mut raw = self.full_name.clone();
        if !raw.ends_with(SEPARATOR) {
            raw.push(SEPARATOR);
        }
        raw.push_str(relative);
        normalize(&raw)
    }

    /// Files directly in this directory whose name matches `pattern`.
    #[must_use]
    pub fn enumerate_files(&self, pattern: &str) -> Entries<FilePath> {
        self.enumerate_files_on(OsFileSystem::shared(), pattern)
    }

    /// [`enumerate_files`](Self::enumerate_files) on `fs`.
    #[must_use]
    pub fn enumerate_files_on(&self, fs: &dyn FileSystem, pattern: &str) -> Entries<FilePath> {
        self.files(fs, pattern, WalkOptions::shallow())
    }

    /// Files anywhere beneath this directory whose name matches `pattern`.
    #[must_use]
    pub fn enumerate_all_files(&self, pattern: &str) -> Entries<FilePath> {
        self.enumerate_all_files_on(OsFileSystem::shared(), pattern)
    }

    /// [`enumerate_all_files`](Self::enumerate_all_files) on `fs`.
    #[must_use]
    pub fn enumerate_all_files_on(&self, fs: &dyn FileSystem, pattern: &str) -> Entries<FilePath> {
        self.files(fs, pattern, WalkOptions::recursive())
    }

    /// Subdirectories directly in this directory whose name matches
    /// `pattern`.
    #[must_use]
    pub fn enumerate_directories(&self, pattern: &str) -> Entries<DirectoryPath> {
        self.enumerate_directories_on(OsFileSystem::shared(), pattern)
    }

    /// [`enumerate_directories`](Self::enumerate_directories) on `fs`.
    #[must_use]
    pub fn enumerate_directories_on(
        &self,
        fs: &dyn FileSystem,
        pattern: &str,
    ) -> Entries<DirectoryPath> {
        self.directories(fs, pattern, WalkOptions::shallow())
    }

    /// Directories anywhere beneath this directory whose name matches
    /// `pattern`.
    #[must_use]
    pub fn enumerate_all_directories(&self, pattern: &str) -> Entries<DirectoryPath> {
        self.enumerate_all_directories_on(OsFileSystem::shared(), pattern)
    }

    /// [`enumerate_all_directories`](Self::enumerate_all_directories) on `fs`.
    #[must_use]
    pub fn enumerate_all_directories_on(
        &self,
        fs: &dyn FileSystem,
        pattern: &str,
    ) -> Entries<DirectoryPath> {
        self.directories(fs, pattern, WalkOptions::recursive())
    }

    /// Files and subdirectories directly in this directory whose name
    /// matches `pattern`.
    #[must_use]
    pub fn enumerate_entries(&self, pattern: &str) -> Entries<PathEntry> {
        self.enumerate_entries_on(OsFileSystem::shared(), pattern)
    }

    /// [`enumerate_entries`](Self::enumerate_entries) on `fs`.
    #[must_use]
    pub fn enumerate_entries_on(&self, fs: &dyn FileSystem, pattern: &str) -> Entries<PathEntry> {
        self.entries(fs, pattern, &WalkOptions::shallow(), false, |info| {
            Some(PathEntry::from_info(info))
        })
    }

    /// Files and directories anywhere beneath this directory whose name
    /// matches `pattern`.
    #[must_use]
    pub fn enumerate_all_entries(&self, pattern: &str) -> Entries<PathEntry> {
        self.enumerate_all_entries_on(OsFileSystem::shared(), pattern)
    }

    /// [`enumerate_all_entries`](Self::enumerate_all_entries) on `fs`.
    #[must_use]
    pub fn enumerate_all_entries_on(
        &self,
        fs: &dyn FileSystem,
        pattern: &str,
    ) -> Entries<PathEntry> {
        self.entries(fs, pattern, &WalkOptions::recursive(), false, |info| {
            Some(PathEntry::from_info(info))
        })
    }

    /// [`enumerate_all_entries`](Self::enumerate_all_entries) as an async
    /// stream driven on tokio's blocking pool.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn stream_all_entries(&self, pattern: &str) -> EntryStream<PathEntry> {
        self.enumerate_all_entries(pattern).into_stream()
    }

    /// Walk the whole subtree, skipping anything that cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fspath::prelude::*;
    /// use fspath::enumerate::SafeWalk;
    ///
    /// let repo = DirectoryPath::new(".").unwrap();
    /// let walk = SafeWalk::new("*.rs").descend_if(|dir| !dir.path.ends_with("target"));
    /// for entry in repo.walk_safe(walk) {
    ///     println!("{}", entry.unwrap());
    /// }
    /// ```
    #[must_use]
    pub fn walk_safe(&self, walk: SafeWalk) -> Entries<PathEntry> {
        self.walk_safe_on(OsFileSystem::shared(), walk)
    }

    /// [`walk_safe`](Self::walk_safe) on `fs`.
    #[must_use]
    pub fn walk_safe_on(&self, fs: &dyn FileSystem, walk: SafeWalk) -> Entries<PathEntry> {
        let (pattern, follow_links, descend_if, include_if) = walk.parts();
        let options = WalkOptions {
            recursive: true,
            follow_links,
            descend_if,
        };
        self.entries(fs, &pattern, &options, true, move |info| {
            match &include_if {
                Some(include) if !include(&info.attributes) => None,
                _ => Some(PathEntry::from_info(info)),
            }
        })
    }

    /// Create the directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn ensure_created(self) -> Result<Self> {
        self.ensure_created_on(OsFileSystem::shared())
    }

    /// [`ensure_created`](Self::ensure_created) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn ensure_created_on(self, fs: &dyn FileSystem) -> Result<Self> {
        if !fs.exists_dir(&self.full_name) {
            log::debug!("creating directory {}", self.full_name);
            fs.create_dir_all(&self.full_name)
                .map_err(io_at(&self.full_name))?;
        }
        Ok(self)
    }

    /// Copy this directory's contents into `destination`, recursively,
    /// overwriting files that already exist there.
    ///
    /// Links are copied as what they point to. Dangling links are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `destination` lies inside this
    /// directory, or fails on the first entry that cannot be copied.
    pub fn copy_to(&self, destination: &DirectoryPath<Destructive>) -> Result<()> {
        self.copy_to_on(OsFileSystem::shared(), destination)
    }

    /// [`copy_to`](Self::copy_to) on `fs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `destination` lies inside this
    /// directory, or fails on the first entry that cannot be copied.
    pub fn copy_to_on(
        &self,
        fs: &dyn FileSystem,
        destination: &DirectoryPath<Destructive>,
    ) -> Result<()> {
        if self.equals(destination) || destination.is_descendant_of(self) {
            return Err(Error::invalid_path(
                &destination.full_name,
                "cannot copy a directory into itself",
            ));
        }
        log::debug!("copying {} into {}", self.full_name, destination.full_name);
        fs.create_dir_all(&destination.full_name)
            .map_err(io_at(&destination.full_name))?;
        for file in self.enumerate_files_on(fs, "*") {
            let file = file?;
            let target = destination.child_file(file.name())?.into_destructive();
            file.copy_to_on(fs, &target)?;
        }
        for directory in self.enumerate_directories_on(fs, "*") {
            let directory = directory?;
            let target = destination
                .child_directory(directory.name())?
                .into_destructive();
            directory.copy_to_on(fs, &target)?;
        }
        Ok(())
    }

    fn files(&self, fs: &dyn FileSystem, pattern: &str, options: WalkOptions) -> Entries<FilePath> {
        self.entries(fs, pattern, &options, false, |info| {
            (info.kind == EntryKind::File).then(|| FilePath::from_canonical(info.path))
        })
    }

    fn directories(
        &self,
        fs: &dyn FileSystem,
        pattern: &str,
        options: WalkOptions,
    ) -> Entries<DirectoryPath> {
        self.entries(fs, pattern, &options, false, |info| {
            (info.kind == EntryKind::Directory).then(|| DirectoryPath::from_canonical(info.path))
        })
    }

    fn entries<T, F>(
        &self,
        fs: &dyn FileSystem,
        pattern: &str,
        options: &WalkOptions,
        tolerate_errors: bool,
        mut convert: F,
    ) -> Entries<T>
    where
        F: FnMut(EntryInfo) -> Option<T> + Send + 'static,
    {
        let comparer = self.comparer();
        let pattern = pattern.to_string();
        log::trace!("enumerating {} for {pattern:?} ({options:?})", self.full_name);
        Entries::new(
            self.full_name.clone(),
            fs.walk(&self.full_name, options),
            tolerate_errors,
            move |info| {
                if comparer.matches(segments::file_name(&info.path), &pattern) {
                    convert(info)
                } else {
                    None
                }
            },
        )
    }
}

impl DirectoryPath<Destructive> {
    /// A read-only view of this path.
    #[must_use]
    pub fn into_read_only(self) -> DirectoryPath {
        DirectoryPath::from_canonical(self.full_name)
    }

    /// A read-only copy of this path.
    #[must_use]
    pub fn to_read_only(&self) -> DirectoryPath {
        DirectoryPath::from_canonical(self.full_name.clone())
    }

    /// Create a new empty directory under the system temporary directory.
    ///
    /// The directory is not removed automatically.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be created.
    pub fn create_temp() -> Result<Self> {
        let temp = tempfile::TempDir::new()
            .map_err(io_at(&std::env::temp_dir().display().to_string()))?;
        let path = temp.keep();
        Ok(DirectoryPath::<ReadOnly>::try_from(path.as_path())?.into_destructive())
    }

    impl_destructive_metadata!();

    /// Remove the directory, which must be empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotEmpty`] if entries remain, or fails if
    /// the directory cannot be removed.
    pub fn delete(&self) -> Result<DeleteOutcome> {
        self.delete_on(OsFileSystem::shared())
    }

    /// [`delete`](Self::delete) on `fs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotEmpty`] if entries remain, or fails if
    /// the directory cannot be removed.
    pub fn delete_on(&self, fs: &dyn FileSystem) -> Result<DeleteOutcome> {
        self.remove(fs, |fs, path| fs.remove_dir(path))
    }

    /// Remove the directory and everything beneath it.
    ///
    /// # Errors
    ///
    /// Fails if any part of the tree cannot be removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::prelude::*;
    ///
    /// let dir = DestructiveDirectoryPath::create_temp().unwrap();
    /// dir.child_file("a.txt").unwrap().into_destructive().write_text("a").unwrap();
    /// assert_eq!(dir.delete_all().unwrap(), DeleteOutcome::Deleted);
    /// assert_eq!(dir.delete_all().unwrap(), DeleteOutcome::NotFound);
    /// ```
    pub fn delete_all(&self) -> Result<DeleteOutcome> {
        self.delete_all_on(OsFileSystem::shared())
    }

    /// [`delete_all`](Self::delete_all) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if any part of the tree cannot be removed.
    pub fn delete_all_on(&self, fs: &dyn FileSystem) -> Result<DeleteOutcome> {
        self.remove(fs, |fs, path| fs.remove_dir_all(path))
    }

    /// Remove everything inside the directory, keeping the directory.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be removed.
    pub fn delete_entries(&self) -> Result<DeleteOutcome> {
        self.delete_entries_on(OsFileSystem::shared())
    }

    /// [`delete_entries`](Self::delete_entries) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails on the first entry that cannot be removed.
    pub fn delete_entries_on(&self, fs: &dyn FileSystem) -> Result<DeleteOutcome> {
        if !fs.exists_dir(&self.full_name) {
            return Ok(DeleteOutcome::NotFound);
        }
        log::debug!("deleting entries of {}", self.full_name);
        let entries: Vec<EntryInfo> = fs
            .read_dir(&self.full_name)
            .collect::<std::result::Result<_, WalkError>>()
            .map_err(|err| {
                let path = err.path.unwrap_or_else(|| self.full_name.clone());
                Error::from_io(path, err.source)
            })?;
        for entry in entries {
            let removed = match entry.kind {
                EntryKind::File => fs.remove_file(&entry.path),
                EntryKind::Directory => fs.remove_dir_all(&entry.path),
            };
            removed.map_err(io_at(&entry.path))?;
        }
        Ok(DeleteOutcome::Deleted)
    }

    /// Move the directory to `destination`.
    ///
    /// # Errors
    ///
    /// Fails if the directory does not exist or cannot be moved.
    pub fn move_to(&self, destination: &DirectoryPath<Destructive>) -> Result<()> {
        self.move_to_on(OsFileSystem::shared(), destination)
    }

    /// [`move_to`](Self::move_to) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the directory does not exist or cannot be moved.
    pub fn move_to_on(
        &self,
        fs: &dyn FileSystem,
        destination: &DirectoryPath<Destructive>,
    ) -> Result<()> {
        log::debug!("moving {} to {}", self.full_name, destination.full_name);
        fs.rename(&self.full_name, &destination.full_name)
            .map_err(io_at(&self.full_name))
    }

    /// Make this the process working directory.
    ///
    /// # Errors
    ///
    /// Fails if the directory does not exist or cannot be entered.
    pub fn set_as_current_dir(&self) -> Result<()> {
        log::debug!("changing working directory to {}", self.full_name);
        std::env::set_current_dir(&self.full_name).map_err(io_at(&self.full_name))
    }

    fn remove(
        &self,
        fs: &dyn FileSystem,
        op: impl FnOnce(&dyn FileSystem, &str) -> std::io::Result<()>,
    ) -> Result<DeleteOutcome> {
        if !fs.exists_dir(&self.full_name) {
            return Ok(DeleteOutcome::NotFound);
        }
        log::debug!("deleting directory {}", self.full_name);
        match op(fs, &self.full_name).map_err(io_at(&self.full_name)) {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(Error::NotFound { .. }) => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(e),
        }
    }
}

/// A file or directory produced by enumeration.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PathEntry<A: Access = ReadOnly> {
    /// A file.
    File(FilePath<A>),
    /// A directory.
    Directory(DirectoryPath<A>),
}

impl PathEntry {
    fn from_info(info: EntryInfo) -> Self {
        match info.kind {
            EntryKind::File => Self::File(FilePath::from_canonical(info.path)),
            EntryKind::Directory => Self::Directory(DirectoryPath::from_canonical(info.path)),
        }
    }
}

impl<A: Access> PathEntry<A> {
    /// Whether this entry is a file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Whether this entry is a directory.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// The file, if this is one.
    #[must_use]
    pub fn as_file(&self) -> Option<&FilePath<A>> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    /// The directory, if this is one.
    #[must_use]
    pub fn as_directory(&self) -> Option<&DirectoryPath<A>> {
        match self {
            Self::Directory(directory) => Some(directory),
            Self::File(_) => None,
        }
    }

    /// The file, if this is one.
    #[must_use]
    pub fn into_file(self) -> Option<FilePath<A>> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    /// The directory, if this is one.
    #[must_use]
    pub fn into_directory(self) -> Option<DirectoryPath<A>> {
        match self {
            Self::Directory(directory) => Some(directory),
            Self::File(_) => None,
        }
    }
}

impl<A: Access> FileSystemPath for PathEntry<A> {
    fn full_name(&self) -> &str {
        match self {
            Self::File(file) => &file.full_name,
            Self::Directory(directory) => &directory.full_name,
        }
    }

    fn kind(&self) -> EntryKind {
        match self {
            Self::File(_) => EntryKind::File,
            Self::Directory(_) => EntryKind::Directory,
        }
    }
}

impl<A: Access> std::fmt::Display for PathEntry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.full_name())
    }
}

impl<A: Access> std::fmt::Debug for PathEntry<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(file) => file.fmt(f),
            Self::Directory(directory) => directory.fmt(f),
        }
    }
}

impl<A: Access> From<FilePath<A>> for PathEntry<A> {
    fn from(file: FilePath<A>) -> Self {
        Self::File(file)
    }
}

impl<A: Access> From<DirectoryPath<A>> for PathEntry<A> {
    fn from(directory: DirectoryPath<A>) -> Self {
        Self::Directory(directory)
    }
}
