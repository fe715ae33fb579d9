//! The filesystem boundary.
//!
//! Path entities never touch the OS directly; every I/O operation goes
//! through a [`FileSystem`]. [`OsFileSystem`] is the default implementation,
//! built on `std::fs`, `walkdir` and `filetime`. Tests and embedders can
//! supply their own.
//!
//! All paths passed to a [`FileSystem`] are canonical strings. Errors are
//! plain [`io::Error`]s; the entity layer attaches path context.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use filetime::FileTime;
use walkdir::WalkDir;

/// Buffer size used by stream helpers when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

static BUFFER_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_BUFFER_SIZE);

/// The buffer size used by buffered stream helpers.
#[must_use]
pub fn buffer_size() -> usize {
    BUFFER_SIZE.load(Ordering::Relaxed)
}

/// Set the buffer size used by buffered stream helpers.
///
/// Zero is ignored.
pub fn set_buffer_size(size: usize) {
    if size > 0 {
        BUFFER_SIZE.store(size, Ordering::Relaxed);
    }
}

/// Whether an entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file (or a link to one).
    File,
    /// A directory (or a link to one).
    Directory,
}

/// Attributes of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct FileAttributes {
    /// Writes are not permitted.
    pub read_only: bool,
    /// The entry is hidden (a dot-name on Unix).
    pub hidden: bool,
    /// The entry is a directory.
    pub directory: bool,
    /// The entry itself is a symbolic link.
    pub symlink: bool,
}

/// Metadata for a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    /// File or directory.
    pub kind: EntryKind,
    /// Size in bytes.
    pub len: u64,
    /// Entry attributes.
    pub attributes: FileAttributes,
    /// Creation time, where the platform records one.
    pub created: Option<SystemTime>,
    /// Last access time.
    pub accessed: Option<SystemTime>,
    /// Last modification time.
    pub modified: Option<SystemTime>,
}

/// One entry produced by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Canonical path of the entry.
    pub path: String,
    /// File or directory.
    pub kind: EntryKind,
    /// Entry attributes.
    pub attributes: FileAttributes,
}

/// Decides whether a walk descends into a directory.
pub type DescendPredicate = Arc<dyn Fn(&EntryInfo) -> bool + Send + Sync>;

/// Options for [`FileSystem::walk`].
#[derive(Clone, Default)]
pub struct WalkOptions {
    /// Walk the whole subtree instead of immediate children.
    pub recursive: bool,
    /// Follow symbolic links to directories.
    pub follow_links: bool,
    /// Directories rejected by this predicate are yielded but not entered.
    pub descend_if: Option<DescendPredicate>,
}

impl fmt::Debug for WalkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalkOptions")
            .field("recursive", &self.recursive)
            .field("follow_links", &self.follow_links)
            .field("descend_if", &self.descend_if.is_some())
            .finish()
    }
}

impl WalkOptions {
    /// Immediate children only.
    #[must_use]
    pub fn shallow() -> Self {
        Self::default()
    }

    /// The whole subtree.
    #[must_use]
    pub fn recursive() -> Self {
        Self {
            recursive: true,
            ..Self::default()
        }
    }
}

/// A failure reported by a walk.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct WalkError {
    /// The entry or subtree that failed, when the filesystem knows it.
    pub path: Option<String>,
    /// The underlying error.
    #[source]
    pub source: io::Error,
}

impl WalkError {
    /// A failure attributed to `path`.
    pub fn at(path: impl Into<String>, source: io::Error) -> Self {
        Self {
            path: Some(path.into()),
            source,
        }
    }
}

impl From<io::Error> for WalkError {
    fn from(source: io::Error) -> Self {
        Self { path: None, source }
    }
}

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .and_then(Path::to_str)
            .map(str::to_owned);
        Self {
            path,
            source: err.into(),
        }
    }
}

/// A lazy sequence of walked entries.
pub type EntryIter = Box<dyn Iterator<Item = Result<EntryInfo, WalkError>> + Send>;

/// How a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenMode {
    /// Read an existing file.
    Read,
    /// Create or truncate, then write.
    Create,
    /// Write from the start without truncating; create if missing.
    Write,
    /// Write at the end; create if missing.
    Append,
    /// Read and write; create if missing.
    ReadWrite,
}

impl OpenMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Self::Read => options.read(true),
            Self::Create => options.write(true).create(true).truncate(true),
            Self::Write => options.write(true).create(true).truncate(false),
            Self::Append => options.append(true).create(true),
            Self::ReadWrite => options.read(true).write(true).create(true).truncate(false),
        };
        options
    }
}

/// A byte stream returned by [`FileSystem::open`].
pub trait Stream: Read + Write + Seek + Send + fmt::Debug {}

impl<T: Read + Write + Seek + Send + fmt::Debug> Stream for T {}

/// Boxed [`Stream`].
pub type FileStream = Box<dyn Stream>;

fn unsupported(operation: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("{operation} is not supported by this filesystem"),
    )
}

/// Operations path entities need from a filesystem.
pub trait FileSystem: Send + Sync {
    /// Whether `path` is an existing file. Never fails.
    fn exists_file(&self, path: &str) -> bool;

    /// Whether `path` is an existing directory. Never fails.
    fn exists_dir(&self, path: &str) -> bool;

    /// Metadata of the entry at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be inspected.
    fn metadata(&self, path: &str) -> io::Result<EntryMetadata>;

    /// Set or clear the read-only attribute.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be changed.
    fn set_read_only(&self, path: &str, read_only: bool) -> io::Result<()>;

    /// Set access and/or modification times; `None` leaves a time alone.
    ///
    /// # Errors
    ///
    /// Fails if the entry does not exist or cannot be changed.
    fn set_times(
        &self,
        path: &str,
        accessed: Option<SystemTime>,
        modified: Option<SystemTime>,
    ) -> io::Result<()>;

    /// Set the creation time.
    ///
    /// # Errors
    ///
    /// Unsupported unless overridden.
    fn set_created(&self, path: &str, created: SystemTime) -> io::Result<()> {
        let _ = (path, created);
        Err(unsupported("setting creation time"))
    }

    /// Entries below `root` (never `root` itself), in unspecified order.
    ///
    /// Errors for individual entries are yielded in-line, naming the entry
    /// or subtree that failed, and the walk continues where it can. Links
    /// are classified by what they point to.
    fn walk(&self, root: &str, options: &WalkOptions) -> EntryIter;

    /// Immediate children of `root`.
    fn read_dir(&self, root: &str) -> EntryIter {
        self.walk(root, &WalkOptions::shallow())
    }

    /// Create `path` and any missing parents.
    ///
    /// # Errors
    ///
    /// Fails if a component exists as a file or cannot be created.
    fn create_dir_all(&self, path: &str) -> io::Result<()>;

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be removed.
    fn remove_file(&self, path: &str) -> io::Result<()>;

    /// Remove an empty directory.
    ///
    /// # Errors
    ///
    /// Fails if the directory does not exist, is not empty, or cannot be
    /// removed.
    fn remove_dir(&self, path: &str) -> io::Result<()>;

    /// Remove a directory and everything below it.
    ///
    /// # Errors
    ///
    /// Fails if the directory does not exist or an entry cannot be removed.
    fn remove_dir_all(&self, path: &str) -> io::Result<()>;

    /// Move `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails if `from` does not exist or the move is not possible.
    fn rename(&self, from: &str, to: &str) -> io::Result<()>;

    /// Copy file content from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` if `to` exists and `overwrite` is false.
    fn copy(&self, from: &str, to: &str, overwrite: bool) -> io::Result<()>;

    /// Replace `to` with `from`, optionally keeping the old `to` at `backup`.
    ///
    /// `from` no longer exists afterwards. Without a backup the old `to` is
    /// overwritten by the move. If the final move fails, the old `to` is
    /// moved back from `backup` where possible.
    ///
    /// # Errors
    ///
    /// Fails if `from` or `to` does not exist.
    fn replace(&self, from: &str, to: &str, backup: Option<&str>) -> io::Result<()>;

    /// Open a byte stream.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened in `mode`.
    fn open(&self, path: &str, mode: OpenMode) -> io::Result<FileStream>;

    /// Read a whole file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or read.
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open(path, OpenMode::Read)?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Replace a file's content, creating it if needed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or written.
    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let mut stream = self.open(path, OpenMode::Create)?;
        stream.write_all(bytes)?;
        stream.flush()
    }

    /// Append to a file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or written.
    fn append(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let mut stream = self.open(path, OpenMode::Append)?;
        stream.write_all(bytes)?;
        stream.flush()
    }

    /// Encrypt an entry in place.
    ///
    /// # Errors
    ///
    /// Unsupported unless overridden.
    fn encrypt(&self, path: &str) -> io::Result<()> {
        let _ = path;
        Err(unsupported("encryption"))
    }

    /// Decrypt an entry in place.
    ///
    /// # Errors
    ///
    /// Unsupported unless overridden.
    fn decrypt(&self, path: &str) -> io::Result<()> {
        let _ = path;
        Err(unsupported("decryption"))
    }
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// A shared instance.
    #[must_use]
    pub fn shared() -> &'static Self {
        static INSTANCE: OsFileSystem = OsFileSystem;
        &INSTANCE
    }
}

fn attributes_of(path: &Path, meta: &fs::Metadata, is_symlink: bool) -> FileAttributes {
    FileAttributes {
        read_only: meta.permissions().readonly(),
        hidden: is_hidden(path, meta),
        directory: meta.is_dir(),
        symlink: is_symlink,
    }
}

#[cfg(windows)]
fn is_hidden(_path: &Path, meta: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden(path: &Path, _meta: &fs::Metadata) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn kind_of(meta: &fs::Metadata) -> EntryKind {
    if meta.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

impl FileSystem for OsFileSystem {
    fn exists_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn exists_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn metadata(&self, path: &str) -> io::Result<EntryMetadata> {
        let path = Path::new(path);
        let meta = fs::metadata(path)?;
        let is_symlink = fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
        Ok(EntryMetadata {
            kind: kind_of(&meta),
            len: meta.len(),
            attributes: attributes_of(path, &meta, is_symlink),
            created: meta.created().ok(),
            accessed: meta.accessed().ok(),
            modified: meta.modified().ok(),
        })
    }

    fn set_read_only(&self, path: &str, read_only: bool) -> io::Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(read_only);
        fs::set_permissions(path, permissions)
    }

    fn set_times(
        &self,
        path: &str,
        accessed: Option<SystemTime>,
        modified: Option<SystemTime>,
    ) -> io::Result<()> {
        match (accessed, modified) {
            (Some(atime), Some(mtime)) => filetime::set_file_times(
                path,
                FileTime::from_system_time(atime),
                FileTime::from_system_time(mtime),
            ),
            (Some(atime), None) => {
                filetime::set_file_atime(path, FileTime::from_system_time(atime))
            }
            (None, Some(mtime)) => {
                filetime::set_file_mtime(path, FileTime::from_system_time(mtime))
            }
            (None, None) => fs::metadata(path).map(|_| ()),
        }
    }

    fn walk(&self, root: &str, options: &WalkOptions) -> EntryIter {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(options.follow_links);
        if !options.recursive {
            walker = walker.max_depth(1);
        }
        Box::new(OsWalk {
            inner: walker.into_iter(),
            descend_if: options.descend_if.clone(),
        })
    }

    fn create_dir_all(&self, path: &str) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &str) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &str) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_dir_all(&self, path: &str) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn rename(&self, from: &str, to: &str) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn copy(&self, from: &str, to: &str, overwrite: bool) -> io::Result<()> {
        if !overwrite && Path::new(to).exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("destination exists: {to}"),
            ));
        }
        fs::copy(from, to).map(|_| ())
    }

    fn replace(&self, from: &str, to: &str, backup: Option<&str>) -> io::Result<()> {
        fs::metadata(from)?;
        fs::metadata(to)?;
        replace_by_renaming(|a, b| fs::rename(a, b), from, to, backup)
    }

    fn open(&self, path: &str, mode: OpenMode) -> io::Result<FileStream> {
        Ok(Box::new(mode.options().open(path)?))
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}

/// Move `to` aside to `backup` (if any), then `from` onto `to`.
///
/// A failed second move puts `backup` back at `to` and still returns the
/// move's error.
fn replace_by_renaming(
    rename: impl Fn(&str, &str) -> io::Result<()>,
    from: &str,
    to: &str,
    backup: Option<&str>,
) -> io::Result<()> {
    let Some(backup) = backup else {
        return rename(from, to);
    };
    rename(to, backup)?;
    rename(from, to).inspect_err(|err| {
        log::warn!("replacing {to} failed ({err}); restoring it from {backup}");
        if let Err(restore) = rename(backup, to) {
            log::error!("cannot restore {to} from {backup}: {restore}");
        }
    })
}

struct OsWalk {
    inner: walkdir::IntoIter,
    descend_if: Option<DescendPredicate>,
}

impl OsWalk {
    /// Describe `entry`, or `None` for a dangling link.
    fn info(entry: &walkdir::DirEntry) -> Result<Option<EntryInfo>, WalkError> {
        let path = entry.path();
        let canonical = path.to_str().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("path is not valid UTF-8: {}", path.display()),
            )
        })?;
        // Unfollowed links report the link itself; classify by the target.
        let meta = if entry.file_type().is_symlink() {
            match fs::metadata(path) {
                Ok(meta) => meta,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    log::debug!("skipping dangling link {canonical}");
                    return Ok(None);
                }
                Err(err) => return Err(WalkError::at(canonical, err)),
            }
        } else {
            entry.metadata()?
        };
        Ok(Some(EntryInfo {
            path: canonical.to_string(),
            kind: kind_of(&meta),
            attributes: attributes_of(path, &meta, entry.path_is_symlink()),
        }))
    }
}

impl Iterator for OsWalk {
    type Item = Result<EntryInfo, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };
            let info = match Self::info(&entry) {
                Ok(Some(info)) => info,
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            };
            // Only entries walkdir itself descends into can be skipped.
            if entry.file_type().is_dir() {
                if let Some(descend_if) = &self.descend_if {
                    if !descend_if(&info) {
                        self.inner.skip_current_dir();
                    }
                }
            }
            return Some(Ok(info));
        }
    }
}
