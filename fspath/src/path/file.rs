//! File paths.

use std::io::{BufReader, BufWriter};
use std::marker::PhantomData;

use super::entity::{impl_destructive_metadata, io_at, FileSystemPath};
use super::normalize::normalize;
use super::segments::{self, is_separator};
use super::LINE_ENDING;
use crate::access::{Access, DeleteOutcome, Destructive, ReadOnly};
use crate::comparer::Comparer;
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::fs::{buffer_size, FileStream, FileSystem, OpenMode, OsFileSystem};
use crate::text::{TextLines, TextReader, TextWriter};

/// A normalized, absolute path to a file.
///
/// The access marker `A` decides which operations are available; see
/// [`access`](crate::access).
///
/// # Examples
///
/// ```
/// use fspath::prelude::*;
///
/// let file = FilePath::new("reports/q1.csv").unwrap();
/// assert_eq!(file.name(), "q1.csv");
/// assert_eq!(file.extension(), ".csv");
/// assert!(file.with_extension("txt").unwrap().extension_equals("TXT"));
/// ```
#[derive(Clone)]
pub struct FilePath<A: Access = ReadOnly> {
    pub(crate) full_name: String,
    access: PhantomData<A>,
}

impl FilePath<ReadOnly> {
    /// Normalize `raw` into a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `raw` cannot be normalized.
    pub fn new(raw: &str) -> Result<Self> {
        Ok(Self::from_canonical(normalize(raw)?))
    }

    /// A destructive view of this path.
    #[must_use]
    pub fn into_destructive(self) -> FilePath<Destructive> {
        FilePath::from_canonical(self.full_name)
    }

    /// A destructive copy of this path.
    #[must_use]
    pub fn to_destructive(&self) -> FilePath<Destructive> {
        FilePath::from_canonical(self.full_name.clone())
    }
}

impl<A: Access> FilePath<A> {
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

    /// Whether `other` names the same file under the ambient comparer.
    pub fn equals<B: Access>(&self, other: &FilePath<B>) -> bool {
        self.equals_with(other, &self.comparer())
    }

    /// Whether `other` names the same file under `comparer`.
    pub fn equals_with<B: Access>(&self, other: &FilePath<B>, comparer: &Comparer) -> bool {
        comparer.equals(&self.full_name, &other.full_name)
    }

    /// `Some(self)` if the file exists.
    #[must_use]
    pub fn exists_or_none(self) -> Option<Self> {
        self.exists_or_none_on(OsFileSystem::shared())
    }

    /// [`exists_or_none`](Self::exists_or_none) on `fs`.
    #[must_use]
    pub fn exists_or_none_on(self, fs: &dyn FileSystem) -> Option<Self> {
        self.exists_on(fs).then_some(self)
    }

    /// The same file with its extension replaced.
    ///
    /// Leading dots of `extension` are ignored; an empty remainder removes
    /// the extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `extension` contains a separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::prelude::*;
    ///
    /// let file = FilePath::new("/data/file1.foo").unwrap();
    /// assert_eq!(file.with_extension(".bar").unwrap().name(), "file1.bar");
    /// assert_eq!(file.with_extension("").unwrap().name(), "file1");
    /// assert!(file.with_extension("a/b").is_err());
    /// ```
    pub fn with_extension(&self, extension: &str) -> Result<FilePath> {
        if extension.contains(is_separator) {
            return Err(Error::invalid_path(
                extension,
                "extension contains a path separator",
            ));
        }
        Ok(FilePath::from_canonical(segments::change_extension(
            &self.full_name,
            extension,
        )))
    }

    /// The same file without an extension.
    #[must_use]
    pub fn without_extension(&self) -> FilePath {
        FilePath::from_canonical(segments::change_extension(&self.full_name, ""))
    }

    /// Size in bytes.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be inspected.
    pub fn size(&self) -> Result<u64> {
        self.size_on(OsFileSystem::shared())
    }

    /// [`size`](Self::size) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be inspected.
    pub fn size_on(&self, fs: &dyn FileSystem) -> Result<u64> {
        Ok(super::entity::metadata_of(&self.full_name, fs)?.len)
    }

    /// The whole file as bytes.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        self.read_bytes_on(OsFileSystem::shared())
    }

    /// [`read_bytes`](Self::read_bytes) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub fn read_bytes_on(&self, fs: &dyn FileSystem) -> Result<Vec<u8>> {
        fs.read(&self.full_name).map_err(io_at(&self.full_name))
    }

    /// The whole file as text in the ambient encoding.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded.
    pub fn read_text(&self) -> Result<String> {
        self.read_text_on(OsFileSystem::shared())
    }

    /// [`read_text`](Self::read_text) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded.
    pub fn read_text_on(&self, fs: &dyn FileSystem) -> Result<String> {
        self.read_text_with_on(fs, TextEncoding::ambient_for(&self.full_name))
    }

    /// The whole file as text in `encoding`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded.
    pub fn read_text_with(&self, encoding: TextEncoding) -> Result<String> {
        self.read_text_with_on(OsFileSystem::shared(), encoding)
    }

    /// [`read_text_with`](Self::read_text_with) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded.
    pub fn read_text_with_on(&self, fs: &dyn FileSystem, encoding: TextEncoding) -> Result<String> {
        let bytes = self.read_bytes_on(fs)?;
        encoding.decode(&self.full_name, &bytes)
    }

    /// The file's lines in the ambient encoding, without line endings.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        self.read_lines_on(OsFileSystem::shared())
    }

    /// [`read_lines`](Self::read_lines) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded.
    pub fn read_lines_on(&self, fs: &dyn FileSystem) -> Result<Vec<String>> {
        self.lines_on(fs)?.collect()
    }

    /// The file's lines in the ambient encoding, read lazily.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened. Read and decode failures are
    /// yielded by the iterator, which then ends.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::prelude::*;
    ///
    /// let file = DestructiveFilePath::create_temp().unwrap();
    /// file.write_lines(["first", "second"]).unwrap();
    /// let first = file.lines().unwrap().next().unwrap().unwrap();
    /// assert_eq!(first, "first");
    /// # file.delete().unwrap();
    /// ```
    pub fn lines(&self) -> Result<TextLines> {
        self.lines_on(OsFileSystem::shared())
    }

    /// [`lines`](Self::lines) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn lines_on(&self, fs: &dyn FileSystem) -> Result<TextLines> {
        Ok(self.open_text_on(fs)?.lines())
    }

    /// A decoding reader in the ambient encoding.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_text(&self) -> Result<TextReader> {
        self.open_text_on(OsFileSystem::shared())
    }

    /// [`open_text`](Self::open_text) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_text_on(&self, fs: &dyn FileSystem) -> Result<TextReader> {
        self.open_text_with_on(fs, TextEncoding::ambient_for(&self.full_name))
    }

    /// A decoding reader in `encoding`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_text_with(&self, encoding: TextEncoding) -> Result<TextReader> {
        self.open_text_with_on(OsFileSystem::shared(), encoding)
    }

    /// [`open_text_with`](Self::open_text_with) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_text_with_on(
        &self,
        fs: &dyn FileSystem,
        encoding: TextEncoding,
    ) -> Result<TextReader> {
        let stream = fs
            .open(&self.full_name, OpenMode::Read)
            .map_err(io_at(&self.full_name))?;
        TextReader::new(&self.full_name, encoding, stream)
    }

    /// A buffered reader using the configured buffer size.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_read(&self) -> Result<BufReader<FileStream>> {
        self.open_read_on(OsFileSystem::shared())
    }

    /// [`open_read`](Self::open_read) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_read_on(&self, fs: &dyn FileSystem) -> Result<BufReader<FileStream>> {
        let stream = fs
            .open(&self.full_name, OpenMode::Read)
            .map_err(io_at(&self.full_name))?;
        Ok(BufReader::with_capacity(buffer_size(), stream))
    }

    /// Copy this file over `destination`, overwriting it.
    ///
    /// # Errors
    ///
    /// Fails if either file cannot be accessed.
    pub fn copy_to(&self, destination: &FilePath<Destructive>) -> Result<()> {
        self.copy_to_on(OsFileSystem::shared(), destination)
    }

    /// [`copy_to`](Self::copy_to) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if either file cannot be accessed.
    pub fn copy_to_on(
        &self,
        fs: &dyn FileSystem,
        destination: &FilePath<Destructive>,
    ) -> Result<()> {
        log::debug!("copying {} to {}", self.full_name, destination.full_name);
        fs.copy(&self.full_name, &destination.full_name, true)
            .map_err(io_at(&self.full_name))
    }
}

impl FilePath<Destructive> {
    /// A read-only view of this path.
    #[must_use]
    pub fn into_read_only(self) -> FilePath {
        FilePath::from_canonical(self.full_name)
    }

    /// A read-only copy of this path.
    #[must_use]
    pub fn to_read_only(&self) -> FilePath {
        FilePath::from_canonical(self.full_name.clone())
    }

    /// Create an empty temporary file that outlives this process.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created.
    pub fn create_temp() -> Result<Self> {
        let temp = tempfile::NamedTempFile::new()
            .map_err(io_at(&std::env::temp_dir().display().to_string()))?;
        let (_file, path) = temp.keep().map_err(|e| {
            let path = e.file.path().display().to_string();
            Error::from_io(path, e.error)
        })?;
        let raw = path.to_str().ok_or_else(|| {
            Error::invalid_path(path.display().to_string(), "path is not valid UTF-8")
        })?;
        Ok(FilePath::new(raw)?.into_destructive())
    }

    impl_destructive_metadata!();

    /// Delete the file.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fspath::prelude::*;
    ///
    /// let file = DestructiveFilePath::create_temp().unwrap();
    /// assert_eq!(file.delete().unwrap(), DeleteOutcome::Deleted);
    /// assert_eq!(file.delete().unwrap(), DeleteOutcome::NotFound);
    /// ```
    pub fn delete(&self) -> Result<DeleteOutcome> {
        self.delete_on(OsFileSystem::shared())
    }

    /// [`delete`](Self::delete) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be removed.
    pub fn delete_on(&self, fs: &dyn FileSystem) -> Result<DeleteOutcome> {
        if !fs.exists_file(&self.full_name) {
            return Ok(DeleteOutcome::NotFound);
        }
        log::debug!("deleting file {}", self.full_name);
        match fs.remove_file(&self.full_name).map_err(io_at(&self.full_name)) {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(Error::NotFound { .. }) => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(e),
        }
    }

    /// Move the file to `destination`.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be moved.
    pub fn move_to(&self, destination: &FilePath<Destructive>) -> Result<()> {
        self.move_to_on(OsFileSystem::shared(), destination)
    }

    /// [`move_to`](Self::move_to) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or cannot be moved.
    pub fn move_to_on(
        &self,
        fs: &dyn FileSystem,
        destination: &FilePath<Destructive>,
    ) -> Result<()> {
        log::debug!("moving {} to {}", self.full_name, destination.full_name);
        fs.rename(&self.full_name, &destination.full_name)
            .map_err(io_at(&self.full_name))
    }

    /// Replace `destination` with this file, optionally keeping the old
    /// content at `backup`. This file no longer exists afterwards.
    ///
    /// # Errors
    ///
    /// Fails if this file or `destination` does not exist.
    pub fn replace(
        &self,
        destination: &FilePath<Destructive>,
        backup: Option<&FilePath<Destructive>>,
    ) -> Result<()> {
        self.replace_on(OsFileSystem::shared(), destination, backup)
    }

    /// [`replace`](Self::replace) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if this file or `destination` does not exist.
    pub fn replace_on(
        &self,
        fs: &dyn FileSystem,
        destination: &FilePath<Destructive>,
        backup: Option<&FilePath<Destructive>>,
    ) -> Result<()> {
        log::debug!("replacing {} with {}", destination.full_name, self.full_name);
        fs.replace(
            &self.full_name,
            &destination.full_name,
            backup.map(|b| b.full_name.as_str()),
        )
        .map_err(io_at(&destination.full_name))
    }

    /// Replace the file's content with `bytes`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.write_bytes_on(OsFileSystem::shared(), bytes)
    }

    /// [`write_bytes`](Self::write_bytes) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_bytes_on(&self, fs: &dyn FileSystem, bytes: &[u8]) -> Result<()> {
        fs.write(&self.full_name, bytes)
            .map_err(io_at(&self.full_name))
    }

    /// Replace the file's content with `text` in the ambient encoding.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_text(&self, text: &str) -> Result<()> {
        self.write_text_on(OsFileSystem::shared(), text)
    }

    /// [`write_text`](Self::write_text) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_text_on(&self, fs: &dyn FileSystem, text: &str) -> Result<()> {
        self.write_text_with_on(fs, text, TextEncoding::ambient_for(&self.full_name))
    }

    /// Replace the file's content with `text` in `encoding`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_text_with(&self, text: &str, encoding: TextEncoding) -> Result<()> {
        self.write_text_with_on(OsFileSystem::shared(), text, encoding)
    }

    /// [`write_text_with`](Self::write_text_with) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_text_with_on(
        &self,
        fs: &dyn FileSystem,
        text: &str,
        encoding: TextEncoding,
    ) -> Result<()> {
        self.write_bytes_on(fs, &encoding.encode(text))
    }

    /// Replace the file's content with `lines`, each followed by a line
    /// ending, in the ambient encoding.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_lines<I, S>(&self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_text(&join_lines(lines))
    }

    /// [`write_lines`](Self::write_lines) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_lines_on<I, S>(&self, fs: &dyn FileSystem, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_text_on(fs, &join_lines(lines))
    }

    /// Append `text`, creating the file if needed. Never writes a BOM.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn append_text(&self, text: &str) -> Result<()> {
        self.append_text_on(OsFileSystem::shared(), text)
    }

    /// [`append_text`](Self::append_text) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn append_text_on(&self, fs: &dyn FileSystem, text: &str) -> Result<()> {
        fs.append(&self.full_name, text.as_bytes())
            .map_err(io_at(&self.full_name))
    }

    /// Append `lines`, each followed by a line ending.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn append_lines<I, S>(&self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append_text(&join_lines(lines))
    }

    /// [`append_lines`](Self::append_lines) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn append_lines_on<I, S>(&self, fs: &dyn FileSystem, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.append_text_on(fs, &join_lines(lines))
    }

    /// Create or truncate the file and return a buffered writer.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn create(&self) -> Result<BufWriter<FileStream>> {
        self.create_on(OsFileSystem::shared())
    }

    /// [`create`](Self::create) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn create_on(&self, fs: &dyn FileSystem) -> Result<BufWriter<FileStream>> {
        self.buffered_writer(fs, OpenMode::Create)
    }

    /// Open for writing from the start without truncating.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_write(&self) -> Result<BufWriter<FileStream>> {
        self.open_write_on(OsFileSystem::shared())
    }

    /// [`open_write`](Self::open_write) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_write_on(&self, fs: &dyn FileSystem) -> Result<BufWriter<FileStream>> {
        self.buffered_writer(fs, OpenMode::Write)
    }

    /// Open for appending.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_append(&self) -> Result<BufWriter<FileStream>> {
        self.open_append_on(OsFileSystem::shared())
    }

    /// [`open_append`](Self::open_append) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_append_on(&self, fs: &dyn FileSystem) -> Result<BufWriter<FileStream>> {
        self.buffered_writer(fs, OpenMode::Append)
    }

    /// Open for reading and writing, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_read_write(&self) -> Result<FileStream> {
        self.open_read_write_on(OsFileSystem::shared())
    }

    /// [`open_read_write`](Self::open_read_write) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_read_write_on(&self, fs: &dyn FileSystem) -> Result<FileStream> {
        fs.open(&self.full_name, OpenMode::ReadWrite)
            .map_err(io_at(&self.full_name))
    }

    /// Create or truncate the file and return a text writer in the ambient
    /// encoding. The encoding's preamble is written first.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn create_text(&self) -> Result<TextWriter> {
        self.create_text_on(OsFileSystem::shared())
    }

    /// [`create_text`](Self::create_text) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn create_text_on(&self, fs: &dyn FileSystem) -> Result<TextWriter> {
        self.create_text_with_on(fs, TextEncoding::ambient_for(&self.full_name))
    }

    /// [`create_text`](Self::create_text) in `encoding`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn create_text_with(&self, encoding: TextEncoding) -> Result<TextWriter> {
        self.create_text_with_on(OsFileSystem::shared(), encoding)
    }

    /// [`create_text_with`](Self::create_text_with) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn create_text_with_on(
        &self,
        fs: &dyn FileSystem,
        encoding: TextEncoding,
    ) -> Result<TextWriter> {
        self.text_writer(fs, OpenMode::Create, encoding.preamble())
    }

    /// A text writer from the start of the file without truncating, in the
    /// ambient encoding. The encoding's preamble is written first.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_write_text(&self) -> Result<TextWriter> {
        self.open_write_text_on(OsFileSystem::shared())
    }

    /// [`open_write_text`](Self::open_write_text) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_write_text_on(&self, fs: &dyn FileSystem) -> Result<TextWriter> {
        let encoding = TextEncoding::ambient_for(&self.full_name);
        self.text_writer(fs, OpenMode::Write, encoding.preamble())
    }

    /// A text writer at the end of the file. Never writes a BOM.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_append_text(&self) -> Result<TextWriter> {
        self.open_append_text_on(OsFileSystem::shared())
    }

    /// [`open_append_text`](Self::open_append_text) on `fs`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened.
    pub fn open_append_text_on(&self, fs: &dyn FileSystem) -> Result<TextWriter> {
        self.text_writer(fs, OpenMode::Append, &[])
    }

    fn text_writer(
        &self,
        fs: &dyn FileSystem,
        mode: OpenMode,
        preamble: &[u8],
    ) -> Result<TextWriter> {
        let stream = fs.open(&self.full_name, mode).map_err(io_at(&self.full_name))?;
        TextWriter::new(&self.full_name, preamble, stream)
    }

    fn buffered_writer(
        &self,
        fs: &dyn FileSystem,
        mode: OpenMode,
    ) -> Result<BufWriter<FileStream>> {
        let stream = fs.open(&self.full_name, mode).map_err(io_at(&self.full_name))?;
        Ok(BufWriter::with_capacity(buffer_size(), stream))
    }
}

fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().fold(String::new(), |mut text, line| {
        text.push_str(line.as_ref());
        text.push_str(LINE_ENDING);
        text
    })
}
