//! Text streams over file byte streams.
//!
//! [`TextReader`] skips a leading byte order mark and decodes line by line,
//! so a large file is never held in memory at once. [`TextWriter`] writes the
//! encoding's preamble when it starts a file and never afterwards.

use std::fmt;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

use crate::encoding::{TextEncoding, BOM};
use crate::error::{Error, Result};
use crate::fs::{buffer_size, FileStream};

/// A decoding reader over one file.
pub struct TextReader {
    path: String,
    encoding: TextEncoding,
    inner: BufReader<FileStream>,
}

impl fmt::Debug for TextReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextReader")
            .field("path", &self.path)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl TextReader {
    pub(crate) fn new(path: &str, encoding: TextEncoding, stream: FileStream) -> Result<Self> {
        // Room for the whole BOM in the first fill.
        let capacity = buffer_size().max(BOM.len());
        let mut inner = BufReader::with_capacity(capacity, stream);
        let has_bom = inner
            .fill_buf()
            .map_err(|e| Error::from_io(path, e))?
            .starts_with(BOM);
        if has_bom {
            inner.consume(BOM.len());
        }
        Ok(Self {
            path: path.to_string(),
            encoding,
            inner,
        })
    }

    /// The encoding used to decode.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The next line without its line ending, or `None` at the end.
    ///
    /// Both `\n` and `\r\n` end a line.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or the line cannot be decoded.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self
            .inner
            .read_until(b'\n', &mut bytes)
            .map_err(|e| Error::from_io(self.path.as_str(), e))?;
        if read == 0 {
            return Ok(None);
        }
        if bytes.ends_with(b"\n") {
            bytes.pop();
            if bytes.ends_with(b"\r") {
                bytes.pop();
            }
        }
        self.encoding.decode_bytes(&self.path, &bytes).map(Some)
    }

    /// Everything not yet read.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded.
    pub fn read_to_end(mut self) -> Result<String> {
        let mut bytes = Vec::new();
        self.inner
            .read_to_end(&mut bytes)
            .map_err(|e| Error::from_io(self.path.as_str(), e))?;
        self.encoding.decode_bytes(&self.path, &bytes)
    }

    /// The remaining lines, read lazily.
    #[must_use]
    pub fn lines(self) -> TextLines {
        TextLines {
            reader: Some(self),
        }
    }
}

/// Lazy lines of a file, produced by [`TextReader::lines`].
///
/// The first error ends the sequence.
#[derive(Debug)]
pub struct TextLines {
    reader: Option<TextReader>,
}

impl Iterator for TextLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        match reader.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.reader = None;
                None
            }
            Err(err) => {
                self.reader = None;
                Some(Err(err))
            }
        }
    }
}

/// An encoding writer over one file.
///
/// Buffered. [`finish`](Self::finish) reports flush errors, which a plain
/// drop ignores.
pub struct TextWriter {
    path: String,
    inner: BufWriter<FileStream>,
}

impl fmt::Debug for TextWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextWriter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl TextWriter {
    pub(crate) fn new(path: &str, preamble: &[u8], stream: FileStream) -> Result<Self> {
        let mut writer = Self {
            path: path.to_string(),
            inner: BufWriter::with_capacity(buffer_size(), stream),
        };
        if !preamble.is_empty() {
            writer.put(preamble)?;
        }
        Ok(writer)
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner
            .write_all(bytes)
            .map_err(|e| Error::from_io(self.path.as_str(), e))
    }

    /// Write `text` as is.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.put(text.as_bytes())
    }

    /// Write `line` followed by the platform line ending.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.put(line.as_bytes())?;
        self.put(crate::path::LINE_ENDING.as_bytes())
    }

    /// Flush buffered text and close the file.
    ///
    /// # Errors
    ///
    /// Fails if buffered text cannot be written.
    pub fn finish(mut self) -> Result<()> {
        self.inner
            .flush()
            .map_err(|e| Error::from_io(self.path.as_str(), e))
    }
}

impl Write for TextWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
