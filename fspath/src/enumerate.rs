//! Lazy directory enumeration.
//!
//! [`Entries`] wraps a [`FileSystem`](crate::fs::FileSystem) walk. It is
//! single-pass and yields entries in whatever order the filesystem reports
//! them. A [`CancellationToken`] is checked before every element; once it
//! fires the iterator yields [`Error::Cancelled`] once, releases the walk
//! and ends.
//!
//! [`Entries::into_stream`] moves the walk onto tokio's blocking pool and
//! exposes it as a [`Stream`].

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;
use tokio_util::sync::CancellationToken;

use crate::ambient::AmbientContext;
use crate::error::{Error, Result};
use crate::fs::{DescendPredicate, EntryInfo, EntryIter, FileAttributes, WalkError};

const STREAM_CAPACITY: usize = 64;

type Convert<T> = Box<dyn FnMut(EntryInfo) -> Option<T> + Send>;

/// A lazy, single-pass sequence of directory entries.
pub struct Entries<T> {
    root: String,
    inner: Option<EntryIter>,
    convert: Convert<T>,
    tolerate_errors: bool,
    cancellation: Option<CancellationToken>,
}

impl<T> fmt::Debug for Entries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entries")
            .field("root", &self.root)
            .field("finished", &self.inner.is_none())
            .field("tolerate_errors", &self.tolerate_errors)
            .finish_non_exhaustive()
    }
}

impl<T> Entries<T> {
    /// Entries of `inner`, keeping those `convert` maps to `Some`.
    ///
    /// Errors are reported against the entry that failed, or `root` when the
    /// filesystem does not say. With `tolerate_errors`, failing
    /// entries and unreadable subtrees are logged and skipped.
    pub(crate) fn new(
        root: impl Into<String>,
        inner: EntryIter,
        tolerate_errors: bool,
        convert: impl FnMut(EntryInfo) -> Option<T> + Send + 'static,
    ) -> Self {
        Self {
            root: root.into(),
            inner: Some(inner),
            convert: Box::new(convert),
            tolerate_errors,
            cancellation: None,
        }
    }

    /// Stop with [`Error::Cancelled`] once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Whether per-entry errors are skipped instead of yielded.
    #[must_use]
    pub fn tolerates_errors(&self) -> bool {
        self.tolerate_errors
    }
}

impl<T: Send + 'static> Entries<T> {
    /// Run the walk on the blocking pool and stream its results.
    ///
    /// The current [`AmbientContext`] is installed on the blocking thread.
    /// Dropping the stream stops the walk at the next entry.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn into_stream(self) -> EntryStream<T> {
        let (tx, rx) = mpsc::channel(STREAM_CAPACITY);
        let context = AmbientContext::current();
        tokio::task::spawn_blocking(move || {
            let _entered = context.enter();
            for item in self {
                if tx.blocking_send(item).is_err() {
                    log::trace!("entry stream dropped; stopping walk");
                    break;
                }
            }
        });
        EntryStream {
            inner: ReceiverStream::new(rx),
        }
    }
}

impl<T> Iterator for Entries<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled) {
                self.inner = None;
                self.cancellation = None;
                return Some(Err(Error::Cancelled));
            }
            let inner = self.inner.as_mut()?;
            match inner.next() {
                None => {
                    self.inner = None;
                    return None;
                }
                Some(Ok(info)) => {
                    if let Some(item) = (self.convert)(info) {
                        return Some(Ok(item));
                    }
                }
                Some(Err(WalkError { path, source })) => {
                    let path = path.unwrap_or_else(|| self.root.clone());
                    if !self.tolerate_errors {
                        return Some(Err(Error::from_io(path, source)));
                    }
                    log::debug!("skipping unreadable entry {path}: {source}");
                }
            }
        }
    }
}

/// An async stream over [`Entries`], produced by [`Entries::into_stream`].
#[derive(Debug)]
pub struct EntryStream<T> {
    inner: ReceiverStream<Result<T>>,
}

impl<T> Stream for EntryStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Filters entries by their attributes.
pub type AttributeFilter = Arc<dyn Fn(&FileAttributes) -> bool + Send + Sync>;

/// Options for an error-tolerant recursive walk.
///
/// Subtrees that cannot be read are skipped and logged rather than ending
/// the walk.
///
/// # Examples
///
/// ```
/// use fspath::enumerate::SafeWalk;
///
/// let walk = SafeWalk::new("*.rs")
///     .descend_if(|dir| !dir.path.ends_with("target"))
///     .include_if(|attributes| !attributes.hidden);
/// assert_eq!(walk.pattern(), "*.rs");
/// ```
#[derive(Clone)]
pub struct SafeWalk {
    pattern: String,
    follow_links: bool,
    descend_if: Option<DescendPredicate>,
    include_if: Option<AttributeFilter>,
}

impl fmt::Debug for SafeWalk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeWalk")
            .field("pattern", &self.pattern)
            .field("follow_links", &self.follow_links)
            .field("descend_if", &self.descend_if.is_some())
            .field("include_if", &self.include_if.is_some())
            .finish()
    }
}

impl Default for SafeWalk {
    fn default() -> Self {
        Self::new("*")
    }
}

impl SafeWalk {
    /// Walk entries whose name matches `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            follow_links: false,
            descend_if: None,
            include_if: None,
        }
    }

    /// Only enter directories accepted by `predicate`.
    ///
    /// Rejected directories are still yielded when they match.
    #[must_use]
    pub fn descend_if(
        mut self,
        predicate: impl Fn(&EntryInfo) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.descend_if = Some(Arc::new(predicate));
        self
    }

    /// Only yield entries whose attributes `filter` accepts.
    #[must_use]
    pub fn include_if(
        mut self,
        filter: impl Fn(&FileAttributes) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.include_if = Some(Arc::new(filter));
        self
    }

    /// Follow symbolic links to directories.
    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// The name pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub(crate) fn parts(self) -> (String, bool, Option<DescendPredicate>, Option<AttributeFilter>) {
        (self.pattern, self.follow_links, self.descend_if, self.include_if)
    }
}
