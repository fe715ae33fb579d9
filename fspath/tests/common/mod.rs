//! Common test utilities for integration tests.
//!
//! This module provides temporary-directory fixtures for tests against the
//! host filesystem, and an in-memory [`FileSystem`] for tests that need
//! failures the host cannot produce on demand.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use fspath::fs::{
    EntryInfo, EntryIter, EntryKind, EntryMetadata, FileAttributes, FileStream, FileSystem,
    OpenMode, WalkError, WalkOptions,
};
use fspath::prelude::*;

/// Creates a temporary directory and a destructive view of it.
///
/// The directory is removed when the returned `TempDir` is dropped.
#[allow(dead_code)]
pub fn temp_root() -> (tempfile::TempDir, DestructiveDirectoryPath) {
    let temp = tempfile::tempdir().unwrap();
    let dir = <DirectoryPath>::try_from(temp.path())
        .unwrap()
        .into_destructive();
    (temp, dir)
}

/// Writes `relative` under `root` with its own name as content, creating
/// parent directories.
#[allow(dead_code)]
pub fn touch(root: &DestructiveDirectoryPath, relative: &str) -> DestructiveFilePath {
    let file = root.child_file(relative).unwrap().into_destructive();
    file.parent().unwrap().ensure_created().unwrap();
    file.write_text(relative).unwrap();
    file
}

/// Sorted names of every `Ok` entry.
#[allow(dead_code)]
pub fn names<T, I>(entries: I) -> Vec<String>
where
    T: FileSystemPath,
    I: IntoIterator<Item = fspath::Result<T>>,
{
    let mut names: Vec<String> = entries
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.name().to_string())
        .collect();
    names.sort();
    names
}

#[derive(Debug, Clone)]
enum Node {
    File {
        bytes: Vec<u8>,
        read_only: bool,
        accessed: Option<SystemTime>,
        modified: Option<SystemTime>,
    },
    Directory,
}

impl Node {
    fn file(bytes: &[u8]) -> Self {
        Self::File {
            bytes: bytes.to_vec(),
            read_only: false,
            accessed: None,
            modified: None,
        }
    }

    fn kind(&self) -> EntryKind {
        match self {
            Self::File { .. } => EntryKind::File,
            Self::Directory => EntryKind::Directory,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<String, Node>,
    unreadable: BTreeSet<String>,
    undeletable: BTreeSet<String>,
    calls: Vec<String>,
}

/// An in-memory [`FileSystem`] with `/`-separated absolute paths.
///
/// Directories marked [`unreadable`](Self::deny_read) fail when walked;
/// entries marked [`undeletable`](Self::deny_delete) fail when removed.
/// Every mutating call is recorded in [`calls`](Self::calls).
#[derive(Debug)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

#[allow(dead_code)]
impl MemoryFileSystem {
    /// A filesystem holding only `/`.
    pub fn new() -> Self {
        let mut state = State::default();
        state.nodes.insert("/".to_string(), Node::Directory);
        Self {
            state: Mutex::new(state),
        }
    }

    /// Add a file, creating its parents.
    pub fn with_file(self, path: &str, bytes: &[u8]) -> Self {
        {
            let mut state = self.lock();
            add_parents(&mut state, path);
            state.nodes.insert(path.to_string(), Node::file(bytes));
        }
        self
    }

    /// Add a directory, creating its parents.
    pub fn with_dir(self, path: &str) -> Self {
        {
            let mut state = self.lock();
            add_parents(&mut state, path);
            state.nodes.insert(path.to_string(), Node::Directory);
        }
        self
    }

    /// Make walking into `path` fail with `PermissionDenied`.
    pub fn deny_read(self, path: &str) -> Self {
        self.lock().unreadable.insert(path.to_string());
        self
    }

    /// Make removing `path` fail with `PermissionDenied`.
    pub fn deny_delete(self, path: &str) -> Self {
        self.lock().undeletable.insert(path.to_string());
        self
    }

    /// Mutating calls made so far, as `"op path"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Content of the file at `path`.
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        match self.lock().nodes.get(path) {
            Some(Node::File { bytes, .. }) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// Whether anything exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.lock().nodes.contains_key(path)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_of(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    let (head, _) = path.rsplit_once('/')?;
    Some(if head.is_empty() { "/" } else { head })
}

fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

fn add_parents(state: &mut State, path: &str) {
    let mut current = parent_of(path);
    while let Some(dir) = current {
        state
            .nodes
            .entry(dir.to_string())
            .or_insert(Node::Directory);
        current = parent_of(dir);
    }
}

fn children(state: &State, dir: &str) -> Vec<(String, EntryKind)> {
    state
        .nodes
        .iter()
        .filter(|(path, _)| parent_of(path) == Some(dir))
        .map(|(path, node)| (path.clone(), node.kind()))
        .collect()
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{path} does not exist"))
}

fn denied(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, format!("{path} is protected"))
}

fn info(path: String, kind: EntryKind) -> EntryInfo {
    EntryInfo {
        path,
        kind,
        attributes: FileAttributes {
            directory: kind == EntryKind::Directory,
            ..FileAttributes::default()
        },
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists_file(&self, path: &str) -> bool {
        matches!(self.lock().nodes.get(path), Some(Node::File { .. }))
    }

    fn exists_dir(&self, path: &str) -> bool {
        matches!(self.lock().nodes.get(path), Some(Node::Directory))
    }

    fn metadata(&self, path: &str) -> io::Result<EntryMetadata> {
        let state = self.lock();
        let node = state.nodes.get(path).ok_or_else(|| not_found(path))?;
        Ok(match node {
            Node::File {
                bytes,
                read_only,
                accessed,
                modified,
            } => EntryMetadata {
                kind: EntryKind::File,
                len: bytes.len() as u64,
                attributes: FileAttributes {
                    read_only: *read_only,
                    ..FileAttributes::default()
                },
                created: None,
                accessed: *accessed,
                modified: *modified,
            },
            Node::Directory => EntryMetadata {
                kind: EntryKind::Directory,
                len: 0,
                attributes: FileAttributes {
                    directory: true,
                    ..FileAttributes::default()
                },
                created: None,
                accessed: None,
                modified: None,
            },
        })
    }

    fn set_read_only(&self, path: &str, read_only: bool) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("set_read_only {path}"));
        match state.nodes.get_mut(path) {
            Some(Node::File { read_only: flag, .. }) => {
                *flag = read_only;
                Ok(())
            }
            Some(Node::Directory) => Ok(()),
            None => Err(not_found(path)),
        }
    }

    fn set_times(
        &self,
        path: &str,
        accessed: Option<SystemTime>,
        modified: Option<SystemTime>,
    ) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("set_times {path}"));
        match state.nodes.get_mut(path) {
            Some(Node::File {
                accessed: a,
                modified: m,
                ..
            }) => {
                if accessed.is_some() {
                    *a = accessed;
                }
                if modified.is_some() {
                    *m = modified;
                }
                Ok(())
            }
            Some(Node::Directory) => Ok(()),
            None => Err(not_found(path)),
        }
    }

    fn walk(&self, root: &str, options: &WalkOptions) -> EntryIter {
        let state = self.lock();
        let mut out: Vec<Result<EntryInfo, WalkError>> = Vec::new();
        if !matches!(state.nodes.get(root), Some(Node::Directory)) {
            out.push(Err(WalkError::at(root, not_found(root))));
            return Box::new(out.into_iter());
        }
        let mut pending = vec![root.to_string()];
        while let Some(dir) = pending.pop() {
            if state.unreadable.contains(&dir) {
                out.push(Err(WalkError::at(dir.as_str(), denied(&dir))));
                continue;
            }
            for (path, kind) in children(&state, &dir) {
                let entry = info(path.clone(), kind);
                let descend = kind == EntryKind::Directory
                    && options.recursive
                    && options.descend_if.as_ref().map_or(true, |p| p(&entry));
                out.push(Ok(entry));
                if descend {
                    pending.push(path);
                }
            }
        }
        Box::new(out.into_iter())
    }

    fn create_dir_all(&self, path: &str) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("create_dir_all {path}"));
        if matches!(state.nodes.get(path), Some(Node::File { .. })) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{path} is a file"),
            ));
        }
        add_parents(&mut state, path);
        state.nodes.insert(path.to_string(), Node::Directory);
        Ok(())
    }

    fn remove_file(&self, path: &str) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("remove_file {path}"));
        if state.undeletable.contains(path) {
            return Err(denied(path));
        }
        match state.nodes.get(path) {
            Some(Node::File { .. }) => {
                state.nodes.remove(path);
                Ok(())
            }
            _ => Err(not_found(path)),
        }
    }

    fn remove_dir(&self, path: &str) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("remove_dir {path}"));
        if state.undeletable.contains(path) {
            return Err(denied(path));
        }
        if !matches!(state.nodes.get(path), Some(Node::Directory)) {
            return Err(not_found(path));
        }
        if !children(&state, path).is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::DirectoryNotEmpty,
                format!("{path} is not empty"),
            ));
        }
        state.nodes.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &str) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("remove_dir_all {path}"));
        if !matches!(state.nodes.get(path), Some(Node::Directory)) {
            return Err(not_found(path));
        }
        let prefix = join(path, "");
        let doomed: Vec<String> = state
            .nodes
            .keys()
            .filter(|p| p.as_str() == path || p.starts_with(&prefix))
            .cloned()
            .collect();
        if let Some(protected) = doomed.iter().find(|p| state.undeletable.contains(*p)) {
            return Err(denied(protected));
        }
        for p in doomed {
            state.nodes.remove(&p);
        }
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("rename {from}"));
        if !state.nodes.contains_key(from) {
            return Err(not_found(from));
        }
        let prefix = join(from, "");
        let moved: Vec<String> = state
            .nodes
            .keys()
            .filter(|p| p.as_str() == from || p.starts_with(&prefix))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = state.nodes.remove(&old) {
                let new = format!("{to}{}", &old[from.len()..]);
                state.nodes.insert(new, node);
            }
        }
        Ok(())
    }

    fn copy(&self, from: &str, to: &str, overwrite: bool) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("copy {from}"));
        let Some(Node::File { bytes, .. }) = state.nodes.get(from) else {
            return Err(not_found(from));
        };
        let bytes = bytes.clone();
        if !overwrite && state.nodes.contains_key(to) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{to} exists"),
            ));
        }
        match parent_of(to) {
            Some(parent) if matches!(state.nodes.get(parent), Some(Node::Directory)) => {}
            _ => return Err(not_found(to)),
        }
        state.nodes.insert(to.to_string(), Node::file(&bytes));
        Ok(())
    }

    fn replace(&self, from: &str, to: &str, backup: Option<&str>) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("replace {to}"));
        if !state.nodes.contains_key(to) {
            return Err(not_found(to));
        }
        let source = state.nodes.remove(from).ok_or_else(|| not_found(from))?;
        if let Some(old) = state.nodes.insert(to.to_string(), source) {
            if let Some(backup) = backup {
                state.nodes.insert(backup.to_string(), old);
            }
        }
        Ok(())
    }

    fn open(&self, path: &str, mode: OpenMode) -> io::Result<FileStream> {
        match mode {
            OpenMode::Read => {
                let bytes = self.read(path)?;
                Ok(Box::new(io::Cursor::new(bytes)))
            }
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "memory streams are read-only",
            )),
        }
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.contents(path).ok_or_else(|| not_found(path))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(format!("write {path}"));
        match state.nodes.get_mut(path) {
            Some(Node::File {
                read_only: true, ..
            }) => Err(denied(path)),
            Some(Node::File { bytes: existing, .. }) => {
                *existing = bytes.to_vec();
                Ok(())
            }
            Some(Node::Directory) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{path} is a directory"),
            )),
            None => {
                match parent_of(path) {
                    Some(parent) if matches!(state.nodes.get(parent), Some(Node::Directory)) => {}
                    _ => return Err(not_found(path)),
                }
                state.nodes.insert(path.to_string(), Node::file(bytes));
                Ok(())
            }
        }
    }

    fn append(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let existing = self.contents(path).unwrap_or_default();
        let mut combined = existing;
        combined.extend_from_slice(bytes);
        self.write(path, &combined)
    }
}
