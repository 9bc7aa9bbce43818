//! Wrapped errors that carry operation context around an underlying cause.
//!
//! These are the shapes [`tidy`](crate::tidy) knows how to simplify. Each one
//! renders the operation and its operands before the cause, which is useful
//! in a log but redundant once a program has said "cannot open foo.txt" in
//! its own words.

use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// An operation on a single path that failed.
///
/// Renders as `<op> <path>: <cause>`, with the path unquoted.
#[derive(Debug, thiserror::Error)]
#[error("{op} {}: {source}", .path.display())]
pub struct PathError {
    /// The operation, e.g. `"open"` or `"stat"`.
    pub op: String,
    /// The path the operation was applied to.
    pub path: PathBuf,
    /// The underlying I/O failure.
    pub source: io::Error,
}

impl PathError {
    pub fn new(op: impl Into<String>, path: impl Into<PathBuf>, source: io::Error) -> Self {
        PathError {
            op: op.into(),
            path: path.into(),
            source,
        }
    }
}

/// An operation on a pair of paths (link, rename) that failed.
///
/// Renders as `<op> <old> <new>: <cause>`.
#[derive(Debug, thiserror::Error)]
#[error("{op} {} {}: {source}", .old.display(), .new.display())]
pub struct LinkError {
    pub op: String,
    pub old: PathBuf,
    pub new: PathBuf,
    pub source: io::Error,
}

impl LinkError {
    pub fn new(
        op: impl Into<String>,
        old: impl Into<PathBuf>,
        new: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        LinkError {
            op: op.into(),
            old: old.into(),
            new: new.into(),
            source,
        }
    }
}

/// A system call that failed, rendered as `<syscall>: <cause>`.
#[derive(Debug, thiserror::Error)]
#[error("{syscall}: {source}")]
pub struct SyscallError {
    pub syscall: String,
    pub source: io::Error,
}

impl SyscallError {
    pub fn new(syscall: impl Into<String>, source: io::Error) -> Self {
        SyscallError {
            syscall: syscall.into(),
            source,
        }
    }
}

/// A failed operation on a URL, rendered as `<op> "<url>": <cause>`.
#[derive(Debug, thiserror::Error)]
#[error("{op} {url:?}: {source}")]
pub struct UrlError {
    /// The operation; [`parse_url`] uses `"parse"`.
    pub op: String,
    pub url: String,
    pub source: Box<dyn Error + Send + Sync + 'static>,
}

impl UrlError {
    pub fn new(
        op: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync + 'static>>,
    ) -> Self {
        UrlError {
            op: op.into(),
            url: url.into(),
            source: source.into(),
        }
    }
}

/// A URL syntax problem, labelled with the library that found it.
///
/// The `url: ` label must stay in sync with [`URL_PREFIX`](crate::tidy::URL_PREFIX).
#[derive(Debug, thiserror::Error)]
#[error("url: {0}")]
pub struct UrlParseError(#[from] pub url::ParseError);

/// Parses an absolute URL, reporting failures as a `"parse"` [`UrlError`].
pub fn parse_url(input: &str) -> Result<url::Url, UrlError> {
    url::Url::parse(input).map_err(|err| UrlError::new("parse", input, UrlParseError(err)))
}

/// Opens a file for reading, wrapping failures in a [`PathError`].
pub fn open_file(path: impl AsRef<Path>) -> Result<File, PathError> {
    let path = path.as_ref();
    File::open(path).map_err(|source| PathError::new("open", path, source))
}

/// Renames a file, wrapping failures in a [`LinkError`].
pub fn rename_file(old: impl AsRef<Path>, new: impl AsRef<Path>) -> Result<(), LinkError> {
    let (old, new) = (old.as_ref(), new.as_ref());
    fs::rename(old, new).map_err(|source| LinkError::new("rename", old, new, source))
}
