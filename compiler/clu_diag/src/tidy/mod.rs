//! Error tidying.
//!
//! [`tidy`] maps an error to the error whose text a person running a
//! command-line program should actually see. Programs are expected to say
//! what they were doing in their own words:
//!
//! ```text
//! cannot read "notes.txt": No such file or directory (os error 2)
//! ```
//!
//! so operation framing such as `open notes.txt: ...` or a bare syscall
//! name in front of the cause is dropped.
//!
//! Shapes are checked in a fixed order and the first match wins:
//!
//! 1. [`PathError`], [`LinkError`], [`SyscallError`]: the cause itself.
//! 2. [`UrlError`] with op `"parse"` whose cause starts with [`URL_PREFIX`]:
//!    the cause with the prefix trimmed. Any other `UrlError` is unchanged.
//! 3. Anything else whose text starts with a known library prefix
//!    ([`ARCHIVE_PREFIX`]): the same text with the prefix trimmed.
//! 4. Otherwise the error is unchanged.
//!
//! A [`std::io::Error`] whose custom payload is one of the shapes in (1) or
//! (2) is looked through, since I/O helpers routinely box richer errors.

use std::error::Error;
use std::fmt;
use std::io;

use crate::shapes::{LinkError, PathError, SyscallError, UrlError};

/// Label the URL parser puts in front of every syntax problem.
pub const URL_PREFIX: &str = "url: ";

/// Label archive readers put in front of their error texts.
pub const ARCHIVE_PREFIX: &str = "zip: ";

/// Library labels removed from otherwise unrecognized errors.
const TEXT_PREFIXES: &[&str] = &[ARCHIVE_PREFIX];

/// Result of [`tidy`].
#[derive(Debug)]
pub enum Tidied<'a> {
    /// No shape matched; display the original error.
    Unchanged(&'a (dyn Error + 'static)),
    /// The original was operation framing around this cause.
    Unwrapped(&'a (dyn Error + 'static)),
    /// A cause whose leading library label is dropped when displayed.
    Trimmed(TrimmedError<'a>),
}

impl Tidied<'_> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Tidied::Unchanged(_))
    }

    /// The error to display: the original or the unwrapped cause, or the
    /// [`TrimmedError`] itself.
    pub fn as_error(&self) -> &(dyn Error + '_) {
        match self {
            Tidied::Unchanged(err) | Tidied::Unwrapped(err) => *err,
            Tidied::Trimmed(err) => err,
        }
    }
}

impl fmt::Display for Tidied<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tidied::Unchanged(err) | Tidied::Unwrapped(err) => fmt::Display::fmt(err, f),
            Tidied::Trimmed(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl Error for Tidied<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Tidied::Unchanged(err) | Tidied::Unwrapped(err) => err.source(),
            Tidied::Trimmed(err) => err.source(),
        }
    }
}

/// An error displayed as its base error's text minus a leading label.
///
/// `source()` yields the base error, so the untrimmed cause stays reachable.
#[derive(Debug, Clone, Copy)]
pub struct TrimmedError<'a> {
    original: &'a (dyn Error + 'static),
    base: &'a (dyn Error + 'static),
    trim_start: usize,
}

impl<'a> TrimmedError<'a> {
    /// The error that was passed to [`tidy`].
    pub fn original(&self) -> &'a (dyn Error + 'static) {
        self.original
    }

    /// The error whose text is trimmed.
    pub fn base(&self) -> &'a (dyn Error + 'static) {
        self.base
    }

    /// Byte offset into the base error's text where display starts.
    pub fn trim_start(&self) -> usize {
        self.trim_start
    }
}

impl fmt::Display for TrimmedError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.base.to_string();
        // Offsets past the end or inside a character show the full text.
        f.write_str(text.get(self.trim_start..).unwrap_or(&text))
    }
}

impl Error for TrimmedError<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.base)
    }
}

/// Returns the error a user should see in place of `err`.
///
/// Pure and infallible; see the module docs for the recognized shapes.
pub fn tidy<'a>(err: &'a (dyn Error + 'static)) -> Tidied<'a> {
    let shaped: &(dyn Error + 'static) = match err.downcast_ref::<io::Error>() {
        Some(io_err) => match io_err.get_ref() {
            Some(inner) => inner,
            None => err,
        },
        None => err,
    };

    if let Some(e) = shaped.downcast_ref::<PathError>() {
        return Tidied::Unwrapped(&e.source);
    }
    if let Some(e) = shaped.downcast_ref::<LinkError>() {
        return Tidied::Unwrapped(&e.source);
    }
    if let Some(e) = shaped.downcast_ref::<SyscallError>() {
        return Tidied::Unwrapped(&e.source);
    }
    if let Some(e) = shaped.downcast_ref::<UrlError>() {
        return tidy_url(err, e);
    }
    trim_known_prefix(err)
}

fn tidy_url<'a>(err: &'a (dyn Error + 'static), url_err: &'a UrlError) -> Tidied<'a> {
    if url_err.op != "parse" {
        return Tidied::Unchanged(err);
    }
    let cause: &(dyn Error + 'static) = &*url_err.source;
    if cause.to_string().starts_with(URL_PREFIX) {
        Tidied::Trimmed(TrimmedError {
            original: err,
            base: cause,
            trim_start: URL_PREFIX.len(),
        })
    } else {
        Tidied::Unchanged(err)
    }
}

fn trim_known_prefix<'a>(err: &'a (dyn Error + 'static)) -> Tidied<'a> {
    let text = err.to_string();
    match TEXT_PREFIXES.iter().find(|prefix| text.starts_with(*prefix)) {
        Some(prefix) => Tidied::Trimmed(TrimmedError {
            original: err,
            base: err,
            trim_start: prefix.len(),
        }),
        None => Tidied::Unchanged(err),
    }
}
