//! `CannotError`: "cannot open "notes.txt": permission denied".

use std::error::Error;
use std::fmt;

use clu_diag::tidy;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A failed action, described well enough for a one-line message.
///
/// Renders as `cannot <verb>[ <adjective>] <noun>[ <suffix>][: <cause>]`,
/// with the noun in double quotes when `quote_noun` is set. The cause is
/// rendered tidied; [`Error::source`] still returns it untouched.
#[derive(Debug)]
pub struct CannotError {
    /// A present-tense verb, e.g. `"open"`.
    pub verb: String,
    /// What kind of thing was acted on, e.g. `"config file"`, or empty.
    pub adjective: String,
    /// Which thing was acted on.
    pub noun: String,
    pub quote_noun: bool,
    /// Text after the noun, e.g. `"for writing"`, or empty.
    pub suffix: String,
    pub source: Option<BoxError>,
}

/// Builds a [`CannotError`] from all of its parts.
///
/// Programs writing many messages tend to bind this to a short name.
pub fn cannot(
    verb: impl Into<String>,
    adjective: impl Into<String>,
    noun: impl Into<String>,
    quote_noun: bool,
    suffix: impl Into<String>,
    source: Option<BoxError>,
) -> CannotError {
    CannotError {
        verb: verb.into(),
        adjective: adjective.into(),
        noun: noun.into(),
        quote_noun,
        suffix: suffix.into(),
        source,
    }
}

impl CannotError {
    pub fn new(verb: impl Into<String>, noun: impl Into<String>) -> Self {
        cannot(verb, "", noun, false, "", None)
    }

    #[must_use]
    pub fn with_adjective(mut self, adjective: impl Into<String>) -> Self {
        self.adjective = adjective.into();
        self
    }

    /// Puts the noun in double quotes.
    #[must_use]
    pub fn quoted(mut self) -> Self {
        self.quote_noun = true;
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for CannotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} ", self.verb)?;
        if !self.adjective.is_empty() {
            write!(f, "{} ", self.adjective)?;
        }
        if self.quote_noun {
            write!(f, "{:?}", self.noun)?;
        } else {
            f.write_str(&self.noun)?;
        }
        if !self.suffix.is_empty() {
            write!(f, " {}", self.suffix)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", tidy(&**source))?;
        }
        Ok(())
    }
}

impl Error for CannotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}
