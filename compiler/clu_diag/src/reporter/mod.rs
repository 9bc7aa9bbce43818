//! The diagnostic reporter.
//!
//! Every message is one line of the form
//!
//! ```text
//! <prefix>: <text>
//! <prefix> <tag>: <text>
//! ```
//!
//! where the prefix is normally the program's name and the tag is a short
//! label such as `BUG` or `summary`.
//!
//! Three severities are offered:
//! - [`Reporter::info`] writes a message and nothing else;
//! - [`Reporter::warn`] also counts the warning;
//! - [`Reporter::die`] writes a message and returns an [`Exit`] carrying the
//!   effective exit status (the base status, made odd if anything warned).
//!
//! [`Reporter::panic`] is for misuse of a library, not for user errors.
//!
//! # Threads
//!
//! A reporter is plain mutable state with no locking; every entry point
//! takes `&mut self`. Programs that report from several threads must share
//! it behind their own lock, which serializes messages in lock order.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use crate::config::{program_name, ConfigError, ReporterConfig};
use crate::destination::{Destinations, SystemDestinations};
use crate::exit::{Exit, ExitStatus};
use crate::tidy::tidy;

/// Formats one diagnostic line, `<prefix>[ <tag>]: <text>\n`.
///
/// The tag segment is left out when `tag` is empty. A newline at the end of
/// the formatted text is not doubled.
pub fn format_message(prefix: &str, tag: &str, args: fmt::Arguments<'_>) -> String {
    let mut text = String::with_capacity(prefix.len() + tag.len() + 64);
    text.push_str(prefix);
    if !tag.is_empty() {
        text.push(' ');
        text.push_str(tag);
    }
    text.push_str(": ");
    let _ = text.write_fmt(args);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Formats and emits diagnostics, counting warnings.
pub struct Reporter<D: Destinations = SystemDestinations> {
    prefix: String,
    warnings: usize,
    base_status: ExitStatus,
    /// Set the first time the primary destination fails; never cleared.
    fallback: Option<D::Secondary>,
    destinations: D,
}

impl Reporter {
    /// A reporter writing to standard error, prefixed with the program name.
    pub fn new() -> Self {
        Reporter::with_destinations(SystemDestinations::new())
    }

    /// A reporter configured from the environment (see [`ReporterConfig::from_env`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        Reporter::with_config(ReporterConfig::from_env()?, SystemDestinations::new())
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Destinations> Reporter<D> {
    pub fn with_destinations(destinations: D) -> Self {
        Reporter {
            prefix: program_name(),
            warnings: 0,
            base_status: ExitStatus::DEFAULT,
            fallback: None,
            destinations,
        }
    }

    pub fn with_config(config: ReporterConfig, destinations: D) -> Result<Self, ConfigError> {
        let base_status = config.exit_status()?;
        Ok(Reporter {
            prefix: config.resolved_prefix(),
            warnings: 0,
            base_status,
            fallback: None,
            destinations,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// Number of warnings written so far.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn base_exit_status(&self) -> i32 {
        self.base_status.get()
    }

    /// Sets the base exit status and returns the previous one.
    ///
    /// Use an even value so that the "warnings were reported" bit stays
    /// visible in the effective status.
    ///
    /// # Panics
    ///
    /// If `status` is not in `2..=124`.
    pub fn set_base_exit_status(&mut self, status: i32) -> i32 {
        let Ok(new_status) = ExitStatus::new(status) else {
            self.panic(
                "",
                format_args!(
                    "set_base_exit_status({status}): need {} to {} inclusive",
                    ExitStatus::MIN,
                    ExitStatus::MAX
                ),
            )
        };
        std::mem::replace(&mut self.base_status, new_status).get()
    }

    /// The status `die` would exit with right now.
    pub fn effective_exit_status(&self) -> i32 {
        self.base_status.effective(self.warnings > 0)
    }

    /// Whether output has moved to the secondary destination.
    pub fn using_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Writes an informational message. Does not count as a warning.
    pub fn info(&mut self, tag: &str, args: fmt::Arguments<'_>) {
        let text = format_message(&self.prefix, tag, args);
        self.deliver(&text);
    }

    /// Writes a warning and counts it.
    pub fn warn(&mut self, tag: &str, args: fmt::Arguments<'_>) {
        self.warnings += 1;
        self.info(tag, args);
    }

    /// Warns if `cond` is `Some`.
    ///
    /// Without a message (`args` is `None`) the warning is `cond` itself, so
    /// `warn_if(Some(&err), "", None)` writes the same line as
    /// `warn("", format_args!("{err}"))`.
    pub fn warn_if<E>(&mut self, cond: Option<&E>, tag: &str, args: Option<fmt::Arguments<'_>>)
    where
        E: fmt::Display + ?Sized,
    {
        let Some(cond) = cond else { return };
        match args {
            Some(args) => self.warn(tag, args),
            None => self.warn(tag, format_args!("{cond}")),
        }
    }

    /// Writes a fatal error and returns the exit to perform.
    ///
    /// The message is not counted as a warning.
    pub fn die(&mut self, tag: &str, args: fmt::Arguments<'_>) -> Exit {
        self.info(tag, args);
        self.die_silently()
    }

    /// Returns the exit to perform without writing anything, for a program
    /// that has already reported its problems some other way.
    pub fn die_silently(&self) -> Exit {
        tracing::debug!(status = self.effective_exit_status(), "fatal diagnostic");
        Exit::new(self.effective_exit_status())
    }

    /// Like [`die`](Self::die) if `cond` is `Some`, with the missing-message
    /// rule of [`warn_if`](Self::warn_if).
    #[must_use = "the returned `Exit` must be performed"]
    pub fn die_if<E>(
        &mut self,
        cond: Option<&E>,
        tag: &str,
        args: Option<fmt::Arguments<'_>>,
    ) -> Option<Exit>
    where
        E: fmt::Display + ?Sized,
    {
        let cond = cond?;
        Some(match args {
            Some(args) => self.die(tag, args),
            None => self.die(tag, format_args!("{cond}")),
        })
    }

    /// Panics with a message in the usual `<prefix>[ <tag>]: <text>` form.
    pub fn panic(&self, tag: &str, args: fmt::Arguments<'_>) -> ! {
        let text = format_message(&self.prefix, tag, args);
        panic!("{}", text.strip_suffix('\n').unwrap_or(&text))
    }

    fn deliver(&mut self, text: &str) {
        if let Some(secondary) = self.fallback.as_mut() {
            if let Err(err) = write_all_and_flush(secondary, text) {
                tracing::warn!(%err, destination = D::SECONDARY_NAME, "diagnostic lost");
            }
            return;
        }
        if let Err(failure) = self.write_primary(text) {
            self.fall_back(&failure, text);
        }
    }

    fn write_primary(&mut self, text: &str) -> Result<(), PrimaryFailure> {
        let primary = self.destinations.primary();
        primary
            .write_all(text.as_bytes())
            .map_err(PrimaryFailure::Write)?;
        match primary.flush() {
            Ok(()) => Ok(()),
            Err(err) if cannot_sync(&err) => {
                tracing::trace!(%err, "primary destination cannot be synced");
                Ok(())
            }
            Err(err) => Err(PrimaryFailure::Sync(err)),
        }
    }

    fn fall_back(&mut self, failure: &PrimaryFailure, text: &str) {
        let verb = failure.verb();
        let cause = tidy(failure.error()).to_string();
        let mut secondary = match self.destinations.open_secondary() {
            Ok(secondary) => secondary,
            Err(open_err) => self.abandon(verb, &cause, &open_err, text),
        };
        tracing::debug!(
            %cause,
            from = D::PRIMARY_NAME,
            to = D::SECONDARY_NAME,
            "switching diagnostics to fallback destination"
        );
        let notice = format!(
            "{}: cannot {verb} {} ({cause}), using {} instead\n",
            self.prefix,
            D::PRIMARY_NAME,
            D::SECONDARY_NAME
        );
        if let Err(err) = write_all_and_flush(&mut secondary, &notice)
            .and_then(|()| write_all_and_flush(&mut secondary, text))
        {
            tracing::warn!(%err, destination = D::SECONDARY_NAME, "diagnostic lost");
        }
        self.fallback = Some(secondary);
    }

    /// Hands the message to the last resort, then panics.
    fn abandon(&mut self, verb: &str, cause: &str, open_err: &io::Error, text: &str) -> ! {
        let failure = format!(
            "can neither {verb} {} ({cause}) nor open {} ({})",
            D::PRIMARY_NAME,
            D::SECONDARY_NAME,
            tidy(open_err)
        );
        let message = text.strip_suffix('\n').unwrap_or(text);
        tracing::error!(%failure, "no usable diagnostic destination");
        match self
            .destinations
            .last_resort(&self.prefix, &format!("{failure} to report: {message}"))
        {
            Ok(()) => panic!(
                "{} PANIC: {failure}: more in {}",
                self.prefix,
                D::LAST_RESORT_NAME
            ),
            Err(err) => {
                tracing::error!(%err, destination = D::LAST_RESORT_NAME, "last resort failed");
                panic!("{} PANIC: {failure} to report: {message}", self.prefix)
            }
        }
    }
}

/// Why the primary destination could not take a message.
#[derive(Debug)]
enum PrimaryFailure {
    Write(io::Error),
    Sync(io::Error),
}

impl PrimaryFailure {
    fn verb(&self) -> &'static str {
        match self {
            PrimaryFailure::Write(_) => "write to",
            PrimaryFailure::Sync(_) => "sync",
        }
    }

    fn error(&self) -> &io::Error {
        match self {
            PrimaryFailure::Write(err) | PrimaryFailure::Sync(err) => err,
        }
    }
}

/// Pipes, sockets and FIFOs cannot be synced; that is not a failure.
fn cannot_sync(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::Unsupported | io::ErrorKind::InvalidInput
    )
}

fn write_all_and_flush(sink: &mut impl Write, text: &str) -> io::Result<()> {
    sink.write_all(text.as_bytes())?;
    sink.flush()
}
