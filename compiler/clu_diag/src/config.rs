//! Reporter configuration.
//!
//! Programs normally only change the message prefix or the base exit status,
//! and usually in code. The environment overrides exist so that wrapper
//! scripts can tell otherwise identical tools apart in a combined log.

use std::path::Path;

use crate::exit::{ExitStatus, ExitStatusError};

/// Overrides the message prefix.
pub const PREFIX_VAR: &str = "CLU_PREFIX";

/// Overrides the base exit status (2 to 124).
pub const EXIT_STATUS_VAR: &str = "CLU_EXIT_STATUS";

/// Prefix used when the program name cannot be determined.
const UNKNOWN_PROGRAM: &str = "program";

/// Settings a [`Reporter`](crate::Reporter) starts from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Message prefix; `None` means the program's own name.
    pub prefix: Option<String>,
    /// Base exit status used by `die`.
    pub base_exit_status: i32,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        ReporterConfig {
            prefix: None,
            base_exit_status: ExitStatus::DEFAULT.get(),
        }
    }
}

impl ReporterConfig {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_base_exit_status(mut self, status: i32) -> Self {
        self.base_exit_status = status;
        self
    }

    /// Defaults, overridden by [`PREFIX_VAR`] and [`EXIT_STATUS_VAR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ReporterConfig::default();
        if let Some(prefix) = lookup(PREFIX_VAR) {
            config.prefix = Some(prefix);
        }
        if let Some(value) = lookup(EXIT_STATUS_VAR) {
            let status = value
                .trim()
                .parse::<i32>()
                .map_err(|_| ConfigError::NotANumber {
                    var: EXIT_STATUS_VAR,
                    value: value.clone(),
                })?;
            config.base_exit_status = ExitStatus::new(status)
                .map_err(|source| ConfigError::OutOfRange {
                    var: EXIT_STATUS_VAR,
                    source,
                })?
                .get();
        }
        Ok(config)
    }

    pub(crate) fn exit_status(&self) -> Result<ExitStatus, ConfigError> {
        ExitStatus::new(self.base_exit_status).map_err(ConfigError::from)
    }

    pub(crate) fn resolved_prefix(&self) -> String {
        self.prefix.clone().unwrap_or_else(program_name)
    }
}

/// A configuration value that cannot be used.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a number")]
    NotANumber { var: &'static str, value: String },
    #[error("{var}: {source}")]
    OutOfRange {
        var: &'static str,
        source: ExitStatusError,
    },
    #[error(transparent)]
    BaseExitStatus(#[from] ExitStatusError),
}

/// The file name the program was invoked as, e.g. `grep` for `/bin/grep`.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map_or_else(
            || UNKNOWN_PROGRAM.to_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
}
