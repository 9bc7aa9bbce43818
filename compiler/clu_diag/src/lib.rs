//! Diagnostics for command-line programs.
//!
//! Messages go to standard error in the conventional format
//!
//! ```text
//! <program>: <message>
//! <program> <tag>: <message>
//! ```
//!
//! and a [`Reporter`] counts warnings so that the exit status can say
//! whether any were reported. [`tidy`] turns wrapped errors into the short
//! cause a user actually needs to see.
//!
//! ```text
//! use clu_diag::prelude::*;
//!
//! fn main() -> Exit {
//!     let mut rep = Reporter::new();
//!     for path in std::env::args().skip(1) {
//!         if let Err(err) = clu_diag::open_file(&path) {
//!             warn!(rep, "cannot open {:?}: {}", path, tidy(&err));
//!         }
//!     }
//!     die!(rep, "")
//! }
//! ```
//!
//! # Dying is dangerous
//!
//! [`Exit::exit`] ends the process without running destructors, here or on
//! other threads. Prefer returning the [`Exit`] from `main`, and only report
//! fatal errors from `main` and its close helpers.

pub mod config;
pub mod destination;
mod exit;
mod macros;
pub mod prelude;
pub mod reporter;
pub mod shapes;
pub mod tidy;
mod trace;

pub use config::{program_name, ConfigError, ReporterConfig};
pub use destination::{Destinations, StderrFile, Syslog, SystemDestinations};
pub use exit::{Exit, ExitStatus, ExitStatusError};
pub use reporter::{format_message, Reporter};
pub use shapes::{
    open_file, parse_url, rename_file, LinkError, PathError, SyscallError, UrlError,
    UrlParseError,
};
pub use tidy::{tidy, Tidied, TrimmedError};
pub use trace::init_tracing;
