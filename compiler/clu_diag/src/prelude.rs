//! Everything a program needs for reporting, for glob import:
//!
//! ```text
//! use clu_diag::prelude::*;
//!
//! let mut rep = Reporter::new();
//! let settings = load_settings();
//! if let Some(exit) = die_if!(rep, settings.as_ref().err()) {
//!     exit.exit();
//! }
//! ```

pub use crate::exit::Exit;
pub use crate::reporter::Reporter;
pub use crate::tidy::tidy;
pub use crate::{bug, die, die_if, info, warn, warn_if};
