//! Generic error values for English-language messages of the form
//!
//! ```text
//! cannot <verb>[ <adjective>] <noun>[ <suffix>][: <cause>]
//! ```
//!
//! The cause is shown through [`clu_diag::tidy`], so wrapped I/O and URL
//! errors do not repeat the operation and path the message already states.

mod cannot;

pub use cannot::{cannot, CannotError};
