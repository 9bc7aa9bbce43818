//! Internal logging setup.
//!
//! The reporter logs its own state changes as `tracing` events under the
//! `clu_diag::reporter` target:
//! - `debug`: switching to the fallback destination, fatal exits;
//! - `trace`: a primary that cannot be synced;
//! - `warn`: a message lost on the fallback destination;
//! - `error`: no usable destination, last resort failed.
//!
//! User-facing diagnostics never go through `tracing`. Nothing is printed
//! unless a subscriber is installed.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Prints the reporter's internal events to stderr when `RUST_LOG` is set.
///
/// Idempotent. Does nothing if `RUST_LOG` is unset or another global
/// subscriber is already installed. Try `RUST_LOG=clu_diag=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .try_init();
    });
}
