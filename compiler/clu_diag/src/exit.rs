//! Exit statuses and the deferred process exit returned by `die`.
//!
//! A program picks an even base status (2 by default). When any warning has
//! been reported the low bit is set, so `$? == 3` means "failed, and there
//! were warnings on the way".

use std::process::{ExitCode, Termination};

/// A base exit status in `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub const MIN: i32 = 2;
    pub const MAX: i32 = 124;
    pub const DEFAULT: ExitStatus = ExitStatus(2);

    pub fn new(status: i32) -> Result<Self, ExitStatusError> {
        if (Self::MIN..=Self::MAX).contains(&status) {
            Ok(ExitStatus(status))
        } else {
            Err(ExitStatusError(status))
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// The status to exit with, given whether any warnings were reported.
    pub fn effective(self, warned: bool) -> i32 {
        if warned {
            self.0 | 1
        } else {
            self.0
        }
    }
}

impl Default for ExitStatus {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A base exit status outside `ExitStatus::MIN..=ExitStatus::MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("exit status {0} is not between 2 and 124 inclusive")]
pub struct ExitStatusError(pub i32);

/// A process exit that has been decided on but not yet performed.
///
/// Returned by [`Reporter::die`](crate::Reporter::die) so that the outermost
/// caller decides when the process ends. Either return it from `main` (it
/// implements [`Termination`]) or call [`Exit::exit`].
///
/// # Hazard
///
/// [`Exit::exit`] calls [`std::process::exit`]: destructors on this thread's
/// stack do not run, and other threads are stopped wherever they are.
/// Returning the value from `main` unwinds normally first.
#[must_use = "an `Exit` does nothing unless returned from `main` or `exit()` is called"]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit {
    status: i32,
}

impl Exit {
    pub(crate) fn new(status: i32) -> Self {
        Exit { status }
    }

    pub fn status(self) -> i32 {
        self.status
    }

    /// Terminates the process now.
    pub fn exit(self) -> ! {
        std::process::exit(self.status)
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        // Statuses are at most ExitStatus::MAX | 1.
        ExitCode::from(u8::try_from(exit.status).unwrap_or(u8::MAX))
    }
}

impl Termination for Exit {
    fn report(self) -> ExitCode {
        self.into()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn range_bounds() {
        assert_eq!(ExitStatus::new(2).unwrap().get(), 2);
        assert_eq!(ExitStatus::new(124).unwrap().get(), 124);
        assert_eq!(ExitStatus::new(1), Err(ExitStatusError(1)));
        assert_eq!(ExitStatus::new(125), Err(ExitStatusError(125)));
        assert_eq!(ExitStatus::new(-4), Err(ExitStatusError(-4)));
    }

    #[test]
    fn warnings_set_low_bit() {
        assert_eq!(ExitStatus::DEFAULT.effective(false), 2);
        assert_eq!(ExitStatus::DEFAULT.effective(true), 3);
        assert_eq!(ExitStatus::new(40).unwrap().effective(true), 41);
        assert_eq!(ExitStatus::new(41).unwrap().effective(true), 41);
    }

    #[test]
    fn error_text() {
        assert_eq!(
            ExitStatusError(125).to_string(),
            "exit status 125 is not between 2 and 124 inclusive"
        );
    }

    #[test]
    fn exit_converts_to_exit_code() {
        let exit = Exit::new(3);
        assert_eq!(exit.status(), 3);
        assert_eq!(ExitCode::from(exit), ExitCode::from(3));
        assert_eq!(exit.report(), ExitCode::from(3));
    }
}
