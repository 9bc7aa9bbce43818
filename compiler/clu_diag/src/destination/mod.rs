//! Where diagnostics are written.
//!
//! A [`Reporter`](crate::Reporter) writes to a primary destination (standard
//! error). If that ever fails it switches, for good, to a secondary one (the
//! controlling terminal). If the secondary cannot be opened either, a last
//! resort (the system log) receives the message before the reporter gives up.
//!
//! [`Destinations`] abstracts the three so the fallback logic can be driven
//! without a real terminal or syslog daemon.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};

#[cfg(unix)]
use std::os::unix::net::UnixDatagram;

#[cfg(test)]
pub(crate) mod memory;

/// The primary, secondary and last-resort outputs of a reporter.
pub trait Destinations {
    /// Primary output, written to until it fails.
    type Primary: Write;
    /// Output used for every message after the primary has failed once.
    type Secondary: Write;

    /// Name used for the primary in failure notices.
    const PRIMARY_NAME: &'static str;
    /// Name used for the secondary in failure notices.
    const SECONDARY_NAME: &'static str;
    /// Name used for the last resort in failure notices.
    const LAST_RESORT_NAME: &'static str;

    fn primary(&mut self) -> &mut Self::Primary;

    fn open_secondary(&mut self) -> io::Result<Self::Secondary>;

    /// Delivers `text` through the last resort, labelled with `ident`.
    fn last_resort(&mut self, ident: &str, text: &str) -> io::Result<()>;
}

/// Standard error, then `/dev/tty`, then syslog.
#[derive(Debug)]
pub struct SystemDestinations {
    stderr: StderrFile,
}

impl SystemDestinations {
    pub fn new() -> Self {
        SystemDestinations {
            stderr: StderrFile::new(),
        }
    }
}

impl Default for SystemDestinations {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard error as a file handle of its own.
///
/// [`io::Stderr`] swallows `EBADF` and its `flush` never reaches the
/// device, so a closed or failing stderr would go unnoticed. This writes
/// through a duplicate of the descriptor and syncs it on `flush`. Pipes and
/// terminals reject the sync with `InvalidInput`, which the reporter
/// accepts.
///
/// If the descriptor cannot be duplicated, every write fails with the
/// duplication error.
#[derive(Debug)]
pub struct StderrFile {
    file: io::Result<File>,
}

impl StderrFile {
    pub fn new() -> Self {
        StderrFile {
            file: duplicate_stderr(),
        }
    }

    fn file(&mut self) -> io::Result<&mut File> {
        match &mut self.file {
            Ok(file) => Ok(file),
            Err(err) => Err(copy_error(err)),
        }
    }
}

impl Default for StderrFile {
    fn default() -> Self {
        Self::new()
    }
}

impl From<File> for StderrFile {
    fn from(file: File) -> Self {
        StderrFile { file: Ok(file) }
    }
}

impl Write for StderrFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.sync_all()
    }
}

#[cfg(unix)]
fn duplicate_stderr() -> io::Result<File> {
    use std::os::fd::AsFd;
    io::stderr().as_fd().try_clone_to_owned().map(File::from)
}

#[cfg(windows)]
fn duplicate_stderr() -> io::Result<File> {
    use std::os::windows::io::AsHandle;
    io::stderr().as_handle().try_clone_to_owned().map(File::from)
}

#[cfg(not(any(unix, windows)))]
fn duplicate_stderr() -> io::Result<File> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "cannot duplicate stderr on this platform",
    ))
}

/// `io::Error` is not `Clone`; OS errors keep their code.
fn copy_error(err: &io::Error) -> io::Error {
    match err.raw_os_error() {
        Some(code) => io::Error::from_raw_os_error(code),
        None => io::Error::new(err.kind(), err.to_string()),
    }
}

/// Controlling terminal device.
pub const TTY_PATH: &str = "/dev/tty";

impl Destinations for SystemDestinations {
    type Primary = StderrFile;
    type Secondary = File;

    const PRIMARY_NAME: &'static str = "stderr";
    const SECONDARY_NAME: &'static str = TTY_PATH;
    const LAST_RESORT_NAME: &'static str = "syslog";

    fn primary(&mut self) -> &mut StderrFile {
        &mut self.stderr
    }

    fn open_secondary(&mut self) -> io::Result<File> {
        if cfg!(unix) {
            OpenOptions::new().write(true).open(TTY_PATH)
        } else {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "no controlling terminal device on this platform",
            ))
        }
    }

    fn last_resort(&mut self, ident: &str, text: &str) -> io::Result<()> {
        Syslog::connect()?.send(ident, text)
    }
}

/// A connection to the local syslog daemon.
///
/// Messages go out as single datagrams at priority `LOG_USER | LOG_CRIT`,
/// framed as `<pri>ident: text`.
#[derive(Debug)]
pub struct Syslog {
    #[cfg(unix)]
    socket: UnixDatagram,
}

/// Facility `LOG_USER` (1) shifted into place, plus severity `LOG_CRIT` (2).
#[cfg(unix)]
const PRIORITY: u8 = (1 << 3) | 2;

#[cfg(unix)]
const SOCKET_PATHS: &[&str] = &["/dev/log", "/var/run/syslog", "/var/run/log"];

impl Syslog {
    #[cfg(unix)]
    pub fn connect() -> io::Result<Self> {
        let mut last_err = io::Error::new(io::ErrorKind::NotFound, "no syslog socket");
        for path in SOCKET_PATHS {
            let socket = UnixDatagram::unbound()?;
            match socket.connect(path) {
                Ok(()) => return Ok(Syslog { socket }),
                Err(err) => last_err = err,
            }
        }
        Err(last_err)
    }

    #[cfg(not(unix))]
    pub fn connect() -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no syslog on this platform",
        ))
    }

    #[cfg(unix)]
    pub fn send(&self, ident: &str, text: &str) -> io::Result<()> {
        self.socket.send(frame(ident, text).as_bytes()).map(drop)
    }

    #[cfg(not(unix))]
    pub fn send(&self, _ident: &str, _text: &str) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }
}

#[cfg(unix)]
fn frame(ident: &str, text: &str) -> String {
    format!("<{PRIORITY}>{ident}: {text}")
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "clu-diag-{name}-{}",
            std::process::id()
        ));
        fs::write(&path, b"").unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn syslog_frame_uses_user_crit_priority() {
        assert_eq!(frame("prog", "it broke"), "<10>prog: it broke");
    }

    #[test]
    fn system_names() {
        assert_eq!(SystemDestinations::PRIMARY_NAME, "stderr");
        assert_eq!(SystemDestinations::SECONDARY_NAME, "/dev/tty");
        assert_eq!(SystemDestinations::LAST_RESORT_NAME, "syslog");
    }

    #[test]
    fn primary_is_writable() {
        let mut destinations = SystemDestinations::new();
        assert!(destinations.primary().write_all(b"").is_ok());
    }

    #[test]
    fn stderr_file_writes_and_syncs_a_regular_file() {
        let path = scratch_file("stderr-regular");
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        let mut stderr = StderrFile::from(file);

        stderr.write_all(b"prog: saved\n").unwrap();
        stderr.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "prog: saved\n");
        fs::remove_file(path).unwrap();
    }

    // A read-only descriptor rejects writes with EBADF, the same error a
    // closed stderr gives.
    #[cfg(unix)]
    #[test]
    fn stderr_file_reports_bad_descriptor() {
        let path = scratch_file("stderr-read-only");
        let mut stderr = StderrFile::from(File::open(&path).unwrap());

        let err = stderr.write_all(b"prog: lost\n").unwrap_err();
        assert!(err.raw_os_error().is_some(), "{err:?}");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn failed_duplication_fails_every_write() {
        let mut stderr = StderrFile {
            file: Err(io::Error::from_raw_os_error(9)),
        };
        for _ in 0..2 {
            let err = stderr.write(b"x").unwrap_err();
            assert_eq!(err.raw_os_error(), Some(9));
        }
        assert_eq!(stderr.flush().unwrap_err().raw_os_error(), Some(9));
    }

    #[test]
    fn copied_custom_error_keeps_kind_and_text() {
        let err = io::Error::new(io::ErrorKind::Unsupported, "no stderr here");
        let copy = copy_error(&err);
        assert_eq!(copy.kind(), io::ErrorKind::Unsupported);
        assert_eq!(copy.to_string(), "no stderr here");
    }
}
