//! In-memory destinations with scriptable failures, for reporter tests.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use super::Destinations;

/// Bytes written to a [`MemoryWriter`], readable after the writer moved.
#[derive(Clone, Debug, Default)]
pub(crate) struct Captured(Rc<RefCell<Vec<u8>>>);

impl Captured {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryWriter {
    out: Captured,
    attempts: Rc<Cell<usize>>,
    write_error: Option<io::ErrorKind>,
    flush_error: Option<io::ErrorKind>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.attempts.set(self.attempts.get() + 1);
        if let Some(kind) = self.write_error {
            return Err(io::Error::from(kind));
        }
        self.out.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.flush_error {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryDestinations {
    primary: MemoryWriter,
    secondary: Captured,
    secondary_opens: Rc<Cell<usize>>,
    secondary_error: Option<io::ErrorKind>,
    syslog: Rc<RefCell<Vec<String>>>,
    syslog_error: Option<io::ErrorKind>,
}

impl MemoryDestinations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_write(mut self, kind: io::ErrorKind) -> Self {
        self.primary.write_error = Some(kind);
        self
    }

    pub(crate) fn failing_flush(mut self, kind: io::ErrorKind) -> Self {
        self.primary.flush_error = Some(kind);
        self
    }

    pub(crate) fn without_secondary(mut self, kind: io::ErrorKind) -> Self {
        self.secondary_error = Some(kind);
        self
    }

    pub(crate) fn without_last_resort(mut self, kind: io::ErrorKind) -> Self {
        self.syslog_error = Some(kind);
        self
    }

    pub(crate) fn stderr(&self) -> Captured {
        self.primary.out.clone()
    }

    /// Number of `write` calls the primary has received.
    pub(crate) fn stderr_attempts(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.primary.attempts)
    }

    pub(crate) fn tty(&self) -> Captured {
        self.secondary.clone()
    }

    pub(crate) fn tty_opens(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.secondary_opens)
    }

    pub(crate) fn syslog(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.syslog)
    }
}

impl Destinations for MemoryDestinations {
    type Primary = MemoryWriter;
    type Secondary = MemoryWriter;

    const PRIMARY_NAME: &'static str = "stderr";
    const SECONDARY_NAME: &'static str = "/dev/tty";
    const LAST_RESORT_NAME: &'static str = "syslog";

    fn primary(&mut self) -> &mut MemoryWriter {
        &mut self.primary
    }

    fn open_secondary(&mut self) -> io::Result<MemoryWriter> {
        self.secondary_opens.set(self.secondary_opens.get() + 1);
        match self.secondary_error {
            Some(kind) => Err(io::Error::from(kind)),
            None => Ok(MemoryWriter {
                out: self.secondary.clone(),
                ..MemoryWriter::default()
            }),
        }
    }

    fn last_resort(&mut self, ident: &str, text: &str) -> io::Result<()> {
        if let Some(kind) = self.syslog_error {
            return Err(io::Error::from(kind));
        }
        self.syslog.borrow_mut().push(format!("{ident}: {text}"));
        Ok(())
    }
}
