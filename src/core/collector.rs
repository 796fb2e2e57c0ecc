//! Collector: the terminal receiver that renders lines to a sink

use super::{
    caller::Caller,
    error::{LoggerError, Result},
    flags::{Flags, MaskOp},
    receiver::{concat, join_line, Receiver, Sink},
    severity::Severity,
    timestamp,
};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::fmt::{self, Display};
use std::io::Write;

struct CollectorState {
    verbosity: Severity,
    flags: Flags,
    prefix: String,
}

/// Writes messages at or above its verbosity to a single sink.
///
/// Each rendered line has the shape
/// `<prefix><date> <time> <file>:<line>: [SEVERITY] <message>`, where the
/// date, time and source fields appear only when the matching [`Flags`] are
/// set.
///
/// # Example
///
/// ```
/// use relay_logger::{Caller, Collector, Flags, Receiver, Severity, SharedBuffer};
///
/// let buffer = SharedBuffer::new();
/// let collector = Collector::new(buffer.clone(), Severity::Error, "", Flags::NONE);
///
/// collector.log(Severity::Error, Caller::here(), &[&"disk full"]);
/// collector.log(Severity::Info, Caller::here(), &[&"ignored"]);
///
/// assert_eq!(buffer.contents(), "[ERROR] disk full\n");
/// ```
pub struct Collector {
    sink: Mutex<Sink>,
    state: RwLock<CollectorState>,
}

impl Collector {
    pub fn new<W>(sink: W, verbosity: Severity, prefix: impl Into<String>, flags: Flags) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::from_sink(Box::new(sink), verbosity, prefix, flags)
    }

    /// Collector around an already boxed sink.
    pub fn from_sink(
        sink: Sink,
        verbosity: Severity,
        prefix: impl Into<String>,
        flags: Flags,
    ) -> Self {
        Self {
            sink: Mutex::new(sink),
            state: RwLock::new(CollectorState {
                verbosity,
                flags,
                prefix: prefix.into(),
            }),
        }
    }

    /// Collector writing to standard error.
    pub fn stderr(verbosity: Severity, flags: Flags) -> Self {
        Self::new(std::io::stderr(), verbosity, "", flags)
    }

    /// Get the current verbosity threshold
    pub fn verbosity(&self) -> Severity {
        self.state.read().verbosity
    }

    /// Get the current format flags
    pub fn flags(&self) -> Flags {
        self.state.read().flags
    }

    /// Get the line prefix
    pub fn prefix(&self) -> String {
        self.state.read().prefix.clone()
    }

    /// Returns the label flags if `severity` passes this collector's gate.
    fn admit(&self, severity: Severity) -> Option<bool> {
        let state = self.state.read();
        state
            .verbosity
            .allows(severity)
            .then(|| state.flags.contains(Flags::COLOR))
    }

    fn emit(&self, severity: Severity, caller: Caller, with_color: bool, body: &str) {
        let mut line = severity.label(with_color);
        line.push_str(body);
        // Write failures surface only through `output`.
        let _ = self.output(caller.forwarded(), &line);
    }

    fn format_line(&self, caller: Caller, message: &str) -> String {
        let state = self.state.read();
        let flags = state.flags;
        let mut buf = String::with_capacity(state.prefix.len() + message.len() + 48);

        if !flags.contains(Flags::MSG_PREFIX) {
            buf.push_str(&state.prefix);
        }
        timestamp::write_timestamp(&mut buf, flags, &Utc::now());
        if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
            let file = if flags.contains(Flags::SHORT_FILE) {
                caller.short_file()
            } else {
                caller.file()
            };
            buf.push_str(file);
            buf.push(':');
            buf.push_str(&caller.line().to_string());
            buf.push_str(": ");
        }
        if flags.contains(Flags::MSG_PREFIX) {
            buf.push_str(&state.prefix);
        }
        buf.push_str(message);
        if !message.ends_with('\n') {
            buf.push('\n');
        }
        buf
    }
}

impl Receiver for Collector {
    fn log(&self, severity: Severity, caller: Caller, args: &[&dyn Display]) {
        if let Some(with_color) = self.admit(severity) {
            self.emit(severity, caller, with_color, &concat(args));
        }
    }

    fn logf(&self, severity: Severity, caller: Caller, args: fmt::Arguments<'_>) {
        if let Some(with_color) = self.admit(severity) {
            self.emit(severity, caller, with_color, &fmt::format(args));
        }
    }

    fn logln(&self, severity: Severity, caller: Caller, args: &[&dyn Display]) {
        if let Some(with_color) = self.admit(severity) {
            self.emit(severity, caller, with_color, &join_line(args));
        }
    }

    fn output(&self, caller: Caller, line: &str) -> Result<()> {
        let rendered = self.format_line(caller, line);
        let mut sink = self.sink.lock();
        sink.write_all(rendered.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(|e| LoggerError::io_operation("writing log line", "sink rejected write", e))
    }

    fn set_output(&self, sink: Sink) {
        *self.sink.lock() = sink;
    }

    fn set_flags(&self, flag: Flags, op: MaskOp) {
        let mut state = self.state.write();
        state.flags = op.apply(state.flags, flag);
    }

    fn set_prefix(&self, prefix: &str) {
        self.state.write().prefix = prefix.to_string();
    }

    fn set_verbosity(&self, verbosity: Severity) {
        self.state.write().verbosity = verbosity;
    }
}

impl fmt::Debug for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Collector")
            .field("verbosity", &state.verbosity)
            .field("flags", &state.flags)
            .field("prefix", &state.prefix)
            .finish_non_exhaustive()
    }
}
