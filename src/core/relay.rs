//! Relay: fans prioritized messages out to registered receivers

use super::{
    caller::Caller,
    collector::Collector,
    error::Result,
    flags::{Flags, MaskOp},
    receiver::{concat, join_line, Receiver, Sink},
    severity::Severity,
};
use parking_lot::RwLock;
use std::fmt::{self, Display};
use std::io::Write;
use std::sync::Arc;

/// Called by the fatal family with the exit status once the message is logged.
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

/// Base call depth of relays built with [`Relay::new`].
pub const DEFAULT_CALL_DEPTH: usize = 2;

/// Exit status requested by the fatal family.
pub const FATAL_EXIT_CODE: i32 = 1;

struct RelayState {
    verbosity: Severity,
    prefix: String,
    flags: Flags,
}

/// Forwards log messages to its receivers based on its verbosity.
///
/// A message more verbose than the relay's own threshold is dropped before
/// any receiver sees it. Messages that pass are forwarded, in registration
/// order, to every receiver, each of which applies its own threshold.
///
/// The fatal and panic families terminate once, in the relay itself: the
/// message is forwarded at [`Severity::Emergency`] and the relay then calls
/// its exit handler or panics. `print` and friends log at
/// [`Severity::Notice`].
///
/// # Example
///
/// ```
/// use relay_logger::{Flags, Relay, Severity, SharedBuffer};
///
/// let errors = SharedBuffer::new();
/// let everything = SharedBuffer::new();
///
/// let relay = Relay::new(Severity::Debug, "", Flags::NONE);
/// relay.add_writer(errors.clone(), Severity::Error, "", Flags::NONE);
/// relay.add_writer(everything.clone(), Severity::Debug, "", Flags::NONE);
///
/// relay.error(&[&"disk full"]);
/// relay.info(&[&"request served"]);
///
/// assert_eq!(errors.contents(), "[ERROR] disk full\n");
/// assert_eq!(everything.contents(), "[ERROR] disk full\n[INFO] request served\n");
/// ```
pub struct Relay {
    receivers: RwLock<Vec<Arc<dyn Receiver>>>,
    state: RwLock<RelayState>,
    call_depth: usize,
    exit_handler: RwLock<ExitHandler>,
}

fn process_exit() -> ExitHandler {
    Arc::new(|code| std::process::exit(code))
}

/// Generates the plain, `f` and `ln` convenience methods for one severity.
macro_rules! severity_methods {
    ($($severity:ident => $plain:ident, $formatted:ident, $line:ident;)+) => {
        $(
            #[doc = concat!("Logs the concatenated `args` at [`Severity::", stringify!($severity), "`].")]
            #[track_caller]
            #[inline]
            pub fn $plain(&self, args: &[&dyn Display]) {
                self.log(Severity::$severity, Caller::at_depth(self.call_depth), args);
            }

            #[doc = concat!("Logs formatted arguments at [`Severity::", stringify!($severity), "`].")]
            #[track_caller]
            #[inline]
            pub fn $formatted(&self, args: fmt::Arguments<'_>) {
                self.logf(Severity::$severity, Caller::at_depth(self.call_depth), args);
            }

            #[doc = concat!("Logs space-separated `args` and a newline at [`Severity::", stringify!($severity), "`].")]
            #[track_caller]
            #[inline]
            pub fn $line(&self, args: &[&dyn Display]) {
                self.logln(Severity::$severity, Caller::at_depth(self.call_depth), args);
            }
        )+
    };
}

impl Relay {
    /// Create a relay with no receivers.
    #[must_use]
    pub fn new(verbosity: Severity, prefix: impl Into<String>, flags: Flags) -> Self {
        Self::with_call_depth(verbosity, prefix, flags, DEFAULT_CALL_DEPTH)
    }

    /// Create a relay with a single collector writing to standard error.
    #[must_use]
    pub fn with_stderr(verbosity: Severity, prefix: impl Into<String>, flags: Flags) -> Self {
        let relay = Self::new(verbosity, prefix, flags);
        relay.add_receiver(Arc::new(Collector::stderr(verbosity, flags)));
        relay
    }

    pub(crate) fn with_call_depth(
        verbosity: Severity,
        prefix: impl Into<String>,
        flags: Flags,
        call_depth: usize,
    ) -> Self {
        Self {
            receivers: RwLock::new(Vec::new()),
            state: RwLock::new(RelayState {
                verbosity,
                prefix: prefix.into(),
                flags,
            }),
            call_depth,
            exit_handler: RwLock::new(process_exit()),
        }
    }

    /// Create a builder for Relay
    ///
    /// # Example
    /// ```
    /// use relay_logger::prelude::*;
    ///
    /// let relay = Relay::builder()
    ///     .verbosity(Severity::Info)
    ///     .prefix("api")
    ///     .writer(std::io::stderr(), Severity::Warning, "", Flags::STD)
    ///     .build();
    /// assert_eq!(relay.len(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> RelayBuilder {
        RelayBuilder::new()
    }

    /// Wrap `sink` in a new collector and register it.
    ///
    /// The returned handle can be used to adjust or redirect that collector later.
    pub fn add_writer<W>(
        &self,
        sink: W,
        verbosity: Severity,
        prefix: impl Into<String>,
        flags: Flags,
    ) -> Arc<Collector>
    where
        W: Write + Send + 'static,
    {
        let collector = Arc::new(Collector::new(sink, verbosity, prefix, flags));
        self.add_receiver(collector.clone());
        collector
    }

    /// Register any receiver, including another relay.
    pub fn add_receiver(&self, receiver: Arc<dyn Receiver>) {
        self.receivers.write().push(receiver);
    }

    /// The receiver registered at `index`, if any.
    pub fn receiver(&self, index: usize) -> Option<Arc<dyn Receiver>> {
        self.receivers.read().get(index).cloned()
    }

    /// Number of registered receivers.
    pub fn len(&self) -> usize {
        self.receivers.read().len()
    }

    /// Returns true if no receiver is registered.
    pub fn is_empty(&self) -> bool {
        self.receivers.read().is_empty()
    }

    /// Get the current verbosity threshold
    pub fn verbosity(&self) -> Severity {
        self.state.read().verbosity
    }

    /// Get the relay's own format flags
    pub fn flags(&self) -> Flags {
        self.state.read().flags
    }

    /// Get the prefix added to forwarded messages
    pub fn prefix(&self) -> String {
        self.state.read().prefix.clone()
    }

    /// Base call depth reported by the convenience methods.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Replace what the fatal family does after logging. Defaults to
    /// [`std::process::exit`].
    pub fn set_exit_handler<F>(&self, handler: F)
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        *self.exit_handler.write() = Arc::new(handler);
    }

    /// Receivers at the time of the call, so forwarding never holds the list lock.
    fn snapshot(&self) -> Vec<Arc<dyn Receiver>> {
        self.receivers.read().clone()
    }

    /// Returns the prefix if `severity` passes the relay's own gate.
    fn admit(&self, severity: Severity) -> Option<String> {
        let state = self.state.read();
        state
            .verbosity
            .allows(severity)
            .then(|| state.prefix.clone())
    }

    fn exit(&self, code: i32) {
        let handler = self.exit_handler.read().clone();
        handler(code);
    }

    /// Logs formatted arguments at `severity` from the caller's location.
    #[track_caller]
    pub fn logf_at(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.logf(severity, Caller::at_depth(self.call_depth), args);
    }

    severity_methods! {
        Emergency => emerg, emergf, emergln;
        Alert => alert, alertf, alertln;
        Critical => critical, criticalf, criticalln;
        Error => error, errorf, errorln;
        Warning => warn, warnf, warnln;
        Notice => notice, noticef, noticeln;
        Info => info, infof, infoln;
        Debug => debug, debugf, debugln;
    }

    /// Equivalent to [`Relay::notice`].
    #[track_caller]
    pub fn print(&self, args: &[&dyn Display]) {
        self.log(Severity::Notice, Caller::at_depth(self.call_depth), args);
    }

    /// Equivalent to [`Relay::noticef`].
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.logf(Severity::Notice, Caller::at_depth(self.call_depth), args);
    }

    /// Equivalent to [`Relay::noticeln`].
    #[track_caller]
    pub fn println(&self, args: &[&dyn Display]) {
        self.logln(Severity::Notice, Caller::at_depth(self.call_depth), args);
    }

    /// Logs at Emergency, then calls the exit handler with status 1.
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn Display]) {
        self.log(Severity::Emergency, Caller::at_depth(self.call_depth), args);
        self.exit(FATAL_EXIT_CODE);
    }

    /// Logs formatted arguments at Emergency, then calls the exit handler with status 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(Severity::Emergency, Caller::at_depth(self.call_depth), args);
        self.exit(FATAL_EXIT_CODE);
    }

    /// Logs a line at Emergency, then calls the exit handler with status 1.
    #[track_caller]
    pub fn fatalln(&self, args: &[&dyn Display]) {
        self.logln(Severity::Emergency, Caller::at_depth(self.call_depth), args);
        self.exit(FATAL_EXIT_CODE);
    }

    /// Logs at Emergency, then panics with the prefix and `args` concatenated.
    #[track_caller]
    pub fn panic(&self, args: &[&dyn Display]) -> ! {
        self.log(Severity::Emergency, Caller::at_depth(self.call_depth), args);
        let prefix = self.prefix();
        let mut parts: Vec<&dyn Display> = Vec::with_capacity(args.len() + 1);
        parts.push(&prefix);
        parts.extend_from_slice(args);
        std::panic::panic_any(concat(&parts))
    }

    /// Logs formatted arguments at Emergency, then panics with `"<prefix> <message>"`.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logf(Severity::Emergency, Caller::at_depth(self.call_depth), args);
        let prefix = self.prefix();
        let message = fmt::format(args);
        if prefix.is_empty() {
            std::panic::panic_any(message)
        } else {
            std::panic::panic_any(format!("{} {}", prefix, message))
        }
    }

    /// Logs a line at Emergency, then panics with the same line as payload.
    #[track_caller]
    pub fn panicln(&self, args: &[&dyn Display]) -> ! {
        self.logln(Severity::Emergency, Caller::at_depth(self.call_depth), args);
        let prefix = self.prefix();
        let mut parts: Vec<&dyn Display> = Vec::with_capacity(args.len() + 1);
        if !prefix.is_empty() {
            parts.push(&prefix);
        }
        parts.extend_from_slice(args);
        std::panic::panic_any(join_line(&parts))
    }
}

impl Receiver for Relay {
    /// Forwards to every receiver's `log`, always prepending the prefix argument.
    fn log(&self, severity: Severity, caller: Caller, args: &[&dyn Display]) {
        let Some(prefix) = self.admit(severity) else {
            return;
        };
        let mut prefixed: Vec<&dyn Display> = Vec::with_capacity(args.len() + 1);
        prefixed.push(&prefix);
        prefixed.extend_from_slice(args);

        let caller = caller.forwarded();
        for receiver in self.snapshot() {
            receiver.log(severity, caller, &prefixed);
        }
    }

    /// Forwards to every receiver's `logf`, as `"<prefix> <message>"` when a prefix is set.
    fn logf(&self, severity: Severity, caller: Caller, args: fmt::Arguments<'_>) {
        let Some(prefix) = self.admit(severity) else {
            return;
        };

        let caller = caller.forwarded();
        for receiver in self.snapshot() {
            if prefix.is_empty() {
                receiver.logf(severity, caller, args);
            } else {
                receiver.logf(severity, caller, format_args!("{} {}", prefix, args));
            }
        }
    }

    /// Forwards to every receiver's `logln`, prepending the prefix only when set.
    fn logln(&self, severity: Severity, caller: Caller, args: &[&dyn Display]) {
        let Some(prefix) = self.admit(severity) else {
            return;
        };
        let mut prefixed: Vec<&dyn Display> = Vec::with_capacity(args.len() + 1);
        if !prefix.is_empty() {
            prefixed.push(&prefix);
        }
        prefixed.extend_from_slice(args);

        let caller = caller.forwarded();
        for receiver in self.snapshot() {
            receiver.logln(severity, caller, &prefixed);
        }
    }

    /// Writes `line` through every receiver, returning the first failure
    /// after all of them were tried.
    fn output(&self, caller: Caller, line: &str) -> Result<()> {
        let mut first_error = None;
        for receiver in self.snapshot() {
            if let Err(e) = receiver.output(caller, line) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// A relay has no sink of its own; redirect a specific collector instead.
    fn set_output(&self, _sink: Sink) {}

    /// Masks the relay's flags, then hands the same `flag` and `op` to each
    /// receiver to combine with its own flags.
    fn set_flags(&self, flag: Flags, op: MaskOp) {
        {
            let mut state = self.state.write();
            state.flags = op.apply(state.flags, flag);
        }
        for receiver in self.snapshot() {
            receiver.set_flags(flag, op);
        }
    }

    fn set_prefix(&self, prefix: &str) {
        self.state.write().prefix = prefix.to_string();
    }

    fn set_verbosity(&self, verbosity: Severity) {
        self.state.write().verbosity = verbosity;
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Relay")
            .field("verbosity", &state.verbosity)
            .field("prefix", &state.prefix)
            .field("flags", &state.flags)
            .field("call_depth", &self.call_depth)
            .field("receivers", &self.receivers.read().len())
            .finish()
    }
}

/// Builder for constructing a Relay with a fluent API
///
/// # Example
/// ```
/// use relay_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let relay = Relay::builder()
///     .verbosity(Severity::Warning)
///     .prefix("db:")
///     .writer(buffer.clone(), Severity::Debug, "", Flags::NONE)
///     .build();
///
/// relay.warn(&[&" slow query"]);
/// relay.info(&[&"dropped at the relay"]);
/// assert_eq!(buffer.contents(), "[WARNING] db: slow query\n");
/// ```
pub struct RelayBuilder {
    verbosity: Severity,
    prefix: String,
    flags: Flags,
    call_depth: usize,
    receivers: Vec<Arc<dyn Receiver>>,
    exit_handler: Option<ExitHandler>,
}

impl RelayBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            verbosity: Severity::Debug,
            prefix: String::new(),
            flags: Flags::NONE,
            call_depth: DEFAULT_CALL_DEPTH,
            receivers: Vec::new(),
            exit_handler: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, verbosity: Severity) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Base call depth reported by the convenience methods
    #[must_use = "builder methods return a new value"]
    pub fn call_depth(mut self, depth: usize) -> Self {
        self.call_depth = depth;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn receiver(mut self, receiver: Arc<dyn Receiver>) -> Self {
        self.receivers.push(receiver);
        self
    }

    /// Add a collector around `sink`
    #[must_use = "builder methods return a new value"]
    pub fn writer<W>(
        self,
        sink: W,
        verbosity: Severity,
        prefix: impl Into<String>,
        flags: Flags,
    ) -> Self
    where
        W: Write + Send + 'static,
    {
        self.receiver(Arc::new(Collector::new(sink, verbosity, prefix, flags)))
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit_handler = Some(Arc::new(handler));
        self
    }

    /// Build the Relay
    pub fn build(self) -> Relay {
        let relay = Relay::with_call_depth(self.verbosity, self.prefix, self.flags, self.call_depth);
        if let Some(handler) = self.exit_handler {
            *relay.exit_handler.write() = handler;
        }
        for receiver in self.receivers {
            relay.add_receiver(receiver);
        }
        relay
    }
}

impl Default for RelayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
