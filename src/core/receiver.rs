//! Receiver trait shared by relays and collectors

use super::{caller::Caller, error::Result, flags::Flags, flags::MaskOp, severity::Severity};
use std::fmt::{self, Display, Write as _};
use std::io::Write;

/// Byte-stream destination owned by a collector.
pub type Sink = Box<dyn Write + Send>;

/// Anything that can accept a prioritized log message.
///
/// A [`Relay`](super::Relay) forwards messages to its own receivers; a
/// [`Collector`](super::Collector) renders them to its sink. Every receiver
/// applies its own verbosity gate, so a message passes a chain only if each
/// hop lets it through.
pub trait Receiver: Send + Sync {
    /// Log the concatenation of `args`.
    ///
    /// Values are written back to back with no separator, numbers included:
    /// `&[&1, &2]` renders as `12`. Use [`Receiver::logln`] for spaced output.
    fn log(&self, severity: Severity, caller: Caller, args: &[&dyn Display]);
    /// Log preformatted arguments.
    fn logf(&self, severity: Severity, caller: Caller, args: fmt::Arguments<'_>);
    /// Log `args` separated by spaces, followed by a newline.
    fn logln(&self, severity: Severity, caller: Caller, args: &[&dyn Display]);
    /// Write an already rendered line.
    fn output(&self, caller: Caller, line: &str) -> Result<()>;
    /// Replace the output sink.
    fn set_output(&self, sink: Sink);
    /// Combine the current flags with `flag` using `op`.
    fn set_flags(&self, flag: Flags, op: MaskOp);
    fn set_prefix(&self, prefix: &str);
    /// Set the least urgent severity this receiver will emit.
    fn set_verbosity(&self, verbosity: Severity);
}

/// Concatenate displayed values.
pub(crate) fn concat(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for arg in args {
        let _ = write!(out, "{}", arg);
    }
    out
}

/// Join displayed values with spaces and terminate with a newline.
pub(crate) fn join_line(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat() {
        assert_eq!(concat(&[&"disk ", &42, &"% full"]), "disk 42% full");
        assert_eq!(concat(&[]), "");
    }

    #[test]
    fn test_concat_never_inserts_spaces() {
        assert_eq!(concat(&[&1, &2]), "12");
        assert_eq!(concat(&[&1.5, &true, &'x']), "1.5truex");
    }

    #[test]
    fn test_join_line() {
        assert_eq!(join_line(&[&"a", &1, &true]), "a 1 true\n");
        assert_eq!(join_line(&[]), "\n");
    }
}
