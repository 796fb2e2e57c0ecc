//! Logging macros for ergonomic message formatting.
//!
//! These macros format their arguments with `format_args!`, without
//! allocating an intermediate string, and hand the result to the matching
//! `…f` method of a [`Relay`](crate::Relay). The reported source location is
//! the macro call site.
//!
//! # Examples
//!
//! ```
//! use relay_logger::prelude::*;
//! use relay_logger::{info, warn};
//!
//! let buffer = SharedBuffer::new();
//! let relay = Relay::new(Severity::Debug, "", Flags::NONE);
//! relay.add_writer(buffer.clone(), Severity::Debug, "", Flags::NONE);
//!
//! let port = 8080;
//! info!(relay, "listening on port {}", port);
//! warn!(relay, "{} connections pending", 3);
//!
//! assert_eq!(
//!     buffer.contents(),
//!     "[INFO] listening on port 8080\n[WARNING] 3 connections pending\n"
//! );
//! ```

/// Log a formatted message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use relay_logger::prelude::*;
/// # let relay = Relay::new(Severity::Debug, "", Flags::NONE);
/// use relay_logger::log;
/// log!(relay, Severity::Notice, "Simple message");
/// log!(relay, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($relay:expr, $severity:expr, $($arg:tt)+) => {
        $relay.logf_at($severity, format_args!($($arg)+))
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emerg {
    ($relay:expr, $($arg:tt)+) => {
        $relay.emergf(format_args!($($arg)+))
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($relay:expr, $($arg:tt)+) => {
        $relay.alertf(format_args!($($arg)+))
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($relay:expr, $($arg:tt)+) => {
        $relay.criticalf(format_args!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use relay_logger::prelude::*;
/// # let relay = Relay::new(Severity::Debug, "", Flags::NONE);
/// use relay_logger::error;
/// error!(relay, "Failed to connect to database");
/// error!(relay, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($relay:expr, $($arg:tt)+) => {
        $relay.errorf(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($relay:expr, $($arg:tt)+) => {
        $relay.warnf(format_args!($($arg)+))
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($relay:expr, $($arg:tt)+) => {
        $relay.noticef(format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($relay:expr, $($arg:tt)+) => {
        $relay.infof(format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($relay:expr, $($arg:tt)+) => {
        $relay.debugf(format_args!($($arg)+))
    };
}

/// Log an emergency-level message, then run the relay's exit handler.
///
/// # Examples
///
/// ```no_run
/// # use relay_logger::prelude::*;
/// # let relay = Relay::new(Severity::Debug, "", Flags::NONE);
/// use relay_logger::fatal;
/// fatal!(relay, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($relay:expr, $($arg:tt)+) => {
        $relay.fatalf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Flags, Receiver, Relay, Severity};
    use crate::sinks::SharedBuffer;

    fn relay_with_buffer() -> (Relay, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let relay = Relay::new(Severity::Debug, "", Flags::NONE);
        relay.add_writer(buffer.clone(), Severity::Debug, "", Flags::NONE);
        (relay, buffer)
    }

    #[test]
    fn test_log_macro() {
        let (relay, buffer) = relay_with_buffer();
        log!(relay, Severity::Notice, "Test message");
        log!(relay, Severity::Error, "Formatted: {}", 42);
        assert_eq!(buffer.contents(), "[NOTICE] Test message\n[ERROR] Formatted: 42\n");
    }

    #[test]
    fn test_level_macros() {
        let (relay, buffer) = relay_with_buffer();
        emerg!(relay, "e{}", 0);
        alert!(relay, "a{}", 1);
        critical!(relay, "c{}", 2);
        error!(relay, "e{}", 3);
        warn!(relay, "w{}", 4);
        notice!(relay, "n{}", 5);
        info!(relay, "i{}", 6);
        debug!(relay, "d{}", 7);

        assert_eq!(
            buffer.contents(),
            "[EMERGENCY] e0\n[ALERT] a1\n[CRITICAL] c2\n[ERROR] e3\n\
             [WARNING] w4\n[NOTICE] n5\n[INFO] i6\n[DEBUG] d7\n"
        );
    }

    #[test]
    fn test_macros_respect_verbosity() {
        let (relay, buffer) = relay_with_buffer();
        relay.set_verbosity(Severity::Warning);
        info!(relay, "hidden");
        debug!(relay, "hidden");
        warn!(relay, "shown");
        assert_eq!(buffer.contents(), "[WARNING] shown\n");
    }

    #[test]
    fn test_macro_reports_call_site() {
        let (relay, buffer) = relay_with_buffer();
        relay.set_flags(Flags::SHORT_FILE, crate::MaskOp::Replace);

        let line = line!() + 1;
        info!(relay, "here");

        assert_eq!(buffer.contents(), format!("macros.rs:{}: [INFO] here\n", line));
    }

    #[test]
    fn test_fatal_macro() {
        let (relay, buffer) = relay_with_buffer();
        relay.set_exit_handler(|_| {});
        fatal!(relay, "Critical failure: {}", "system");
        assert_eq!(buffer.contents(), "[EMERGENCY] Critical failure: system\n");
    }
}
