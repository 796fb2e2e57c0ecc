//! The process-wide default relay
//!
//! The free functions in this module mirror every [`Relay`] method and
//! delegate to a lazily built default instance. Out of the box it holds one
//! collector that writes to standard error at [`Severity::Debug`] with
//! `SHORT_FILE | STD` flags. Replace it with [`set_default_relay`] to route
//! top-level calls elsewhere, e.g. to a capturing relay in tests.
//!
//! # Example
//!
//! ```
//! use relay_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let buffer = SharedBuffer::new();
//! let relay = Relay::new(Severity::Debug, "", Flags::NONE);
//! relay.add_writer(buffer.clone(), Severity::Info, "", Flags::NONE);
//! let previous = relay_logger::set_default_relay(Arc::new(relay));
//!
//! relay_logger::warn(&[&"cache miss"]);
//! relay_logger::debug(&[&"filtered by the collector"]);
//! assert_eq!(buffer.contents(), "[WARNING] cache miss\n");
//!
//! relay_logger::set_default_relay(previous);
//! ```

use crate::core::{Caller, Collector, Flags, MaskOp, Receiver, Relay, Result, Severity, Sink};
use parking_lot::RwLock;
use std::fmt::{self, Display};
use std::sync::{Arc, OnceLock};

/// Base call depth of the default relay.
pub const STD_CALL_DEPTH: usize = 3;

/// Environment variable read when the default relay is first built; holds a
/// severity name (`"warning"`) or number (`"4"`).
pub const VERBOSITY_ENV: &str = "RELAY_LOG_VERBOSITY";

static DEFAULT_RELAY: OnceLock<RwLock<Arc<Relay>>> = OnceLock::new();

/// Build a relay configured like the initial default instance.
pub fn standard_relay() -> Relay {
    let verbosity = verbosity_from_env().unwrap_or(Severity::Debug);
    let relay = Relay::with_call_depth(verbosity, "", Flags::NONE, STD_CALL_DEPTH);
    relay.add_receiver(Arc::new(Collector::stderr(
        Severity::Debug,
        Flags::SHORT_FILE | Flags::STD,
    )));
    relay
}

fn verbosity_from_env() -> Option<Severity> {
    let value = std::env::var(VERBOSITY_ENV).ok()?;
    match value.parse() {
        Ok(verbosity) => Some(verbosity),
        Err(e) => {
            eprintln!("[RELAY ERROR] Ignoring {}: {}", VERBOSITY_ENV, e);
            None
        }
    }
}

fn slot() -> &'static RwLock<Arc<Relay>> {
    DEFAULT_RELAY.get_or_init(|| RwLock::new(Arc::new(standard_relay())))
}

/// The current default relay, built on first use.
pub fn default_relay() -> Arc<Relay> {
    slot().read().clone()
}

/// Install `relay` as the default and return the one it replaces.
pub fn set_default_relay(relay: Arc<Relay>) -> Arc<Relay> {
    std::mem::replace(&mut *slot().write(), relay)
}

/// Reinstall a fresh [`standard_relay`] and return the one it replaces.
pub fn reset_default_relay() -> Arc<Relay> {
    set_default_relay(Arc::new(standard_relay()))
}

macro_rules! delegate_args {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Calls [`Relay::", stringify!($name), "`] on the default relay.")]
            #[track_caller]
            pub fn $name(args: &[&dyn Display]) {
                default_relay().$name(args);
            }
        )+
    };
}

macro_rules! delegate_format {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Calls [`Relay::", stringify!($name), "`] on the default relay.")]
            #[track_caller]
            pub fn $name(args: fmt::Arguments<'_>) {
                default_relay().$name(args);
            }
        )+
    };
}

delegate_args!(
    emerg, emergln, alert, alertln, critical, criticalln, error, errorln, warn, warnln, notice,
    noticeln, info, infoln, debug, debugln, print, println, fatal, fatalln,
);

delegate_format!(
    emergf, alertf, criticalf, errorf, warnf, noticef, infof, debugf, printf, fatalf,
);

/// Calls [`Relay::panic`] on the default relay.
#[track_caller]
pub fn panic(args: &[&dyn Display]) -> ! {
    default_relay().panic(args)
}

/// Calls [`Relay::panicf`] on the default relay.
#[track_caller]
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    default_relay().panicf(args)
}

/// Calls [`Relay::panicln`] on the default relay.
#[track_caller]
pub fn panicln(args: &[&dyn Display]) -> ! {
    default_relay().panicln(args)
}

/// Replace the default relay's flags, propagating to its receivers.
pub fn set_flags(flags: Flags) {
    default_relay().set_flags(flags, MaskOp::Replace);
}

pub fn flags() -> Flags {
    default_relay().flags()
}

pub fn set_prefix(prefix: &str) {
    default_relay().set_prefix(prefix);
}

pub fn prefix() -> String {
    default_relay().prefix()
}

pub fn set_verbosity(verbosity: Severity) {
    default_relay().set_verbosity(verbosity);
}

/// Redirect the default relay's first receiver to `sink`. Does nothing if the
/// relay has no receivers.
pub fn set_output(sink: Sink) {
    if let Some(receiver) = default_relay().receiver(0) {
        receiver.set_output(sink);
    }
}

/// Write a rendered line through every receiver of the default relay.
#[track_caller]
pub fn output(line: &str) -> Result<()> {
    let relay = default_relay();
    relay.output(Caller::at_depth(relay.call_depth()), line)
}
