//! # Relay Logger
//!
//! A severity-leveled logging facade built from two kinds of receivers:
//! relays, which gate messages and fan them out, and collectors, which
//! render a header and write each message to a single sink.
//!
//! ## Features
//!
//! - **Eight Severities**: syslog-style levels from `EMERGENCY` to `DEBUG`
//! - **Fan-out Trees**: relays nest, each hop applying its own verbosity and prefix
//! - **Go-style Headers**: date, time, microseconds, UTC and caller file/line flags
//! - **Default Relay**: free functions log through a replaceable process-wide relay
//! - **Thread Safe**: receivers are shared as `Arc<dyn Receiver>`
//!
//! ## Example
//!
//! ```
//! use relay_logger::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! let relay = Relay::builder()
//!     .verbosity(Severity::Info)
//!     .prefix("api")
//!     .writer(buffer.clone(), Severity::Debug, "", Flags::NONE)
//!     .build();
//!
//! relay.warnf(format_args!("{} retries left", 2));
//! relay.debug(&[&"dropped by the relay"]);
//!
//! assert_eq!(buffer.contents(), "[WARNING] api 2 retries left\n");
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Caller, Collector, CollectorConfig, Flags, LoggerError, MaskOp, Receiver, Relay,
        RelayBuilder, RelayConfig, Result, Severity, Sink, SinkConfig,
    };
    pub use crate::sinks::{FileSink, SharedBuffer};
}

pub use crate::core::{
    Caller, Collector, CollectorConfig, ExitHandler, Flags, LoggerError, MaskOp, Receiver, Relay,
    RelayBuilder, RelayConfig, Result, Severity, Sink, SinkConfig, DEFAULT_CALL_DEPTH,
    FATAL_EXIT_CODE,
};
pub use crate::global::*;
pub use crate::sinks::{FileSink, SharedBuffer};
