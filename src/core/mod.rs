//! Core relay types and traits

pub mod caller;
pub mod collector;
pub mod config;
pub mod error;
pub mod flags;
pub mod receiver;
pub mod relay;
pub mod severity;
pub mod timestamp;

pub use caller::Caller;
pub use collector::Collector;
pub use config::{CollectorConfig, RelayConfig, SinkConfig};
pub use error::{LoggerError, Result};
pub use flags::{Flags, MaskOp};
pub use receiver::{Receiver, Sink};
pub use relay::{ExitHandler, Relay, RelayBuilder, DEFAULT_CALL_DEPTH, FATAL_EXIT_CODE};
pub use severity::Severity;
