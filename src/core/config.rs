//! Declarative relay configuration
//!
//! A [`RelayConfig`] describes a relay tree in JSON:
//!
//! ```json
//! {
//!   "verbosity": "info",
//!   "prefix": "api",
//!   "collectors": [
//!     { "sink": "stderr", "verbosity": "warning", "flags": "std|shortfile" },
//!     { "sink": { "file": "/var/log/api.log" }, "flags": "date|time|utc" }
//!   ]
//! }
//! ```

use super::{
    collector::Collector,
    error::{LoggerError, Result},
    flags::Flags,
    receiver::Sink,
    relay::{Relay, DEFAULT_CALL_DEPTH},
    severity::Severity,
};
use crate::sinks::FileSink;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a configured collector writes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkConfig {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

impl SinkConfig {
    pub fn open(&self) -> Result<Sink> {
        Ok(match self {
            SinkConfig::Stderr => Box::new(std::io::stderr()),
            SinkConfig::Stdout => Box::new(std::io::stdout()),
            SinkConfig::File(path) if path.as_os_str().is_empty() => {
                return Err(LoggerError::config("collector", "file sink path is empty"));
            }
            SinkConfig::File(path) => Box::new(FileSink::open(path)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorConfig {
    pub sink: SinkConfig,
    pub verbosity: Severity,
    pub prefix: String,
    pub flags: Flags,
}

impl CollectorConfig {
    pub fn build(&self) -> Result<Collector> {
        Ok(Collector::from_sink(
            self.sink.open()?,
            self.verbosity,
            self.prefix.clone(),
            self.flags,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    pub verbosity: Severity,
    pub prefix: String,
    pub flags: Flags,
    pub call_depth: usize,
    /// Collectors, registered first and in order
    pub collectors: Vec<CollectorConfig>,
    /// Nested relays, registered after the collectors
    pub relays: Vec<RelayConfig>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            verbosity: Severity::Debug,
            prefix: String::new(),
            flags: Flags::NONE,
            call_depth: DEFAULT_CALL_DEPTH,
            collectors: Vec::new(),
            relays: Vec::new(),
        }
    }
}

impl RelayConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading relay configuration",
                path.display().to_string(),
                e,
            )
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Open every sink and assemble the relay tree.
    pub fn build(&self) -> Result<Relay> {
        if self.call_depth == 0 {
            return Err(LoggerError::config(
                "relay",
                "call_depth must count the convenience method frame",
            ));
        }
        let mut builder = Relay::builder()
            .verbosity(self.verbosity)
            .prefix(self.prefix.clone())
            .flags(self.flags)
            .call_depth(self.call_depth);
        for collector in &self.collectors {
            builder = builder.receiver(Arc::new(collector.build()?));
        }
        for relay in &self.relays {
            builder = builder.receiver(Arc::new(relay.build()?));
        }
        Ok(builder.build())
    }
}
