//! Severity level definitions
//!
//! The eight levels follow the syslog priorities of RFC 3164. A lower numeric
//! value is more urgent, so a receiver with verbosity `v` emits every message
//! whose severity `s` satisfies `v >= s`.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    #[serde(alias = "emerg")]
    Emergency = 0,
    Alert = 1,
    #[serde(alias = "crit")]
    Critical = 2,
    #[serde(alias = "err")]
    Error = 3,
    #[serde(alias = "warn")]
    Warning = 4,
    Notice = 5,
    Info = 6,
    #[default]
    Debug = 7,
}

impl Severity {
    /// Every level, most urgent first.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "EMERGENCY",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true when a receiver at this verbosity emits `severity`.
    #[inline]
    pub fn allows(self, severity: Severity) -> bool {
        self >= severity
    }

    /// The bracketed label that opens every rendered message, e.g. `[ERROR] `.
    pub fn label(&self, with_color: bool) -> String {
        let label = format!("[{}]", self.to_str());

        #[cfg(feature = "console")]
        let label = if with_color {
            use colored::Colorize;
            label.as_str().color(self.color_code()).to_string()
        } else {
            label
        };
        #[cfg(not(feature = "console"))]
        let _ = with_color;

        format!("{} ", label)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Emergency | Severity::Alert => BrightRed,
            Severity::Critical | Severity::Error => Red,
            Severity::Warning => Yellow,
            Severity::Notice => Cyan,
            Severity::Info => Green,
            Severity::Debug => Blue,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl TryFrom<u8> for Severity {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        Severity::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| LoggerError::InvalidSeverity(value.to_string()))
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity as u8
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, LoggerError> {
        match s.trim().to_uppercase().as_str() {
            "EMERGENCY" | "EMERG" => Ok(Severity::Emergency),
            "ALERT" => Ok(Severity::Alert),
            "CRITICAL" | "CRIT" => Ok(Severity::Critical),
            "ERROR" | "ERR" => Ok(Severity::Error),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "NOTICE" => Ok(Severity::Notice),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            other => match other.parse::<u8>() {
                Ok(n) => Severity::try_from(n),
                Err(_) => Err(LoggerError::InvalidSeverity(s.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_numeric_order() {
        let names: Vec<&str> = Severity::ALL.iter().map(|s| s.to_str()).collect();
        assert_eq!(
            names,
            ["EMERGENCY", "ALERT", "CRITICAL", "ERROR", "WARNING", "NOTICE", "INFO", "DEBUG"]
        );
        for (i, severity) in Severity::ALL.iter().enumerate() {
            assert_eq!(severity.as_u8() as usize, i);
        }
    }

    #[test]
    fn test_allows_boundaries() {
        assert!(Severity::Error.allows(Severity::Error));
        assert!(Severity::Error.allows(Severity::Emergency));
        assert!(!Severity::Error.allows(Severity::Warning));
        assert!(Severity::Debug.allows(Severity::Debug));
        assert!(!Severity::Emergency.allows(Severity::Alert));
    }

    #[test]
    fn test_parse_aliases_and_numbers() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Emerg".parse::<Severity>().unwrap(), Severity::Emergency);
        assert_eq!("crit".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("5".parse::<Severity>().unwrap(), Severity::Notice);
        assert!(matches!(
            "8".parse::<Severity>(),
            Err(LoggerError::InvalidSeverity(_))
        ));
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_try_from_out_of_range() {
        assert_eq!(Severity::try_from(0).unwrap(), Severity::Emergency);
        assert_eq!(Severity::try_from(7).unwrap(), Severity::Debug);
        assert!(Severity::try_from(8).is_err());
    }

    #[test]
    fn test_default_is_most_verbose() {
        assert_eq!(Severity::default(), Severity::Debug);
    }

    #[test]
    fn test_plain_label() {
        assert_eq!(Severity::Error.label(false), "[ERROR] ");
        assert_eq!(Severity::Warning.label(false), "[WARNING] ");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let parsed: Severity = serde_json::from_str("\"emergency\"").unwrap();
        assert_eq!(parsed, Severity::Emergency);
    }
}
