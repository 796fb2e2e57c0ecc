//! Output format flags and the masking operations that compose them

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, BitXor, Not};
use std::str::FromStr;

/// Bitset selecting the header fields a collector writes before each message.
///
/// # Examples
///
/// ```
/// use relay_logger::Flags;
///
/// let flags = Flags::STD | Flags::SHORT_FILE;
/// assert!(flags.contains(Flags::DATE));
/// assert_eq!(flags.to_string(), "date|time|shortfile");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// Local date: `2009/01/23`
    pub const DATE: Flags = Flags(1 << 0);
    /// Local time: `01:23:23`
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`; implies `TIME`
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full source path and line: `/a/b/c/d.rs:23`
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final path element and line: `d.rs:23`; overrides `LONG_FILE`
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Date and time in UTC rather than the local time zone
    pub const UTC: Flags = Flags(1 << 5);
    /// Move the collector prefix from the start of the line to just before the message
    pub const MSG_PREFIX: Flags = Flags(1 << 6);
    /// Color the severity label (ignored without the `console` feature)
    pub const COLOR: Flags = Flags(1 << 7);
    /// Initial values for a standard logger
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    const NAMES: [(&'static str, Flags); 8] = [
        ("date", Flags::DATE),
        ("time", Flags::TIME),
        ("microseconds", Flags::MICROSECONDS),
        ("longfile", Flags::LONG_FILE),
        ("shortfile", Flags::SHORT_FILE),
        ("utc", Flags::UTC),
        ("msgprefix", Flags::MSG_PREFIX),
        ("color", Flags::COLOR),
    ];

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Flags(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Flags {
    type Output = Flags;
    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Flags;
    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

impl BitXor for Flags {
    type Output = Flags;
    fn bitxor(self, rhs: Flags) -> Flags {
        Flags(self.0 ^ rhs.0)
    }
}

impl Not for Flags {
    type Output = Flags;
    fn not(self) -> Flags {
        Flags(!self.0)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut known = Flags::NONE;
        for (name, flag) in Flags::NAMES {
            known |= flag;
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        let unknown = self.0 & !known.0;
        if unknown != 0 {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{:#x}", unknown)?;
        }
        Ok(())
    }
}

impl FromStr for Flags {
    type Err = LoggerError;

    /// Parses a `|`- or `,`-separated list of flag names, e.g. `"std|shortfile"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::NONE;
        for part in s.split(['|', ',']).map(str::trim).filter(|p| !p.is_empty()) {
            let lower = part.to_lowercase();
            if lower == "std" {
                flags |= Flags::STD;
                continue;
            }
            if lower == "none" {
                continue;
            }
            match Flags::NAMES.iter().find(|(name, _)| *name == lower) {
                Some((_, flag)) => flags |= *flag,
                None => return Err(LoggerError::InvalidFlag(part.to_string())),
            }
        }
        Ok(flags)
    }
}

impl From<Flags> for String {
    fn from(flags: Flags) -> Self {
        flags.to_string()
    }
}

impl TryFrom<String> for Flags {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How a `set_flags` call combines the new flag value with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskOp {
    /// Discard the current flags and use the new value
    #[default]
    Replace,
    And,
    Or,
    Xor,
    AndNot,
}

impl MaskOp {
    #[must_use]
    pub fn apply(self, current: Flags, flag: Flags) -> Flags {
        match self {
            MaskOp::Replace => flag,
            MaskOp::And => current & flag,
            MaskOp::Or => current | flag,
            MaskOp::Xor => current ^ flag,
            MaskOp::AndNot => current & !flag,
        }
    }
}
