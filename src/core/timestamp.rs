//! Date and time header fields
//!
//! Renders the `YYYY/MM/DD HH:MM:SS.uuuuuu ` portion of a collector line as
//! selected by [`Flags::DATE`], [`Flags::TIME`] and [`Flags::MICROSECONDS`],
//! in local time unless [`Flags::UTC`] is set.

use super::flags::Flags;
use chrono::{DateTime, Local, Utc};

const DATE_FORMAT: &str = "%Y/%m/%d ";
const TIME_FORMAT: &str = "%H:%M:%S";
const MICROS_FORMAT: &str = "%H:%M:%S%.6f";

/// Returns true if `flags` asks for any date or time field.
#[inline]
pub fn wants_timestamp(flags: Flags) -> bool {
    flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS)
}

/// Append the date/time header for `now` to `buf`.
pub fn write_timestamp(buf: &mut String, flags: Flags, now: &DateTime<Utc>) {
    if !wants_timestamp(flags) {
        return;
    }
    if flags.contains(Flags::UTC) {
        push_fields(buf, flags, now);
    } else {
        push_fields(buf, flags, &now.with_timezone(&Local));
    }
}

fn push_fields<Tz>(buf: &mut String, flags: Flags, datetime: &DateTime<Tz>)
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    use std::fmt::Write;

    if flags.contains(Flags::DATE) {
        let _ = write!(buf, "{}", datetime.format(DATE_FORMAT));
    }
    if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
        let format = if flags.contains(Flags::MICROSECONDS) {
            MICROS_FORMAT
        } else {
            TIME_FORMAT
        };
        let _ = write!(buf, "{} ", datetime.format(format));
    }
}
