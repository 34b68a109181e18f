use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// Formats accepted for a `remindAt` value without an explicit offset.
/// These are interpreted as wall-clock time in the configured offset.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a `remindAt` string into a timestamp in millis.
///
/// Values carrying an offset (`Z`, `+05:30`, ...) are honored as is. Values
/// without one are treated as local time in `local_offset`. Returns `None`
/// when the string matches none of the accepted formats, which means the
/// `Reminder` will never become due.
pub fn parse_remind_at(remind_at: &str, local_offset: &FixedOffset) -> Option<i64> {
    let remind_at = remind_at.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(remind_at) {
        return Some(datetime.timestamp_millis());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(remind_at, format).ok())
        .and_then(|naive| local_offset.from_local_datetime(&naive).single())
        .map(|datetime| datetime.timestamp_millis())
}

/// Parses an offset of the form `+05:30` / `-03:00` / `Z`
pub fn parse_utc_offset(offset: &str) -> Option<FixedOffset> {
    let offset = offset.trim();
    if offset == "Z" || offset == "z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match offset.chars().next()? {
        '+' => (1, &offset[1..]),
        '-' => (-1, &offset[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
