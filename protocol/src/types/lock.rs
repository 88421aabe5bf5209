//! # Output Locks
//!
//! A lock is a single `u64`. Below [`LOCKTIME_THRESHOLD`] it is a block
//! height, at or above it a unix timestamp. Humans don't think in either,
//! so [`OutputLock`] accepts a handful of friendlier spellings:
//!
//! | input                    | meaning                                   |
//! |--------------------------|-------------------------------------------|
//! | `42`, `"1549483822"`     | the value itself                          |
//! | `"+7d12h5s"`             | now (or a given reference) plus a duration |
//! | `"30/11/2020"`           | midnight of that day                      |
//! | `"2020/11/30"`           | same, year first                          |
//! | `"30/11/2020 23:59[:59]"`| that moment                               |
//! | `"11/30"`                | month/day in the reference year           |
//!
//! Dates are interpreted in a caller-supplied timezone. The `FromStr` and
//! JSON paths use the local zone of the machine, applying the UTC offset in
//! force on the target date rather than the current one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone};
use serde_json::Value;

use super::error::TypeError;
use super::json::as_u64;
use crate::config::LOCKTIME_THRESHOLD;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputLock(u64);

impl OutputLock {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// `true` when the lock is a unix timestamp rather than a block height.
    pub fn is_timestamp(&self) -> bool {
        self.0 >= LOCKTIME_THRESHOLD
    }

    /// Parse `input` relative to `current_timestamp`, reading dates in `tz`.
    ///
    /// A wall-clock time that occurs twice (DST fall-back) resolves to the
    /// earlier instant. One that never occurs (spring-forward gap) is an error.
    pub fn parse_with<Tz: TimeZone>(
        input: &str,
        current_timestamp: u64,
        tz: Tz,
    ) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidLock(input.to_string());
        let s = input.trim().trim_matches(|c| c == '\'' || c == '"').trim();

        if s.is_empty() {
            return Ok(Self(0));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return s.parse().map(Self).map_err(|_| invalid());
        }
        if let Some(duration) = s.strip_prefix('+') {
            let seconds = parse_duration(duration).ok_or_else(invalid)?;
            return current_timestamp
                .checked_add(seconds)
                .map(Self)
                .ok_or_else(invalid);
        }

        let (date_part, time_part) = match s.split_once(' ') {
            Some((d, t)) => (d, Some(t.trim())),
            None => (s, None),
        };
        let reference = i64::try_from(current_timestamp).map_err(|_| invalid())?;
        let reference_year = tz
            .timestamp_opt(reference, 0)
            .single()
            .map(|dt| dt.year())
            .ok_or_else(invalid)?;
        let date = parse_date(date_part, reference_year).ok_or_else(invalid)?;
        let time = match time_part {
            Some(t) => parse_time(t).ok_or_else(invalid)?,
            None => NaiveTime::from_hms_opt(0, 0, 0).ok_or_else(invalid)?,
        };

        let moment = tz
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .ok_or_else(invalid)?;
        u64::try_from(moment.timestamp()).map(Self).map_err(|_| invalid())
    }

    /// Accepts a JSON integer or any string form [`OutputLock`] understands.
    pub fn from_json(value: &Value, field: &str) -> Result<Self, TypeError> {
        match value {
            Value::String(s) => s.parse(),
            other => as_u64(other, field).map(Self),
        }
    }

    pub fn json(&self) -> Value {
        Value::from(self.0)
    }

    /// The lock as a date in `tz`, if it is a timestamp.
    pub fn as_datetime<Tz: TimeZone>(&self, tz: Tz) -> Option<DateTime<Tz>> {
        if !self.is_timestamp() {
            return None;
        }
        tz.timestamp_opt(i64::try_from(self.0).ok()?, 0).single()
    }
}

impl From<u64> for OutputLock {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OutputLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OutputLock {
    type Err = TypeError;

    /// Parses relative to the current time, in the local timezone.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let current = u64::try_from(Local::now().timestamp()).unwrap_or_default();
        Self::parse_with(s, current, Local)
    }
}

/// `7d12h5s`, `2w`, `90m`. Units may appear in any order.
fn parse_duration(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    let mut total = 0u64;
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c {
            'w' => SECONDS_PER_WEEK,
            'd' => SECONDS_PER_DAY,
            'h' => SECONDS_PER_HOUR,
            'm' => SECONDS_PER_MINUTE,
            's' => 1,
            _ => return None,
        };
        let amount: u64 = digits.parse().ok()?;
        total = total.checked_add(amount.checked_mul(unit)?)?;
        digits.clear();
    }
    // A bare trailing number counts as seconds.
    if !digits.is_empty() {
        total = total.checked_add(digits.parse().ok()?)?;
    }
    Some(total)
}

/// `dd/mm/yyyy`, `yyyy/mm/dd`, `yy/mm/dd` or a yearless `mm/dd`.
fn parse_date(s: &str, reference_year: i32) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('/').map(str::trim).collect();

    let (year, month, day) = match parts.as_slice() {
        &[m, d] if is_short(m) && is_short(d) => (reference_year, number(m)?, number(d)?),
        &[y, m, d] if y.len() == 4 && is_short(m) && is_short(d) => {
            (number(y)? as i32, number(m)?, number(d)?)
        }
        &[d, m, y] if y.len() == 4 && is_short(m) && is_short(d) => {
            (number(y)? as i32, number(m)?, number(d)?)
        }
        &[y, m, d] if is_short(y) && is_short(m) && is_short(d) => {
            let yy = number(y)? as i32;
            // Two-digit years follow the POSIX pivot: 69-99 → 19xx, 00-68 → 20xx.
            let year = if yy >= 69 { 1900 + yy } else { 2000 + yy };
            (year, number(m)?, number(d)?)
        }
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn is_short(part: &str) -> bool {
    (1..=2).contains(&part.len())
}

fn number(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 4 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// `HH:MM` or `HH:MM:SS`.
fn parse_time(s: &str) -> Option<NaiveTime> {
    let parts: Vec<u32> = s
        .split(':')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [h, m] => NaiveTime::from_hms_opt(*h, *m, 0),
        [h, m, sec] => NaiveTime::from_hms_opt(*h, *m, *sec),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDateTime};

    /// UTC+2 from April through September, UTC+1 otherwise.
    #[derive(Debug, Clone, Copy)]
    struct SeasonalZone;

    impl SeasonalZone {
        fn offset_for_month(month: u32) -> FixedOffset {
            let hours = if (4..=9).contains(&month) { 2 } else { 1 };
            FixedOffset::east_opt(hours * 3600).unwrap()
        }
    }

    impl TimeZone for SeasonalZone {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SeasonalZone
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::offset_for_month(local.month()))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::offset_for_month(local.month()))
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            Self::offset_for_month(utc.month())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            Self::offset_for_month(utc.month())
        }
    }

    fn utc_plus_one() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    fn lock(s: &str) -> u64 {
        OutputLock::parse_with(s, 1, utc_plus_one()).unwrap().value()
    }

    #[test]
    fn test_plain_integers() {
        assert_eq!(OutputLock::default().value(), 0);
        assert_eq!(lock("0"), 0);
        assert_eq!(lock("1549483822"), 1549483822);
        assert_eq!(lock(""), 0);
    }

    #[test]
    fn test_relative_durations() {
        assert_eq!(lock("+7d"), 604801);
        assert_eq!(lock("+7d12h5s"), 648006);
        assert_eq!(lock("+1w"), 604801);
        assert_eq!(lock("+90m"), 5401);
    }

    #[test]
    fn test_absolute_dates() {
        assert_eq!(lock("30/11/2020"), 1606690800);
        assert_eq!(lock("2020/11/30"), 1606690800);
        assert_eq!(lock("30/11/2020 23:59:59"), 1606777199);
        assert_eq!(lock("30/11/2020 23:59"), 1606777140);
    }

    #[test]
    fn test_yearless_date_is_month_first() {
        // Reference timestamp falls in 2020.
        let now = 1_600_000_000;
        let a = OutputLock::parse_with("11/30", now, utc_plus_one()).unwrap();
        let b = OutputLock::parse_with("30/11/2020", now, utc_plus_one()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dates_take_the_offset_of_their_own_season() {
        // reference time in summer, target date in winter and the reverse
        let summer_now = 1_593_468_000;
        let winter_now = 1_606_690_800;
        for now in [summer_now, winter_now] {
            let june = OutputLock::parse_with("30/06/2020", now, SeasonalZone).unwrap();
            let november = OutputLock::parse_with("30/11/2020", now, SeasonalZone).unwrap();
            assert_eq!(june.value(), 1_593_468_000);
            assert_eq!(november.value(), 1_606_690_800);
        }

        let lock = OutputLock::new(1_606_690_800);
        let date = lock.as_datetime(SeasonalZone).unwrap();
        assert_eq!(date.format("%d/%m/%Y %H:%M %:z").to_string(), "30/11/2020 00:00 +01:00");
    }

    #[test]
    fn test_local_zone_uses_offset_of_target_date() {
        for (input, date) in [
            ("30/06/2020", NaiveDate::from_ymd_opt(2020, 6, 30)),
            ("30/11/2020 23:59", NaiveDate::from_ymd_opt(2020, 11, 30)),
        ] {
            let time = if input.contains(' ') {
                NaiveTime::from_hms_opt(23, 59, 0)
            } else {
                NaiveTime::from_hms_opt(0, 0, 0)
            };
            let naive = date.unwrap().and_time(time.unwrap());
            let expected = Local.from_local_datetime(&naive).earliest().unwrap().timestamp();
            assert_eq!(input.parse::<OutputLock>().unwrap().value(), expected as u64, "{input}");
        }
    }

    #[test]
    fn test_rejects_garbage() {
        for s in ["+", "+7x", "31/02/2020", "30/11/2020 25:00", "tomorrow", "1/2/3/4"] {
            assert!(OutputLock::parse_with(s, 1, utc_plus_one()).is_err(), "{s:?}");
        }
    }

    #[test]
    fn test_is_timestamp() {
        assert!(!OutputLock::new(LOCKTIME_THRESHOLD - 1).is_timestamp());
        assert!(OutputLock::new(LOCKTIME_THRESHOLD).is_timestamp());
        assert!(OutputLock::new(42).as_datetime(utc_plus_one()).is_none());
    }

    #[test]
    fn test_json_accepts_numbers_and_strings() {
        let n = OutputLock::from_json(&Value::from(500_000_000u64), "locktime").unwrap();
        assert_eq!(n.value(), 500_000_000);
        assert_eq!(n.json(), Value::from(500_000_000u64));
        let s = OutputLock::from_json(&Value::String("42".into()), "locktime").unwrap();
        assert_eq!(s.value(), 42);
    }
}
