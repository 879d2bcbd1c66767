//! Timestamp parsing and fixed-offset calendar conversion.
//!
//! Everything here works on plain UTC epoch milliseconds plus a fixed offset
//! in minutes. There is no timezone database: "local time" at an offset is
//! the instant shifted by that offset and read back as UTC.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;

/// Canonical display format for row date strings.
pub const DATE_FORMAT_HELP: &str = "YYYY-MM-DD HH:mm:ss";

/// Conversion failure kinds.
///
/// These carry no display text; the UI maps them to localized messages via
/// `i18n::Strings`. The `Display` impl is the English fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    /// Raw timestamp field was blank.
    EmptyInput,
    /// Raw timestamp field was not numeric.
    NotANumber,
    /// Numeric value does not map to a representable instant.
    UnparseableTime,
    /// Row text does not match `YYYY-MM-DD HH:mm:ss`.
    BadDateFormat,
    /// Edit source referenced a row that no longer exists.
    RowNotFound,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::EmptyInput => write!(f, "Please enter a timestamp"),
            ConvertError::NotANumber => write!(f, "Not a valid number"),
            ConvertError::UnparseableTime => write!(f, "Cannot parse time"),
            ConvertError::BadDateFormat => write!(f, "Format should be {DATE_FORMAT_HELP}"),
            ConvertError::RowNotFound => write!(f, "Timezone row no longer exists"),
        }
    }
}

/// Wall-clock reading of an instant at some fixed offset.
///
/// Fields are plain integers with no range invariant: [`to_instant`] accepts
/// out-of-range values (month 13, day 32) and carries them into higher
/// fields, the same overflow ordinary calendar constructors provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

/// Parse raw timestamp text as UTC epoch milliseconds.
///
/// Inputs of up to 10 characters are whole seconds, longer inputs are
/// milliseconds. The cut is by typed length, not magnitude, so a
/// 10-character negative numeral still counts as seconds; users rely on
/// this exact rule.
pub fn parse_timestamp(raw: &str) -> Result<i64, ConvertError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let numeric: f64 = trimmed.parse().map_err(|_| ConvertError::NotANumber)?;
    if !numeric.is_finite() {
        return Err(ConvertError::NotANumber);
    }

    let is_seconds = trimmed.len() <= 10;
    let millis = if is_seconds { numeric * 1000.0 } else { numeric };
    // Fractional milliseconds truncate toward zero.
    let millis = millis.trunc();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return Err(ConvertError::UnparseableTime);
    }
    let millis = millis as i64;
    if DateTime::from_timestamp_millis(millis).is_none() {
        return Err(ConvertError::UnparseableTime);
    }
    Ok(millis)
}

/// Shift an instant by its offset and read the result as naive UTC.
///
/// Instants close enough to the supported calendar edge that the shift
/// escapes it clamp to the edge instead of failing.
fn shifted_naive(instant_ms: i64, offset_minutes: i32) -> NaiveDateTime {
    let shifted = instant_ms.saturating_add(i64::from(offset_minutes) * 60_000);
    match DateTime::from_timestamp_millis(shifted) {
        Some(dt) => dt.naive_utc(),
        None if shifted > 0 => NaiveDateTime::MAX,
        None => NaiveDateTime::MIN,
    }
}

/// Read the calendar fields of an instant local to the given offset.
pub fn to_fields(instant_ms: i64, offset_minutes: i32) -> CalendarFields {
    let dt = shifted_naive(instant_ms, offset_minutes);
    CalendarFields {
        year: i64::from(dt.year()),
        month: i64::from(dt.month()),
        day: i64::from(dt.day()),
        hour: i64::from(dt.hour()),
        minute: i64::from(dt.minute()),
        second: i64::from(dt.second()),
    }
}

/// Format an instant as `YYYY-MM-DD HH:mm:ss` local to the given offset.
///
/// The year prints with however many digits it has; every other field is
/// zero-padded to two.
pub fn format_date_string(instant_ms: i64, offset_minutes: i32) -> String {
    let f = to_fields(instant_ms, offset_minutes);
    format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        f.year, f.month, f.day, f.hour, f.minute, f.second
    )
}

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})[ T]([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2})$")
        .expect("date pattern compiles")
});

/// Parse row text in the `YYYY-MM-DD HH:mm:ss` shape.
///
/// `/` works as the date separator and `T` between date and time. Values
/// are extracted without range checks; normalization happens in
/// [`to_instant`].
pub fn parse_date_string(text: &str) -> Result<CalendarFields, ConvertError> {
    let caps = DATE_RE
        .captures(text.trim())
        .ok_or(ConvertError::BadDateFormat)?;
    let field = |i: usize| -> Result<i64, ConvertError> {
        caps[i].parse().map_err(|_| ConvertError::BadDateFormat)
    };
    Ok(CalendarFields {
        year: field(1)?,
        month: field(2)?,
        day: field(3)?,
        hour: field(4)?,
        minute: field(5)?,
        second: field(6)?,
    })
}

/// Convert calendar fields local to an offset back to UTC epoch
/// milliseconds.
///
/// Out-of-range fields carry into higher ones: month 13 rolls into January
/// of the next year, day 32 into the next month, hour 25 into the next day.
/// Fields that normalize outside the supported calendar range are an error.
pub fn to_instant(fields: &CalendarFields, offset_minutes: i32) -> Result<i64, ConvertError> {
    let month0 = fields.month - 1;
    let year = fields.year + month0.div_euclid(12);
    let month = month0.rem_euclid(12) + 1;

    let year = i32::try_from(year).map_err(|_| ConvertError::UnparseableTime)?;
    let first = NaiveDate::from_ymd_opt(year, month as u32, 1)
        .ok_or(ConvertError::UnparseableTime)?;

    let dt = Some(first.and_time(NaiveTime::MIN))
        .zip(Duration::try_days(fields.day - 1))
        .and_then(|(dt, d)| dt.checked_add_signed(d))
        .zip(Duration::try_hours(fields.hour))
        .and_then(|(dt, d)| dt.checked_add_signed(d))
        .zip(Duration::try_minutes(fields.minute))
        .and_then(|(dt, d)| dt.checked_add_signed(d))
        .zip(Duration::try_seconds(fields.second))
        .and_then(|(dt, d)| dt.checked_add_signed(d))
        .ok_or(ConvertError::UnparseableTime)?;

    Ok(dt.and_utc().timestamp_millis() - i64::from(offset_minutes) * 60_000)
}

/// Day segment of the offset-local hour, used for row accent colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Morning,
    Afternoon,
    Dusk,
    Night,
}

/// Classify an instant into its local day segment.
pub fn day_phase(instant_ms: i64, offset_minutes: i32) -> DayPhase {
    match to_fields(instant_ms, offset_minutes).hour {
        6..=11 => DayPhase::Morning,
        12..=17 => DayPhase::Afternoon,
        18..=20 => DayPhase::Dusk,
        _ => DayPhase::Night,
    }
}
