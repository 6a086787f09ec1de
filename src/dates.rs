use thiserror::Error;
use time::{
    format_description::FormatItem, macros::format_description, Date, Duration, Month, Weekday,
};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Months per year, used when carrying an out-of-range month index into the
/// year
const MONTHS_IN_YEAR: i64 = 12;

/// Day of the month that is guaranteed to overflow every month.  The number
/// of days in a month is this minus the day-of-month that the overflow lands
/// on.
const OVERFLOW_DAY: u8 = 40;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

/// Returns the zero-based index of `month` (January is 0)
pub(crate) fn month_index0(month: Month) -> i32 {
    i32::from(u8::from(month)) - 1
}

/// Construct the calendar date for `year`, zero-based `month0`, and `day`,
/// carrying out-of-range month and day fields into the neighboring months and
/// years.  Day 0 is the last day of the previous month, day 32 of a 31-day
/// month is the 1st of the next one, month index 12 is January of the next
/// year, and so on.
///
/// # Errors
///
/// Fails if the resulting date lies outside the range of dates representable
/// by [`time::Date`].
pub fn normalize_calendar_date(year: i32, month0: i32, day: i32) -> Result<Date, OutOfTimeError> {
    let months = i64::from(year) * MONTHS_IN_YEAR + i64::from(month0);
    let year = i32::try_from(months.div_euclid(MONTHS_IN_YEAR)).map_err(|_| OutOfTimeError)?;
    let month = u8::try_from(months.rem_euclid(MONTHS_IN_YEAR) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(OutOfTimeError)?;
    Date::from_calendar_date(year, month, 1)
        .ok()
        .and_then(|first| first.checked_add(Duration::days(i64::from(day) - 1)))
        .ok_or(OutOfTimeError)
}

/// Returns the number of days in the given month by letting day 40 of the
/// month overflow into the following month.
///
/// # Errors
///
/// Fails if the overflow would leave the range of representable dates, which
/// only happens for the last month of the calendar.
pub fn days_in_month(year: i32, month: Month) -> Result<u8, OutOfTimeError> {
    let overflow = normalize_calendar_date(year, month_index0(month), i32::from(OVERFLOW_DAY))?;
    // Day 40 can overflow by at most 12 days, so this never goes negative.
    Ok(OVERFLOW_DAY - overflow.day())
}

/// Format a date as `YYYY-MM-DD`, or return an empty string if there is no
/// date
pub fn format_date(date: Option<Date>) -> String {
    date.and_then(|d| d.format(&YMD_FMT).ok()).unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` string as produced by [`format_date()`]
///
/// # Errors
///
/// Fails if `s` is not a valid date in `YYYY-MM-DD` format.
pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

/// Label shown in the picker's text field for a (possibly partial) range
pub fn range_label(start: Option<Date>, end: Option<Date>) -> String {
    format!("{} ~ {}", format_date(start), format_date(end))
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
