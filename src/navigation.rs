use crate::dates::{month_index0, normalize_calendar_date, OutOfTimeError};
use std::ops::RangeInclusive;
use thiserror::Error;
use time::{Date, Month};

pub const DEFAULT_YEAR_SELECT_FROM: i32 = 2010;

pub const DEFAULT_YEAR_SELECT_TO: i32 = 2050;

/// The year & month currently displayed by the picker
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: Month) -> YearMonth {
        YearMonth { year, month }
    }

    pub fn containing(date: Date) -> YearMonth {
        YearMonth::new(date.year(), date.month())
    }

    /// # Errors
    ///
    /// Fails if the year overflows.
    pub fn shift_years(self, offset: i32) -> Result<YearMonth, OutOfTimeError> {
        let year = self.year.checked_add(offset).ok_or(OutOfTimeError)?;
        Ok(YearMonth::new(year, self.month))
    }

    /// Move `offset` months forwards (or backwards, if negative), rolling
    /// over into the next or previous year as needed
    ///
    /// # Errors
    ///
    /// Fails if the resulting month lies outside the range of representable
    /// dates.
    pub fn shift_months(self, offset: i32) -> Result<YearMonth, OutOfTimeError> {
        let month0 = month_index0(self.month)
            .checked_add(offset)
            .ok_or(OutOfTimeError)?;
        normalize_calendar_date(self.year, month0, 1).map(YearMonth::containing)
    }

    /// Jump to the given year and month, where the month is numbered from 1
    ///
    /// # Errors
    ///
    /// Fails if `month` is not in the range 1 through 12.
    pub fn jump_to(year: i32, month: u8) -> Result<YearMonth, NavigationError> {
        let month = Month::try_from(month).map_err(|_| NavigationError::InvalidMonth(month))?;
        Ok(YearMonth::new(year, month))
    }
}

/// The span of years offered by the year/month quick-select
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearSelect {
    pub from: i32,
    pub to: i32,
}

impl YearSelect {
    pub fn new(from: i32, to: i32) -> YearSelect {
        YearSelect { from, to }
    }

    /// Every selectable year in ascending order.  Empty when `from > to`.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.from..=self.to
    }

    pub fn is_empty(&self) -> bool {
        self.years().is_empty()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    pub fn entries(&self, current: YearMonth) -> impl Iterator<Item = YearEntry> {
        self.years().map(move |year| YearEntry {
            year,
            selected_month: (year == current.year).then_some(current.month),
        })
    }
}

impl Default for YearSelect {
    fn default() -> YearSelect {
        YearSelect::new(DEFAULT_YEAR_SELECT_FROM, DEFAULT_YEAR_SELECT_TO)
    }
}

/// One row of the quick-select: a year and, if it is the displayed year, the
/// displayed month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearEntry {
    pub year: i32,
    pub selected_month: Option<Month>,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum NavigationError {
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
    #[error("invalid month number: {0}")]
    InvalidMonth(u8),
}
