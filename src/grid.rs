use crate::dates::{
    days_in_month, month_index0, normalize_calendar_date, OutOfTimeError, WeekdayExt,
};
use std::ops::Index;
use time::{Date, Month, Weekday};

pub const DAYS_IN_WEEK: u8 = 7;

pub const WEEKS_IN_GRID: u8 = 6;

/// Number of cells in every month grid
pub const GRID_CELLS: u8 = DAYS_IN_WEEK * WEEKS_IN_GRID;

/// Which month a grid cell belongs to relative to the displayed month
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Adjacency {
    Previous,
    Current,
    Next,
}

impl Adjacency {
    pub fn offset(self) -> i8 {
        match self {
            Adjacency::Previous => -1,
            Adjacency::Current => 0,
            Adjacency::Next => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CalendarDay {
    /// Day of the month shown in the cell
    pub day: u8,
    pub weekday: Weekday,
    pub adjacency: Adjacency,
    pub date: Date,
}

impl CalendarDay {
    pub fn is_current_month(&self) -> bool {
        self.adjacency == Adjacency::Current
    }
}

/// A six-week grid of days covering a month, starting on the Sunday on or
/// before the 1st and padded with days from the adjacent months.
#[derive(Clone, Debug, Eq, PartialEq)]
// Invariant: `days.len() == GRID_CELLS`
pub struct MonthView {
    year: i32,
    month: Month,
    first_weekday: u8,
    days: Vec<CalendarDay>,
}

impl MonthView {
    /// # Errors
    ///
    /// Fails if any cell of the grid, or the month preceding `month`, lies
    /// outside the range of representable dates.
    pub fn build(year: i32, month: Month) -> Result<MonthView, OutOfTimeError> {
        let month0 = month_index0(month);
        let first_weekday = normalize_calendar_date(year, month0, 1)?
            .weekday()
            .index0();
        let number_of_days = days_in_month(year, month)?;
        let prev_year = if month == Month::January {
            year.checked_sub(1).ok_or(OutOfTimeError)?
        } else {
            year
        };
        let prev_number_of_days = days_in_month(prev_year, month.previous())?;
        let days = (0..GRID_CELLS)
            .map(|index| {
                let (day, adjacency) = if index < first_weekday {
                    (
                        prev_number_of_days + index + 1 - first_weekday,
                        Adjacency::Previous,
                    )
                } else if index - first_weekday >= number_of_days {
                    (
                        index - first_weekday - number_of_days + 1,
                        Adjacency::Next,
                    )
                } else {
                    (index - first_weekday + 1, Adjacency::Current)
                };
                // Let the normalization carry days before the 1st and after
                // the last of the month into the adjacent months.
                let offset = i32::from(index) - i32::from(first_weekday);
                let date = normalize_calendar_date(year, month0, offset + 1)?;
                Ok(CalendarDay {
                    day,
                    weekday: Weekday::Sunday.nth_next(index % DAYS_IN_WEEK),
                    adjacency,
                    date,
                })
            })
            .collect::<Result<Vec<_>, OutOfTimeError>>()?;
        Ok(MonthView {
            year,
            month,
            first_weekday,
            days,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Index of the cell holding the 1st of the month, which is also the
    /// weekday index (Sunday = 0) of the 1st
    pub fn first_weekday(&self) -> u8 {
        self.first_weekday
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> + '_ {
        self.days.chunks(usize::from(DAYS_IN_WEEK))
    }

    pub fn position(&self, date: Date) -> Option<usize> {
        self.days.iter().position(|cd| cd.date == date)
    }
}

impl Index<usize> for MonthView {
    type Output = CalendarDay;

    fn index(&self, index: usize) -> &CalendarDay {
        &self.days[index]
    }
}
