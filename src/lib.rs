//! Date range picking for calendars.
//!
//! A [`DatePicker`] displays one month at a time as a [`MonthView`], a fixed
//! grid of 42 days padded with days from the adjacent months.  Clicking two
//! days selects a range, clicking again starts a new one, and a
//! [`PredefinedRange`] can be picked to select a range in one go.  Every time
//! the selection changes, the picker hands its [`RangeConsumer`] a
//! [`DateRangeResult`] holding the formatted endpoints and every weekend day
//! in the range.
//!
//! Pickers can be configured in code with [`PickerOptions`] or from a TOML
//! file with [`Config`].  Rendering is left to the caller; see the
//! `rangepick` binary for a terminal front end.
pub mod config;
pub mod dates;
pub mod grid;
pub mod navigation;
pub mod picker;
pub mod selection;
pub mod weekends;
pub use crate::config::{Config, ConfigError};
pub use crate::dates::{
    days_in_month, format_date, normalize_calendar_date, parse_date, range_label, OutOfTimeError,
};
pub use crate::grid::{Adjacency, CalendarDay, MonthView};
pub use crate::navigation::{NavigationError, YearEntry, YearMonth, YearSelect};
pub use crate::picker::{transition, DatePicker, Event, PickerOptions, PickerState, RangeConsumer};
pub use crate::selection::{DateRangeResult, PredefinedRange, Selection};
pub use crate::weekends::{weekend_dates, weekends_in_range};
