use crate::dates::{format_date, range_label};
use crate::weekends::weekends_in_range;
use serde::Serialize;
use time::{Date, PrimitiveDateTime};

/// The state of the range selection.  Clicks move it through `Empty` →
/// `Partial` → `Complete`, and a click on a complete range starts over.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Selection {
    #[default]
    Empty,
    Partial {
        start: Date,
    },
    // Invariant: `start <= end` unless the range came from an inverted
    // predefined range
    Complete {
        start: Date,
        end: Date,
    },
}

impl Selection {
    /// Returns the selection after the user clicks on the given date
    pub fn click(self, date: Date) -> Selection {
        match self {
            Selection::Empty | Selection::Complete { .. } => Selection::Partial { start: date },
            Selection::Partial { start } if date < start => Selection::Complete {
                start: date,
                end: start,
            },
            Selection::Partial { start } => Selection::Complete { start, end: date },
        }
    }

    /// Select a predefined range as-is, truncating both endpoints to
    /// midnight.  The endpoints are not reordered.
    pub fn from_range(range: &PredefinedRange) -> Selection {
        Selection::Complete {
            start: range.start.date(),
            end: range.end.date(),
        }
    }

    pub fn start(&self) -> Option<Date> {
        match *self {
            Selection::Empty => None,
            Selection::Partial { start } | Selection::Complete { start, .. } => Some(start),
        }
    }

    pub fn end(&self) -> Option<Date> {
        match *self {
            Selection::Complete { end, .. } => Some(end),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Selection::Complete { .. })
    }

    /// True if `date` lies within the selected range, endpoints included.  A
    /// partial selection contains only its start.
    pub fn contains(&self, date: Date) -> bool {
        match *self {
            Selection::Empty => false,
            Selection::Partial { start } => date == start,
            Selection::Complete { start, end } => start <= date && date <= end,
        }
    }

    pub fn is_endpoint(&self, date: Date) -> bool {
        self.start() == Some(date) || self.end() == Some(date)
    }
}

/// A labelled shortcut range offered alongside the calendar
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PredefinedRange {
    pub label: String,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
}

impl PredefinedRange {
    pub fn new<S: Into<String>>(
        label: S,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> PredefinedRange {
        PredefinedRange {
            label: label.into(),
            start,
            end,
        }
    }

    pub fn from_dates<S: Into<String>>(label: S, start: Date, end: Date) -> PredefinedRange {
        PredefinedRange::new(label, start.midnight(), end.midnight())
    }
}

/// The value reported to the picker's consumer whenever the selection
/// changes.  Serializes as `{"range": [start, end], "weekends": [...]}` with
/// every date formatted as `YYYY-MM-DD` and missing endpoints as `""`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct DateRangeResult {
    range: [String; 2],
    weekends: Vec<String>,
}

impl DateRangeResult {
    pub fn from_selection(selection: &Selection) -> DateRangeResult {
        let (start, end) = (selection.start(), selection.end());
        DateRangeResult {
            range: [format_date(start), format_date(end)],
            weekends: weekends_in_range(start, end),
        }
    }

    pub fn start_label(&self) -> &str {
        &self.range[0]
    }

    pub fn end_label(&self) -> &str {
        &self.range[1]
    }

    pub fn weekends(&self) -> &[String] {
        &self.weekends
    }

    /// True if neither endpoint is selected
    pub fn is_empty(&self) -> bool {
        self.range.iter().all(String::is_empty)
    }

    /// Text for the picker's input field
    pub fn label(&self) -> String {
        format!("{} ~ {}", self.start_label(), self.end_label())
    }
}

impl From<&Selection> for DateRangeResult {
    fn from(selection: &Selection) -> DateRangeResult {
        DateRangeResult::from_selection(selection)
    }
}

/// Convenience for views that hold a selection rather than a result
pub fn selection_label(selection: &Selection) -> String {
    range_label(selection.start(), selection.end())
}
