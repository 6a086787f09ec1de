use crate::dates::format_date;
use std::iter::successors;
use time::{Date, Weekday};

/// Iterate over the Saturdays and Sundays from `start` (inclusive) up to
/// `end` (exclusive) in chronological order.  Nothing is produced if `start`
/// is not before `end`.
pub fn weekend_dates(start: Date, end: Date) -> impl Iterator<Item = Date> {
    successors(Some(start), |&d| d.next_day())
        .take_while(move |&d| d < end)
        .filter(|d| is_weekend(d.weekday()))
}

/// Formatted weekend dates in the half-open range `[start, end)`.  Empty if
/// either endpoint is missing.
pub fn weekends_in_range(start: Option<Date>, end: Option<Date>) -> Vec<String> {
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };
    weekend_dates(start, end).map(|d| format_date(Some(d))).collect()
}

pub fn is_weekend(wd: Weekday) -> bool {
    matches!(wd, Weekday::Saturday | Weekday::Sunday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_end_is_exclusive() {
        assert_eq!(
            weekends_in_range(Some(date!(2024 - 01 - 01)), Some(date!(2024 - 01 - 07))),
            ["2024-01-06"]
        );
    }

    #[test]
    fn test_start_is_inclusive() {
        assert_eq!(
            weekends_in_range(Some(date!(2024 - 01 - 06)), Some(date!(2024 - 01 - 08))),
            ["2024-01-06", "2024-01-07"]
        );
    }

    #[test]
    fn test_across_months() {
        assert_eq!(
            weekends_in_range(Some(date!(2024 - 01 - 25)), Some(date!(2024 - 02 - 12))),
            [
                "2024-01-27",
                "2024-01-28",
                "2024-02-03",
                "2024-02-04",
                "2024-02-10",
                "2024-02-11",
            ]
        );
    }

    #[test]
    fn test_across_years() {
        assert_eq!(
            weekends_in_range(Some(date!(2024 - 12 - 27)), Some(date!(2025 - 01 - 06))),
            ["2024-12-28", "2024-12-29", "2025-01-04", "2025-01-05"]
        );
    }

    #[test]
    fn test_missing_endpoint() {
        assert!(weekends_in_range(None, None).is_empty());
        assert!(weekends_in_range(Some(date!(2024 - 01 - 01)), None).is_empty());
        assert!(weekends_in_range(None, Some(date!(2024 - 01 - 31))).is_empty());
    }

    #[test]
    fn test_same_day() {
        let day = Some(date!(2024 - 01 - 06));
        assert!(weekends_in_range(day, day).is_empty());
    }

    #[test]
    fn test_inverted() {
        let start = Some(date!(2024 - 01 - 10));
        let end = Some(date!(2024 - 01 - 05));
        assert!(weekends_in_range(start, end).is_empty());
    }

    #[test]
    fn test_weekday_only_range() {
        assert_eq!(
            weekend_dates(date!(2024 - 01 - 08), date!(2024 - 01 - 13)).count(),
            0
        );
    }

    #[test]
    fn test_end_of_time() {
        let weekends =
            weekend_dates(date!(9999 - 12 - 25), date!(9999 - 12 - 31)).collect::<Vec<_>>();
        assert_eq!(weekends, [date!(9999 - 12 - 25), date!(9999 - 12 - 26)]);
    }
}
