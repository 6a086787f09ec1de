use crate::dates::OutOfTimeError;
use crate::grid::{CalendarDay, MonthView};
use crate::navigation::{NavigationError, YearMonth, YearSelect};
use crate::selection::{DateRangeResult, PredefinedRange, Selection};
use time::Date;

/// Receives every [`DateRangeResult`] the picker emits
pub trait RangeConsumer {
    fn on_change(&mut self, result: &DateRangeResult);
}

impl<F: FnMut(&DateRangeResult)> RangeConsumer for F {
    fn on_change(&mut self, result: &DateRangeResult) {
        self(result);
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PickerOptions {
    pub predefined_ranges: Vec<PredefinedRange>,
    pub year_select: YearSelect,
}

impl PickerOptions {
    pub fn new() -> PickerOptions {
        PickerOptions::default()
    }

    pub fn predefined_range(mut self, range: PredefinedRange) -> Self {
        self.predefined_ranges.push(range);
        self
    }

    pub fn year_select_from(mut self, year: i32) -> Self {
        self.year_select.from = year;
        self
    }

    pub fn year_select_to(mut self, year: i32) -> Self {
        self.year_select.to = year;
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PickerState {
    pub position: YearMonth,
    pub selection: Selection,
    pub year_select_open: bool,
    pub panel_open: bool,
}

impl PickerState {
    pub fn new(position: YearMonth) -> PickerState {
        PickerState {
            position,
            selection: Selection::Empty,
            year_select_open: false,
            panel_open: false,
        }
    }
}

/// Everything the user can do to the picker
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    DayClicked(CalendarDay),
    RangeShortcutPicked(PredefinedRange),
    YearShifted(i32),
    MonthShifted(i32),
    /// Jump to a year and a month numbered from 1, as chosen in the
    /// quick-select
    MonthJumped {
        year: i32,
        month: u8,
    },
    YearSelectToggled,
    PanelToggled,
}

/// Compute the state that results from applying `event` to `state`
///
/// # Errors
///
/// Fails if the event would move the display outside the representable
/// calendar or names an invalid month.
pub fn transition(state: &PickerState, event: &Event) -> Result<PickerState, NavigationError> {
    Ok(match event {
        Event::DayClicked(day) => PickerState {
            selection: state.selection.click(day.date),
            ..*state
        },
        Event::RangeShortcutPicked(range) => {
            let selection = Selection::from_range(range);
            PickerState {
                position: YearMonth::containing(range.start.date()),
                selection,
                year_select_open: false,
                ..*state
            }
        }
        Event::YearShifted(offset) => PickerState {
            position: state.position.shift_years(*offset)?,
            ..*state
        },
        Event::MonthShifted(offset) => PickerState {
            position: state.position.shift_months(*offset)?,
            ..*state
        },
        Event::MonthJumped { year, month } => PickerState {
            position: YearMonth::jump_to(*year, *month)?,
            year_select_open: false,
            ..*state
        },
        Event::YearSelectToggled => PickerState {
            year_select_open: !state.year_select_open,
            ..*state
        },
        Event::PanelToggled => PickerState {
            panel_open: !state.panel_open,
            ..*state
        },
    })
}

/// The date range picker: owns the picker state and the month grid for the
/// displayed month, and reports the selection to its consumer once on
/// construction and again after every change.
#[derive(Clone, Debug)]
pub struct DatePicker<C> {
    options: PickerOptions,
    state: PickerState,
    month_view: MonthView,
    result: DateRangeResult,
    consumer: C,
}

impl<C: RangeConsumer> DatePicker<C> {
    /// Create a picker displaying the month containing `date` and emit the
    /// initial, empty result
    ///
    /// # Errors
    ///
    /// Fails if the grid for the month containing `date` is not
    /// representable.
    pub fn new(date: Date, options: PickerOptions, consumer: C) -> Result<Self, OutOfTimeError> {
        let state = PickerState::new(YearMonth::containing(date));
        let month_view = MonthView::build(state.position.year, state.position.month)?;
        let result = DateRangeResult::from_selection(&state.selection);
        let mut picker = DatePicker {
            options,
            state,
            month_view,
            result,
            consumer,
        };
        picker.emit();
        Ok(picker)
    }

    /// Apply an event, rebuilding the grid if the displayed month changed
    /// and emitting a new result if the selection changed.  If an error is
    /// returned, the picker is left unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the event would move the display outside the representable
    /// calendar or names an invalid month.
    pub fn handle(&mut self, event: Event) -> Result<(), NavigationError> {
        let next = match transition(&self.state, &event) {
            Ok(next) => next,
            Err(e) => {
                log::debug!("Refusing {event:?}: {e}");
                return Err(e);
            }
        };
        if next.position != self.state.position {
            match MonthView::build(next.position.year, next.position.month) {
                Ok(view) => self.month_view = view,
                Err(e) => {
                    log::debug!("Refusing {event:?}: cannot display {:?}", next.position);
                    return Err(e.into());
                }
            }
        }
        log::debug!("{event:?}: {:?} -> {next:?}", self.state);
        let selection_changed = next.selection != self.state.selection;
        self.state = next;
        if selection_changed {
            self.result = DateRangeResult::from_selection(&self.state.selection);
            self.emit();
        }
        Ok(())
    }

    fn emit(&mut self) {
        log::trace!("Emitting {:?}", self.result);
        self.consumer.on_change(&self.result);
    }
}

impl<C> DatePicker<C> {
    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn position(&self) -> YearMonth {
        self.state.position
    }

    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    pub fn month_view(&self) -> &MonthView {
        &self.month_view
    }

    pub fn result(&self) -> &DateRangeResult {
        &self.result
    }

    pub fn year_select(&self) -> YearSelect {
        self.options.year_select
    }

    pub fn predefined_ranges(&self) -> &[PredefinedRange] {
        &self.options.predefined_ranges
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn into_consumer(self) -> C {
        self.consumer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month;

    #[derive(Debug, Default)]
    struct Recorder(Vec<DateRangeResult>);

    impl RangeConsumer for Recorder {
        fn on_change(&mut self, result: &DateRangeResult) {
            self.0.push(result.clone());
        }
    }

    fn picker_at(date: Date) -> DatePicker<Recorder> {
        DatePicker::new(date, PickerOptions::new(), Recorder::default()).unwrap()
    }

    fn click(picker: &mut DatePicker<Recorder>, date: Date) {
        let index = picker.month_view().position(date).unwrap();
        let day = picker.month_view()[index];
        picker.handle(Event::DayClicked(day)).unwrap();
    }

    #[test]
    fn test_initial_emission() {
        let picker = picker_at(date!(2024 - 03 - 15));
        assert_eq!(picker.consumer().0, [DateRangeResult::default()]);
        assert_eq!(picker.position(), YearMonth::new(2024, Month::March));
        assert_eq!(picker.selection(), Selection::Empty);
        assert_eq!(picker.month_view().month(), Month::March);
        assert!(!picker.state().panel_open);
        assert!(!picker.state().year_select_open);
    }

    #[test]
    fn test_click_flow() {
        let mut picker = picker_at(date!(2024 - 03 - 15));
        click(&mut picker, date!(2024 - 03 - 15));
        click(&mut picker, date!(2024 - 03 - 04));
        assert_eq!(
            picker.selection(),
            Selection::Complete {
                start: date!(2024 - 03 - 04),
                end: date!(2024 - 03 - 15)
            }
        );
        click(&mut picker, date!(2024 - 03 - 28));
        assert_eq!(
            picker.selection(),
            Selection::Partial {
                start: date!(2024 - 03 - 28)
            }
        );
        let seen = &picker.consumer().0;
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[1].start_label(), "2024-03-15");
        assert_eq!(seen[1].end_label(), "");
        assert_eq!(seen[2].start_label(), "2024-03-04");
        assert_eq!(seen[2].end_label(), "2024-03-15");
        assert_eq!(seen[2].weekends(), ["2024-03-09", "2024-03-10"]);
        assert_eq!(seen[3].start_label(), "2024-03-28");
        assert!(seen[3].weekends().is_empty());
        assert_eq!(picker.result(), &seen[3]);
    }

    #[test]
    fn test_click_adjacent_month_day() {
        let mut picker = picker_at(date!(2025 - 01 - 15));
        let day = picker.month_view()[0];
        picker.handle(Event::DayClicked(day)).unwrap();
        assert_eq!(picker.result().start_label(), "2024-12-29");
        // Clicking an adjacent day does not move the display
        assert_eq!(picker.position(), YearMonth::new(2025, Month::January));
    }

    #[test]
    fn test_navigation_does_not_emit() {
        let mut picker = picker_at(date!(2024 - 12 - 10));
        picker.handle(Event::MonthShifted(1)).unwrap();
        assert_eq!(picker.position(), YearMonth::new(2025, Month::January));
        assert_eq!(picker.month_view().year(), 2025);
        assert_eq!(picker.month_view().month(), Month::January);
        picker.handle(Event::MonthShifted(-1)).unwrap();
        picker.handle(Event::MonthShifted(-1)).unwrap();
        assert_eq!(picker.position(), YearMonth::new(2024, Month::November));
        picker.handle(Event::YearShifted(-1)).unwrap();
        assert_eq!(picker.position(), YearMonth::new(2023, Month::November));
        assert_eq!(picker.month_view().year(), 2023);
        assert_eq!(picker.consumer().0.len(), 1);
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut picker = picker_at(date!(2024 - 01 - 10));
        click(&mut picker, date!(2024 - 01 - 30));
        picker.handle(Event::MonthShifted(1)).unwrap();
        click(&mut picker, date!(2024 - 02 - 05));
        assert_eq!(
            picker.selection(),
            Selection::Complete {
                start: date!(2024 - 01 - 30),
                end: date!(2024 - 02 - 05)
            }
        );
        assert_eq!(picker.result().weekends(), ["2024-02-03", "2024-02-04"]);
    }

    #[test]
    fn test_predefined_range() {
        let mut picker = picker_at(date!(2024 - 06 - 01));
        picker.handle(Event::YearSelectToggled).unwrap();
        assert!(picker.state().year_select_open);
        let range =
            PredefinedRange::from_dates("New Year", date!(2023 - 12 - 29), date!(2024 - 01 - 02));
        picker.handle(Event::RangeShortcutPicked(range)).unwrap();
        assert_eq!(picker.position(), YearMonth::new(2023, Month::December));
        assert_eq!(picker.month_view().month(), Month::December);
        assert!(!picker.state().year_select_open);
        assert_eq!(picker.result().weekends(), ["2023-12-30", "2023-12-31"]);
        assert_eq!(picker.consumer().0.len(), 2);
    }

    #[test]
    fn test_same_predefined_range_twice_emits_once() {
        let mut picker = picker_at(date!(2024 - 06 - 01));
        let range =
            PredefinedRange::from_dates("Week", date!(2024 - 06 - 03), date!(2024 - 06 - 09));
        picker
            .handle(Event::RangeShortcutPicked(range.clone()))
            .unwrap();
        picker.handle(Event::RangeShortcutPicked(range)).unwrap();
        assert_eq!(picker.consumer().0.len(), 2);
    }

    #[test]
    fn test_inverted_predefined_range() {
        let mut picker = picker_at(date!(2024 - 06 - 01));
        let range =
            PredefinedRange::from_dates("Backwards", date!(2024 - 01 - 10), date!(2024 - 01 - 05));
        picker.handle(Event::RangeShortcutPicked(range)).unwrap();
        assert_eq!(
            picker.selection(),
            Selection::Complete {
                start: date!(2024 - 01 - 10),
                end: date!(2024 - 01 - 05)
            }
        );
        assert_eq!(picker.result().start_label(), "2024-01-10");
        assert_eq!(picker.result().end_label(), "2024-01-05");
        assert!(picker.result().weekends().is_empty());
    }

    #[test]
    fn test_click_after_predefined_range_restarts() {
        let mut picker = picker_at(date!(2024 - 06 - 01));
        let range =
            PredefinedRange::from_dates("Week", date!(2024 - 06 - 03), date!(2024 - 06 - 09));
        picker.handle(Event::RangeShortcutPicked(range)).unwrap();
        click(&mut picker, date!(2024 - 06 - 20));
        assert_eq!(
            picker.selection(),
            Selection::Partial {
                start: date!(2024 - 06 - 20)
            }
        );
    }

    #[test]
    fn test_month_jump_closes_year_select() {
        let mut picker = picker_at(date!(2024 - 06 - 01));
        picker.handle(Event::YearSelectToggled).unwrap();
        picker
            .handle(Event::MonthJumped {
                year: 2031,
                month: 2,
            })
            .unwrap();
        assert_eq!(picker.position(), YearMonth::new(2031, Month::February));
        assert_eq!(picker.month_view().year(), 2031);
        assert!(!picker.state().year_select_open);
    }

    #[test]
    fn test_invalid_month_jump_is_refused() {
        let mut picker = picker_at(date!(2024 - 06 - 01));
        picker.handle(Event::YearSelectToggled).unwrap();
        let before = *picker.state();
        assert_eq!(
            picker.handle(Event::MonthJumped {
                year: 2031,
                month: 13,
            }),
            Err(NavigationError::InvalidMonth(13))
        );
        assert_eq!(picker.state(), &before);
    }

    #[test]
    fn test_end_of_time_is_refused() {
        let mut picker = picker_at(date!(9999 - 11 - 01));
        let before = *picker.state();
        assert_eq!(
            picker.handle(Event::MonthShifted(1)),
            Err(NavigationError::OutOfTime(OutOfTimeError))
        );
        assert_eq!(picker.state(), &before);
        assert_eq!(picker.month_view().month(), Month::November);
    }

    #[test]
    fn test_panel_toggle() {
        let mut picker = picker_at(date!(2024 - 06 - 01));
        picker.handle(Event::PanelToggled).unwrap();
        assert!(picker.state().panel_open);
        picker.handle(Event::PanelToggled).unwrap();
        assert!(!picker.state().panel_open);
        assert_eq!(picker.consumer().0.len(), 1);
    }

    #[test]
    fn test_transition_is_pure() {
        let state = PickerState::new(YearMonth::new(2024, Month::December));
        let next = transition(&state, &Event::MonthShifted(1)).unwrap();
        assert_eq!(next.position, YearMonth::new(2025, Month::January));
        assert_eq!(state.position, YearMonth::new(2024, Month::December));
    }

    #[test]
    fn test_closure_consumer() {
        let mut seen = Vec::new();
        let mut picker = DatePicker::new(
            date!(2024 - 01 - 01),
            PickerOptions::new(),
            |r: &DateRangeResult| seen.push(r.label()),
        )
        .unwrap();
        let day = picker.month_view()[1];
        picker.handle(Event::DayClicked(day)).unwrap();
        drop(picker);
        assert_eq!(seen, [" ~ ", "2024-01-01 ~ "]);
    }

    #[test]
    fn test_options_builder() {
        let options = PickerOptions::new()
            .year_select_from(2000)
            .year_select_to(2005)
            .predefined_range(PredefinedRange::from_dates(
                "Y2K",
                date!(2000 - 01 - 01),
                date!(2000 - 01 - 02),
            ));
        let picker = DatePicker::new(date!(2024 - 01 - 01), options, Recorder::default()).unwrap();
        assert_eq!(picker.year_select(), YearSelect::new(2000, 2005));
        assert_eq!(picker.predefined_ranges().len(), 1);
        assert_eq!(picker.predefined_ranges()[0].label, "Y2K");
        assert_eq!(picker.options().year_select.from, 2000);
    }
}
