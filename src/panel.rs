use crate::theme::{
    yearselect::{SELECTED_MONTH_STYLE, YEAR_STYLE},
    ADJACENT_DAY_STYLE, BASE_STYLE, ENDPOINT_STYLE, FIELD_STYLE, IN_RANGE_STYLE,
    PLACEHOLDER_STYLE, SHORTCUT_KEY_STYLE, TITLE_STYLE, WEEKDAY_STYLE, WEEKEND_STYLE,
};
use rangepick::{weekends::is_weekend, CalendarDay, DatePicker, Event, Selection, YearSelect};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Position, Rect},
    style::Style,
    widgets::Widget,
};
use std::iter::zip;
use std::ops::RangeInclusive;
use time::Date;

/// Width of the picker panel in columns
const PANEL_WIDTH: u16 = 28;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

const FIELD_ROW: u16 = 0;
const RULE_ROW: u16 = 1;
const NAV_ROW: u16 = 2;
const WEEKDAY_ROW: u16 = 3;
const FIRST_WEEK_ROW: u16 = 4;
const WEEK_ROWS: u16 = 6;

/// Number of rows taken up by the weekday header and the weeks, which the
/// year select replaces when open
const BODY_ROWS: u16 = WEEK_ROWS + 1;

const LAST_BODY_ROW: u16 = WEEKDAY_ROW + BODY_ROWS - 1;
const SHORTCUT_RULE_ROW: u16 = LAST_BODY_ROW + 1;
const FIRST_SHORTCUT_ROW: u16 = SHORTCUT_RULE_ROW + 1;

const PREV_YEAR_COL: u16 = 0;
const PREV_MONTH_COL: u16 = 2;
const NEXT_MONTH_COL: u16 = 25;
const NEXT_YEAR_COL: u16 = 27;

/// The year & month title is centered between the inner navigation arrows
const TITLE_COL: u16 = 4;
const TITLE_WIDTH: u16 = 20;
const TITLE_LAST_COL: u16 = TITLE_COL + TITLE_WIDTH - 1;

/// Column of the first month letter in each row of the year select; the
/// other letters follow every other column
const YEAR_SELECT_MONTH_COL: u16 = 5;

/// Shortcuts past this many have no number key
const NUMBERED_SHORTCUTS: u16 = 9;

static WEEKDAY_HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

static PLACEHOLDER: &str = "Select date range";

static NO_YEARS: &str = "No years to select";

static MONTH_LETTERS: [char; 12] = ['J', 'F', 'M', 'A', 'M', 'J', 'J', 'A', 'S', 'O', 'N', 'D'];

/// Something in the panel that can be clicked on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Target {
    TextField,
    PrevYear,
    PrevMonth,
    Title,
    NextMonth,
    NextYear,
    Day(usize),
    Month { year: i32, month: u8 },
    Shortcut(usize),
}

impl Target {
    pub(crate) fn event<C>(self, picker: &DatePicker<C>) -> Option<Event> {
        Some(match self {
            Target::TextField => Event::PanelToggled,
            Target::PrevYear => Event::YearShifted(-1),
            Target::PrevMonth => Event::MonthShifted(-1),
            Target::Title => Event::YearSelectToggled,
            Target::NextMonth => Event::MonthShifted(1),
            Target::NextYear => Event::YearShifted(1),
            Target::Day(i) => Event::DayClicked(*picker.month_view().days().get(i)?),
            Target::Month { year, month } => Event::MonthJumped { year, month },
            Target::Shortcut(i) => {
                Event::RangeShortcutPicked(picker.predefined_ranges().get(i)?.clone())
            }
        })
    }

    /// Returns the target at the given screen coordinates when the panel is
    /// drawn in `area`
    pub(crate) fn at<C>(
        picker: &DatePicker<C>,
        area: Rect,
        column: u16,
        row: u16,
    ) -> Option<Target> {
        let panel = panel_area(area, panel_height(picker));
        if !panel.contains(Position::new(column, row)) {
            return None;
        }
        let x = column - panel.x;
        let y = row - panel.y;
        let state = picker.state();
        match y {
            FIELD_ROW => Some(Target::TextField),
            _ if !state.panel_open => None,
            NAV_ROW => match x {
                PREV_YEAR_COL => Some(Target::PrevYear),
                PREV_MONTH_COL => Some(Target::PrevMonth),
                TITLE_COL..=TITLE_LAST_COL => Some(Target::Title),
                NEXT_MONTH_COL => Some(Target::NextMonth),
                NEXT_YEAR_COL => Some(Target::NextYear),
                _ => None,
            },
            WEEKDAY_ROW..=LAST_BODY_ROW if state.year_select_open => {
                let year = year_window(picker.year_select(), state.position.year)
                    .nth(usize::from(y - WEEKDAY_ROW))?;
                let offset = x.checked_sub(YEAR_SELECT_MONTH_COL)?;
                let month = offset / 2;
                (offset % 2 == 0 && usize::from(month) < MONTH_LETTERS.len()).then(|| {
                    Target::Month {
                        year,
                        month: u8::try_from(month + 1).unwrap_or(u8::MAX),
                    }
                })
            }
            FIRST_WEEK_ROW..=LAST_BODY_ROW => {
                let week = usize::from(y - FIRST_WEEK_ROW);
                let weekday = usize::from(x / DAY_WIDTH);
                Some(Target::Day(week * 7 + weekday))
            }
            SHORTCUT_RULE_ROW.. => {
                let i = usize::from(y.checked_sub(FIRST_SHORTCUT_ROW)?);
                (i < picker.predefined_ranges().len()).then_some(Target::Shortcut(i))
            }
            _ => None,
        }
    }
}

/// The date range picker: a text field showing the selected range, and, if
/// the panel is open, the month navigation, the calendar (or the year
/// select), and the predefined range shortcuts.
#[derive(Debug)]
pub(crate) struct Panel<'a, C> {
    picker: &'a DatePicker<C>,
    today: Date,
}

impl<'a, C> Panel<'a, C> {
    pub(crate) fn new(picker: &'a DatePicker<C>, today: Date) -> Self {
        Panel { picker, today }
    }

    fn draw_field(&self, canvas: &mut Canvas<'_>) {
        canvas.fill(FIELD_ROW, FIELD_STYLE);
        let result = self.picker.result();
        if result.is_empty() {
            canvas.mvprint(FIELD_ROW, 0, PLACEHOLDER, PLACEHOLDER_STYLE);
        } else {
            canvas.mvprint(FIELD_ROW, 0, result.label(), FIELD_STYLE);
        }
    }

    fn draw_nav(&self, canvas: &mut Canvas<'_>) {
        canvas.mvprint(NAV_ROW, PREV_YEAR_COL, "«", BASE_STYLE);
        canvas.mvprint(NAV_ROW, PREV_MONTH_COL, "‹", BASE_STYLE);
        canvas.mvprint(NAV_ROW, NEXT_MONTH_COL, "›", BASE_STYLE);
        canvas.mvprint(NAV_ROW, NEXT_YEAR_COL, "»", BASE_STYLE);
        let position = self.picker.position();
        let title = format!("{} {}", position.year, position.month);
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let col = TITLE_COL + TITLE_WIDTH.saturating_sub(width) / 2;
        canvas.mvprint(NAV_ROW, col, title, TITLE_STYLE);
    }

    fn draw_month(&self, canvas: &mut Canvas<'_>) {
        canvas.mvprint(WEEKDAY_ROW, 0, WEEKDAY_HEADER, WEEKDAY_STYLE);
        let selection = self.picker.selection();
        for (i, day) in zip(0u16.., self.picker.month_view().days()) {
            let s = if day.date == self.today {
                format!("[{:2}]", day.day)
            } else {
                format!(" {:2} ", day.day)
            };
            canvas.mvprint(
                FIRST_WEEK_ROW + i / 7,
                DAY_WIDTH * (i % 7),
                s,
                day_style(day, &selection),
            );
        }
    }

    fn draw_year_select(&self, canvas: &mut Canvas<'_>) {
        let position = self.picker.position();
        let window = year_window(self.picker.year_select(), position.year);
        if window.is_empty() {
            canvas.mvprint(WEEKDAY_ROW, 0, NO_YEARS, BASE_STYLE);
            return;
        }
        let entries = self
            .picker
            .year_select()
            .entries(position)
            .filter(|entry| window.contains(&entry.year));
        for (row, entry) in zip(WEEKDAY_ROW.., entries) {
            canvas.mvprint(row, 0, format!("{:>4}", entry.year), YEAR_STYLE);
            for (m, letter) in zip(0u16.., MONTH_LETTERS) {
                let selected = entry
                    .selected_month
                    .is_some_and(|month| u16::from(u8::from(month)) == m + 1);
                let style = if selected {
                    SELECTED_MONTH_STYLE
                } else {
                    BASE_STYLE
                };
                canvas.mvprint(row, YEAR_SELECT_MONTH_COL + 2 * m, letter.to_string(), style);
            }
        }
    }

    fn draw_shortcuts(&self, canvas: &mut Canvas<'_>) {
        canvas.hline(SHORTCUT_RULE_ROW);
        for (i, range) in zip(0u16.., self.picker.predefined_ranges()) {
            let row = FIRST_SHORTCUT_ROW + i;
            if i < NUMBERED_SHORTCUTS {
                canvas.mvprint(row, 0, (i + 1).to_string(), SHORTCUT_KEY_STYLE);
            }
            canvas.mvprint(row, 2, &range.label, BASE_STYLE);
        }
    }
}

impl<C> Widget for Panel<'_, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = panel_area(area, panel_height(self.picker));
        let mut canvas = Canvas::new(area, buf);
        self.draw_field(&mut canvas);
        let state = self.picker.state();
        if !state.panel_open {
            return;
        }
        canvas.hline(RULE_ROW);
        self.draw_nav(&mut canvas);
        if state.year_select_open {
            self.draw_year_select(&mut canvas);
        } else {
            self.draw_month(&mut canvas);
        }
        if !self.picker.predefined_ranges().is_empty() {
            self.draw_shortcuts(&mut canvas);
        }
    }
}

fn day_style(day: &CalendarDay, selection: &Selection) -> Style {
    if selection.is_endpoint(day.date) {
        ENDPOINT_STYLE
    } else if selection.contains(day.date) {
        IN_RANGE_STYLE
    } else if !day.is_current_month() {
        ADJACENT_DAY_STYLE
    } else if is_weekend(day.weekday) {
        WEEKEND_STYLE
    } else {
        BASE_STYLE
    }
}

fn panel_height<C>(picker: &DatePicker<C>) -> u16 {
    if !picker.state().panel_open {
        return FIELD_ROW + 1;
    }
    let shortcuts = picker.predefined_ranges().len();
    if shortcuts == 0 {
        SHORTCUT_RULE_ROW
    } else {
        FIRST_SHORTCUT_ROW.saturating_add(u16::try_from(shortcuts).unwrap_or(u16::MAX))
    }
}

fn panel_area(area: Rect, height: u16) -> Rect {
    let [area] = Layout::horizontal([PANEL_WIDTH])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([height]).flex(Flex::Center).areas(area);
    area
}

/// The years shown in the year select: as many as fit in the calendar body,
/// roughly centered on `year` but never outside the selectable years
fn year_window(select: YearSelect, year: i32) -> RangeInclusive<i32> {
    if select.is_empty() {
        return select.years();
    }
    let rows = i32::from(BODY_ROWS);
    let last_start = select.from.max(select.to.saturating_sub(rows - 1));
    let start = year.saturating_sub(rows / 2).clamp(select.from, last_start);
    start..=select.to.min(start.saturating_add(rows - 1))
}

#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> Canvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Canvas { area, buf }
    }

    fn fill(&mut self, y: u16, style: Style) {
        if y < self.area.height {
            let row = Rect {
                y: self.area.y + y,
                height: 1,
                ..self.area
            };
            self.buf.set_style(row, style);
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                self.area.x + x,
                self.area.y + y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    fn hline(&mut self, y: u16) {
        self.mvprint(y, 0, "─".repeat(usize::from(self.area.width)), BASE_STYLE);
    }
}
