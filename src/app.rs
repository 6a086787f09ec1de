use crate::help::Help;
use crate::panel::{Panel, Target};
use crate::theme::BASE_STYLE;
use crossterm::event::{
    read, Event as InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rangepick::{
    DatePicker, DateRangeResult, Event, NavigationError, PickerOptions, RangeConsumer,
};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal};
use std::io::{self, Write};
use time::Date;

/// Consumer that logs every payload the picker emits
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LogConsumer;

impl RangeConsumer for LogConsumer {
    fn on_change(&mut self, result: &DateRangeResult) {
        match serde_json::to_string(result) {
            Ok(payload) => log::info!("Selection changed: {payload}"),
            Err(e) => log::warn!("Failed to serialize selection: {e}"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct App {
    picker: DatePicker<LogConsumer>,
    today: Date,
    state: AppState,
    // Where the last frame was drawn, for mapping mouse clicks to targets
    area: Rect,
}

impl App {
    /// # Errors
    ///
    /// Fails if `date` lies at the edge of the representable calendar.
    pub(crate) fn new(
        date: Date,
        today: Date,
        options: PickerOptions,
    ) -> Result<App, NavigationError> {
        let mut picker = DatePicker::new(date, options, LogConsumer)?;
        picker.handle(Event::PanelToggled)?;
        Ok(App {
            picker,
            today,
            state: AppState::Picking,
            area: Rect::default(),
        })
    }

    /// Run the picker until the user quits, and return the final selection
    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<DateRangeResult> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.picker.result().clone())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| {
            self.area = frame.area();
            frame.render_widget(&*self, self.area);
        })?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        let ok = if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
                true
            } else {
                normal_modifiers.contains(modifiers) && self.handle_key(code)
            }
        } else if let InputEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            self.handle_click(column, row)
        } else {
            // Redraw on resize and anything else
            true
        };
        if !ok {
            self.beep()?;
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the picker
    // refused the resulting event
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.dispatch(Event::MonthShifted(-1)),
                KeyCode::Char('l') | KeyCode::Right => self.dispatch(Event::MonthShifted(1)),
                KeyCode::Char('H') | KeyCode::PageUp => self.dispatch(Event::YearShifted(-1)),
                KeyCode::Char('L') | KeyCode::PageDown => self.dispatch(Event::YearShifted(1)),
                KeyCode::Char('y') => self.dispatch(Event::YearSelectToggled),
                KeyCode::Char(' ') => self.dispatch(Event::PanelToggled),
                KeyCode::Char(c @ '1'..='9') => shortcut_index(c)
                    .and_then(|i| self.picker.predefined_ranges().get(i).cloned())
                    .is_some_and(|range| self.dispatch(Event::RangeShortcutPicked(range))),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Clicks on nothing in particular are ignored
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        match self.state {
            AppState::Picking => {
                match Target::at(&self.picker, self.area, column, row)
                    .and_then(|target| target.event(&self.picker))
                {
                    Some(event) => self.dispatch(event),
                    None => true,
                }
            }
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn dispatch(&mut self, event: Event) -> bool {
        match self.picker.handle(event) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Event refused: {e}");
                false
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Panel::new(&self.picker, self.today).render(area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

/// Index of the predefined range picked with a digit key, counting from 1
fn shortcut_index(key: char) -> Option<usize> {
    let digit = key.to_digit(10)?.checked_sub(1)?;
    usize::try_from(digit).ok()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
