use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const FIELD_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

pub(crate) const PLACEHOLDER_STYLE: Style = FIELD_STYLE.fg(Color::DarkGray);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const ADJACENT_DAY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const WEEKEND_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

pub(crate) const IN_RANGE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

pub(crate) const ENDPOINT_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

pub(crate) const SHORTCUT_KEY_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

pub(crate) mod yearselect {
    use super::*;

    pub(crate) const YEAR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const SELECTED_MONTH_STYLE: Style = ENDPOINT_STYLE;
}
