use crate::theme::{BASE_STYLE, SHORTCUT_KEY_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Width of the key column
const KEY_WIDTH: usize = 16;

static INTRO: &str = "Click two days to select a range.";

static COMMANDS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous month"),
    ("l, RIGHT", "Next month"),
    ("H, PAGE UP", "Previous year"),
    ("L, PAGE DOWN", "Next year"),
    ("y", "Toggle year select"),
    ("SPACE", "Toggle calendar"),
    ("1-9", "Pick shortcut range"),
    ("?", "Show this help"),
    ("q, ESC, ENTER", "Quit"),
];

static OUTRO: &str = "Press the Any Key to dismiss.";

/// Overlay listing the key bindings
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        let mut lines = vec![Line::raw(INTRO), Line::default()];
        lines.extend(COMMANDS.iter().map(|&(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:KEY_WIDTH$}"), SHORTCUT_KEY_STYLE),
                Span::raw(action),
            ])
        }));
        lines.push(Line::default());
        lines.push(Line::raw(OUTRO));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        let block = Block::bordered()
            .title(" Commands ")
            .title_alignment(Alignment::Center)
            .style(BASE_STYLE);
        let inner = block.inner(help_area);
        block.render(help_area, buf);
        let [inner] = Layout::horizontal([inner.width.saturating_sub(2)])
            .flex(Flex::Center)
            .areas(inner);
        Paragraph::new(text).style(BASE_STYLE).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_help() {
        let area = Rect::new(0, 0, 39, 15);
        let mut buffer = Buffer::empty(area);
        Help.render(area, &mut buffer);
        let lines = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert!(lines[0].starts_with('┌'));
        assert!(lines[0].contains(" Commands "));
        assert_eq!(
            lines[1..],
            [
                "│ Click two days to select a range.   │",
                "│                                     │",
                "│ h, LEFT         Previous month      │",
                "│ l, RIGHT        Next month          │",
                "│ H, PAGE UP      Previous year       │",
                "│ L, PAGE DOWN    Next year           │",
                "│ y               Toggle year select  │",
                "│ SPACE           Toggle calendar     │",
                "│ 1-9             Pick shortcut range │",
                "│ ?               Show this help      │",
                "│ q, ESC, ENTER   Quit                │",
                "│                                     │",
                "│ Press the Any Key to dismiss.       │",
                "└─────────────────────────────────────┘",
            ]
        );
        assert_eq!(buffer[(2, 3)].fg, Color::LightBlue);
        assert_eq!(buffer[(18, 3)].fg, Color::White);
    }
}
