use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{Layout, Theme};

/// Keys grouped by what they act on
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Rows",
        &[
            ("j/↓", "Next row"),
            ("k/↑", "Previous row"),
            ("Home/End", "First / last row"),
            ("Enter", "Show entry details"),
        ],
    ),
    (
        "Pages",
        &[
            ("n/→", "Next page"),
            ("p/←", "Previous page"),
            ("g", "First page"),
            ("G", "Last page"),
        ],
    ),
    (
        "Filters",
        &[
            ("/", "Edit search, type and dates"),
            ("Tab", "Next field (while editing)"),
            ("t/T", "Cycle error type"),
            ("x", "Clear all filters"),
        ],
    ),
    (
        "Actions",
        &[
            ("r", "Reload the log file"),
            ("s", "Toggle severity stats"),
            ("e", "Export matches to file"),
            ("?", "Toggle this help"),
            ("Esc", "Close popup / quit"),
            ("q", "Quit"),
        ],
    ),
];

/// Help overlay listing the viewer keys
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let lines = Self::lines();
        let popup_area = Layout::popup(frame.area(), 50, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup_area);

        let help_widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_focused())
                .title(Span::styled(" Help ", Theme::title())),
        );

        frame.render_widget(help_widget, popup_area);
    }

    fn lines() -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, (section, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(*section, Theme::text_highlight())));
            lines.extend(keys.iter().map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {:>8}", key), Theme::key()),
                    Span::styled(format!("  {}", desc), Theme::text()),
                ])
            }));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_listed() {
        let lines = HelpOverlay::lines();
        let keys: usize = SECTIONS.iter().map(|(_, keys)| keys.len()).sum();
        // headers, keys and one blank line between sections
        assert_eq!(lines.len(), SECTIONS.len() * 2 - 1 + keys);
    }
}
