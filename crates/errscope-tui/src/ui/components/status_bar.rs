use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::Theme;

/// Bottom line: key hints, or a transient message, plus the row position
pub struct StatusBar<'a> {
    hints: &'a [(&'a str, &'a str)],
    message: Option<&'a str>,
    position: Option<String>,
}

impl<'a> StatusBar<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)]) -> Self {
        Self {
            hints,
            message: None,
            position: None,
        }
    }

    /// Message shown instead of the hints
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    /// Selected row out of all matches, e.g. `51/120`
    pub fn position(mut self, row: usize, total: usize) -> Self {
        self.position = Some(format!("{}/{}", row, total));
        self
    }

    fn left_line(&self) -> Line<'a> {
        if let Some(message) = self.message {
            return Line::from(Span::styled(message, Theme::status_message()));
        }

        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Theme::status_bar()));
            }
            spans.push(Span::styled(format!("[{}]", key), Theme::status_bar_key()));
            spans.push(Span::styled(format!(" {}", desc), Theme::status_bar()));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::status_bar());
        if area.width < 3 {
            return;
        }

        let left = self.left_line();
        let left_width = left.width() as u16;
        buf.set_line(area.x + 1, area.y, &left, area.width - 2);

        // Position goes right-aligned, dropped when it would overlap
        if let Some(position) = self.position {
            let line = Line::from(Span::styled(position, Theme::status_bar()));
            let width = line.width() as u16;
            let x = area.right().saturating_sub(width + 1);
            if x > area.x + left_width + 2 {
                buf.set_line(x, area.y, &line, width);
            }
        }
    }
}

/// Key hints for the log viewer
pub const LOG_VIEWER_HINTS: &[(&str, &str)] = &[
    ("n/p", "page"),
    ("/", "filter"),
    ("t", "type"),
    ("x", "clear"),
    ("Enter", "detail"),
    ("?", "help"),
    ("q", "quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(bar: StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_hints_and_position() {
        let text = rendered(StatusBar::new(&[("q", "quit")]).position(3, 120), 30);
        assert!(text.starts_with(" [q] quit"));
        assert!(text.ends_with("3/120 "));
    }

    #[test]
    fn test_message_replaces_hints() {
        let text = rendered(StatusBar::new(LOG_VIEWER_HINTS).message(Some("Log file not found")), 40);
        assert!(text.starts_with(" Log file not found"));
        assert!(!text.contains("[q]"));
    }

    #[test]
    fn test_position_dropped_when_narrow() {
        let text = rendered(StatusBar::new(LOG_VIEWER_HINTS).position(1, 2), 20);
        assert!(!text.contains("1/2"));
    }
}
