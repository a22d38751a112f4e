use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{FilterForm, FormField};
use crate::ui::Theme;

/// One-line form for search keyword, error type and date range
pub struct FilterBar;

impl FilterBar {
    pub fn render(frame: &mut Frame, area: Rect, form: &FilterForm, active: bool, error: Option<&str>) {
        let mut spans = vec![Span::styled(" ", Theme::text())];
        let mut cursor_x = None;

        for field in FormField::ALL {
            let focused = active && form.focus == field;
            let label_style = if focused {
                Theme::text_highlight()
            } else {
                Theme::text_dim()
            };
            spans.push(Span::styled(format!("{}: ", field.label()), label_style));

            let value = form.value(field);
            if focused {
                let offset: usize = spans.iter().map(|s| s.content.width()).sum();
                cursor_x = Some(offset + value.width());
            }

            if value.is_empty() {
                spans.push(Span::styled(field.placeholder(), Theme::text_dim()));
            } else {
                spans.push(Span::styled(value.to_string(), Theme::text()));
            }
            spans.push(Span::styled("  ", Theme::text()));
        }

        if let Some(err) = error {
            spans.push(Span::styled(format!("⚠ {}", err), Theme::error()));
        } else if active {
            spans.push(Span::styled("[Tab] Next  [Enter] Apply  [Esc] Cancel", Theme::text_dim()));
        } else {
            spans.push(Span::styled("[/] Edit  [x] Clear", Theme::text_dim()));
        }

        let filter_bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::form_border(active, error.is_some()))
                .title(Span::styled(" Filter ", Theme::title())),
        );

        frame.render_widget(filter_bar, area);

        // Cursor sits after the focused value, inside the border
        if let Some(x) = cursor_x {
            let x = area.x.saturating_add(1).saturating_add(x as u16);
            if x < area.right().saturating_sub(1) {
                frame.set_cursor_position(Position::new(x, area.y + 1));
            }
        }
    }
}
