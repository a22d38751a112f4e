use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use errscope_logs::SeverityCounts;
use errscope_types::SeverityClass;

use crate::ui::Theme;

/// Severity counts over every match of the applied criteria
pub struct StatsBar;

impl StatsBar {
    pub fn render(frame: &mut Frame, area: Rect, counts: Option<&SeverityCounts>) {
        let mut spans = vec![Span::styled(" ", Theme::text())];

        match counts {
            Some(counts) => {
                for class in [
                    SeverityClass::Fatal,
                    SeverityClass::Warning,
                    SeverityClass::Notice,
                    SeverityClass::Deprecated,
                    SeverityClass::Other,
                ] {
                    let count = counts.class(class);
                    // Skip the catch-all class when empty
                    if class == SeverityClass::Other && count == 0 {
                        continue;
                    }
                    spans.push(Span::styled(
                        format!("{}:", class.as_str()),
                        Theme::severity(class).add_modifier(Modifier::BOLD),
                    ));
                    spans.push(Span::styled(format!("{} ", count), Theme::text()));
                }

                spans.push(Span::styled("│ ", Theme::text_dim()));
                spans.push(Span::styled("Total:", Theme::text_dim()));
                spans.push(Span::styled(counts.total().to_string(), Theme::text()));
            }
            None => spans.push(Span::styled("no data", Theme::text_dim())),
        }

        let stats_widget = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(" Stats ", Theme::title())),
        );

        frame.render_widget(stats_widget, area);
    }
}
