use chrono_tz::Tz;
use ratatui::{
    Frame,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use errscope_types::LogRecord;

use crate::ui::{Layout, Theme};

/// Full view of a single entry
pub struct DetailPopup;

impl DetailPopup {
    pub fn render(frame: &mut Frame, record: &LogRecord, tz: Tz) {
        let popup_area = Layout::popup(frame.area(), 90, 20);
        frame.render_widget(Clear, popup_area);

        let (utc, local) = match record.timestamp {
            Some(ts) => (
                ts.with_timezone(&chrono::Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                ts.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string(),
            ),
            None => ("unresolved".to_string(), "unresolved".to_string()),
        };

        let lines = vec![
            Self::field("Date", record.date.clone()),
            Self::field("UTC", utc),
            Self::field(tz.name(), local),
            Line::from(vec![
                Span::styled(format!("{:>10}  ", "Type"), Theme::text_dim()),
                Span::styled(
                    record.severity.clone(),
                    Theme::severity(record.class()).add_modifier(Modifier::BOLD),
                ),
            ]),
            Self::field("File", record.file.clone()),
            Self::field("Line", record.line.to_string()),
            Self::field("Log line", record.line_number.to_string()),
            Line::from(""),
            Line::from(Span::styled(record.message.clone(), Theme::text())),
        ];

        let detail = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_focused())
                    .title(Span::styled(" Entry ", Theme::title()))
                    .title_bottom(Span::styled(" [Esc] Close ", Theme::text_dim())),
            );

        frame.render_widget(detail, popup_area);
    }

    fn field(label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:>10}  ", label), Theme::text_dim()),
            Span::styled(value, Theme::text()),
        ])
    }
}
