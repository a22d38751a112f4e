use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use errscope_logs::CompiledFilter;
use errscope_types::LogRecord;

use crate::app::AppState;
use crate::ui::{Layout, Theme};
use crate::ui::components::{DetailPopup, FilterBar, HelpOverlay, LOG_VIEWER_HINTS, StatsBar, StatusBar};

/// Paged table of matching entries
pub struct LogViewerScreen;

impl LogViewerScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let show_filter = state.ui_state.form_active || !state.query.criteria.is_empty();
        let [header, stats, filter, table, status] =
            Layout::log_viewer(frame.area(), state.ui_state.stats_visible, show_filter);

        if let Some(area) = header {
            Self::render_header(frame, area, state);
        }
        if let Some(area) = stats {
            StatsBar::render(frame, area, state.counts.as_ref());
        }
        if let Some(area) = filter {
            FilterBar::render(
                frame,
                area,
                &state.ui_state.form,
                state.ui_state.form_active,
                state.ui_state.form_error.as_deref(),
            );
        }
        if let Some(area) = table {
            Self::render_table(frame, area, state);
        }
        if let Some(area) = status {
            Self::render_status_bar(frame, area, state);
        }

        // Popups on top
        if state.ui_state.detail_visible
            && let Some(record) = state.selected_record()
        {
            DetailPopup::render(frame, record, state.tz);
        }
        if state.ui_state.help_visible {
            HelpOverlay::render(frame);
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let file_name = state
            .log_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| state.log_path.display().to_string());

        let (page_text, matched_text) = match &state.page {
            Some(page) => (
                format!("page {}/{}", page.current_page, page.total_pages),
                format!("{} matched", page.total_matched),
            ),
            None => ("page -/-".to_string(), "no data".to_string()),
        };

        let mut spans = vec![
            Span::styled("errscope", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(file_name, Theme::text_highlight()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(page_text, Theme::text()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(matched_text, Theme::text()),
        ];

        if let Some(severity) = state.query.criteria.severity() {
            spans.push(Span::styled(" │ ", Theme::text_dim()));
            spans.push(Span::styled(
                severity.to_string(),
                Theme::severity(errscope_types::SeverityClass::from_tag(severity)),
            ));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_table(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(" Entries ", Theme::title()));

        let Some(page) = &state.page else {
            let text = Paragraph::new(Line::from(Span::styled(
                " Log file could not be read. [r] Retry",
                Theme::error(),
            )))
            .block(block);
            frame.render_widget(text, area);
            return;
        };

        if page.items.is_empty() {
            let message = if page.total_matched > 0 {
                format!(" Page {} is past the end ({} pages). [g] First page", page.current_page, page.total_pages)
            } else if state.query.criteria.is_empty() {
                " No entries in this log".to_string()
            } else {
                " No entries match the current filters. [x] Clear".to_string()
            };
            let text = Paragraph::new(Line::from(Span::styled(message, Theme::text_dim()))).block(block);
            frame.render_widget(text, area);
            return;
        }

        let offset = page.offset();
        let rows: Vec<Row> = page
            .items
            .iter()
            .enumerate()
            .map(|(i, record)| Self::record_row(offset + i + 1, record, &state.highlighter))
            .collect();

        let header = Row::new(["#", "Date", "Type", "Message", "Location"]).style(Theme::table_header());

        let widths = [
            Constraint::Length(6),
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Percentage(30),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Theme::row_selected())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut state.ui_state.table_state);
    }

    fn record_row<'a>(index: usize, record: &'a LogRecord, highlighter: &CompiledFilter) -> Row<'a> {
        // Zone name is dropped in the table; the detail view shows it
        let date = record
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| record.date.clone());

        Row::new([
            Cell::from(Span::styled(index.to_string(), Theme::text_dim())),
            Cell::from(Span::styled(date, Theme::text())),
            Cell::from(Span::styled(record.severity.as_str(), Theme::severity(record.class()))),
            Cell::from(highlight_matches(&record.message, highlighter, Theme::text())),
            Cell::from(Span::styled(record.location(), Theme::text_dim())),
        ])
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut bar = StatusBar::new(LOG_VIEWER_HINTS).message(state.ui_state.message.as_deref());

        if let Some(page) = &state.page
            && let Some(selected) = state.ui_state.table_state.selected()
        {
            bar = bar.position(page.offset() + selected + 1, page.total_matched);
        }

        frame.render_widget(bar, area);
    }
}

/// Split text into spans with keyword matches highlighted
fn highlight_matches<'a>(text: &'a str, highlighter: &CompiledFilter, base: Style) -> Line<'a> {
    let matches = highlighter.find_matches(text);
    if matches.is_empty() {
        return Line::from(Span::styled(text, base));
    }

    let mut spans = Vec::new();
    let mut last_end = 0;
    for (start, end) in matches {
        if start > last_end {
            spans.push(Span::styled(&text[last_end..start], base));
        }
        spans.push(Span::styled(&text[start..end], Theme::search_match()));
        last_end = end;
    }
    if last_end < text.len() {
        spans.push(Span::styled(&text[last_end..], base));
    }
    Line::from(spans)
}
