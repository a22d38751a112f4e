use std::path::PathBuf;

use chrono_tz::Tz;
use ratatui::widgets::TableState;
use tracing::debug;

use super::FilterForm;
use errscope_logs::{
    CompiledFilter, LogError, LogQuery, LogRecord, PageResult, Paginator, SeverityCounts, collect_matches,
};

/// Number of ticks a transient message stays visible
const MESSAGE_TICKS: u16 = 40;

/// UI-specific transient state
pub struct UiState {
    /// Is the filter form being edited?
    pub form_active: bool,

    /// Filter form contents
    pub form: FilterForm,

    /// Error from the last filter submission (e.g., malformed date)
    pub form_error: Option<String>,

    /// Is help overlay visible?
    pub help_visible: bool,

    /// Is the detail popup for the selected row visible?
    pub detail_visible: bool,

    /// Show severity statistics?
    pub stats_visible: bool,

    /// Row selection within the current page
    pub table_state: TableState,

    /// Message to display (error or info)
    pub message: Option<String>,

    /// Ticks left before the message is dismissed
    pub message_ticks: u16,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            form_active: false,
            form: FilterForm::default(),
            form_error: None,
            help_visible: false,
            detail_visible: false,
            stats_visible: false,
            table_state: TableState::default(),
            message: None,
            message_ticks: 0,
        }
    }
}

/// Global application state
///
/// Holds the request (path, query) and the last result. Every request reads
/// the log file again; nothing survives between requests except the result
/// being displayed.
pub struct AppState {
    /// Error log being viewed
    pub log_path: PathBuf,

    /// Applied criteria and page
    pub query: LogQuery,

    /// Zone used to read date inputs
    pub tz: Tz,

    /// Severity values offered for quick cycling
    pub error_types: Vec<String>,

    /// Result of the last request (None if it failed)
    pub page: Option<PageResult<LogRecord>>,

    /// Severity counts over all matches (only while stats are shown)
    pub counts: Option<SeverityCounts>,

    /// Keyword highlighter for the current criteria
    pub highlighter: CompiledFilter,

    /// UI state
    pub ui_state: UiState,

    /// Whether app should quit
    pub should_quit: bool,

    /// Dirty flag for rendering - only render when true
    pub render_dirty: bool,
}

impl AppState {
    pub fn new(
        log_path: PathBuf,
        query: LogQuery,
        tz: Tz,
        error_types: Vec<String>,
    ) -> Self {
        let ui_state = UiState {
            form: FilterForm::from_query(&query, tz),
            ..UiState::default()
        };

        Self {
            log_path,
            highlighter: CompiledFilter::new(&query.criteria),
            query,
            tz,
            error_types,
            page: None,
            counts: None,
            ui_state,
            should_quit: false,
            render_dirty: true, // Start dirty to ensure initial render
        }
    }

    /// Run the pipeline for the current query
    pub fn refresh(&mut self) {
        self.render_dirty = true;
        match self.load_page() {
            Ok((page, counts)) => {
                debug!(
                    page = page.current_page,
                    total_pages = page.total_pages,
                    matched = page.total_matched,
                    "refreshed page"
                );
                let selected = if page.items.is_empty() { None } else { Some(0) };
                self.ui_state.table_state.select(selected);
                self.page = Some(page);
                self.counts = counts;
            }
            Err(e) => {
                self.page = None;
                self.counts = None;
                self.ui_state.table_state.select(None);
                self.show_error(e.to_string());
            }
        }
    }

    fn load_page(&self) -> Result<(PageResult<LogRecord>, Option<SeverityCounts>), LogError> {
        let paginator = Paginator::new(self.query.per_page)?;
        let matches = collect_matches(&self.log_path, &self.query.criteria)?;
        let counts = self
            .ui_state
            .stats_visible
            .then(|| SeverityCounts::from_records(&matches));
        Ok((paginator.paginate(matches, self.query.page), counts))
    }

    /// Total pages of the last result (0 when nothing matched)
    pub fn total_pages(&self) -> usize {
        self.page.as_ref().map_or(0, |p| p.total_pages)
    }

    /// Jump to a page and reload
    pub fn go_to_page(&mut self, page: i64) {
        if page != self.query.page {
            self.query.page = page;
            self.refresh();
        }
    }

    pub fn next_page(&mut self) {
        if self.page.as_ref().is_some_and(|p| p.has_next()) {
            self.go_to_page(self.query.page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.query.page > 1 {
            let last = self.total_pages().max(1) as i64;
            self.go_to_page((self.query.page - 1).min(last));
        }
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.total_pages().max(1) as i64);
    }

    /// Number of rows on the current page
    pub fn row_count(&self) -> usize {
        self.page.as_ref().map_or(0, |p| p.items.len())
    }

    /// Record under the cursor
    pub fn selected_record(&self) -> Option<&LogRecord> {
        let idx = self.ui_state.table_state.selected()?;
        self.page.as_ref()?.items.get(idx)
    }

    /// Move selection up, wrapping to the last row
    pub fn select_up(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }

        let i = match self.ui_state.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.ui_state.table_state.select(Some(i));
    }

    /// Move selection down, wrapping to the first row
    pub fn select_down(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }

        let i = match self.ui_state.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.ui_state.table_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.row_count() > 0 {
            self.ui_state.table_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.row_count();
        if len > 0 {
            self.ui_state.table_state.select(Some(len - 1));
        }
    }

    /// Replace the applied criteria and reload from page 1
    pub fn set_query(&mut self, query: LogQuery) {
        self.highlighter = CompiledFilter::new(&query.criteria);
        self.query = LogQuery { page: 1, ..query };
        self.refresh();
    }

    /// Open the filter form seeded with the applied criteria
    pub fn start_filter(&mut self) {
        self.ui_state.form = FilterForm::from_query(&self.query, self.tz);
        self.ui_state.form_error = None;
        self.ui_state.form_active = true;
    }

    /// Close the form without applying
    pub fn cancel_filter(&mut self) {
        self.ui_state.form_active = false;
        self.ui_state.form_error = None;
    }

    /// Apply the form; invalid input keeps the form open
    pub fn apply_filter(&mut self) {
        match self
            .ui_state
            .form
            .to_params()
            .into_query(self.query.per_page, self.tz)
        {
            Ok(query) => {
                self.ui_state.form_active = false;
                self.ui_state.form_error = None;
                self.set_query(query);
            }
            Err(e) => {
                self.ui_state.form_error = Some(e.to_string());
            }
        }
    }

    /// Drop every criterion
    pub fn clear_filters(&mut self) {
        self.ui_state.form = FilterForm::default();
        self.set_query(LogQuery::new(Default::default(), 1, self.query.per_page));
    }

    /// Step the severity criterion through the offered types and back to "any"
    pub fn cycle_error_type(&mut self, forward: bool) {
        let current = self
            .query
            .criteria
            .severity()
            .and_then(|s| self.error_types.iter().position(|t| t.eq_ignore_ascii_case(s)));
        let len = self.error_types.len();
        if len == 0 {
            return;
        }

        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(len - 1),
            (Some(i), true) if i + 1 < len => Some(i + 1),
            (Some(i), false) if i > 0 => Some(i - 1),
            _ => None,
        };

        let severity = next.map(|i| self.error_types[i].clone()).unwrap_or_default();
        let mut query = self.query.clone();
        query.criteria = query.criteria.with_severity(severity);
        self.set_query(query);
    }

    /// Show an error or info message for a while
    pub fn show_error(&mut self, msg: String) {
        self.ui_state.message = Some(msg);
        self.ui_state.message_ticks = MESSAGE_TICKS;
        self.render_dirty = true;
    }

    /// Dismiss the message
    pub fn dismiss_error(&mut self) {
        self.ui_state.message = None;
        self.ui_state.message_ticks = 0;
        self.render_dirty = true;
    }

    /// Count down the message timer
    pub fn tick(&mut self) {
        if self.ui_state.message.is_some() {
            self.ui_state.message_ticks = self.ui_state.message_ticks.saturating_sub(1);
            if self.ui_state.message_ticks == 0 {
                self.dismiss_error();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn state_for(content: &str, per_page: usize) -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let query = LogQuery::new(Default::default(), 1, per_page);
        let types = vec!["Warning".to_string(), "Notice".to_string()];
        let mut state = AppState::new(file.path().to_path_buf(), query, Tz::UTC, types);
        state.refresh();
        (state, file)
    }

    fn log_lines(n: usize, severity: &str) -> String {
        (0..n)
            .map(|i| format!("[10-Nov-2024 10:00:{:02} UTC] PHP {}: msg {} in /a.php on line {}\n", i % 60, severity, i, i + 1))
            .collect()
    }

    #[test]
    fn test_paging_stays_in_range() {
        let (mut state, _file) = state_for(&log_lines(25, "Warning"), 10);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.row_count(), 10);

        state.next_page();
        state.next_page();
        state.next_page();
        assert_eq!(state.query.page, 3);
        assert_eq!(state.row_count(), 5);

        state.prev_page();
        assert_eq!(state.query.page, 2);
        state.go_to_page(1);
        state.prev_page();
        assert_eq!(state.query.page, 1);

        state.last_page();
        assert_eq!(state.query.page, 3);
    }

    #[test]
    fn test_selection_wraps() {
        let (mut state, _file) = state_for(&log_lines(3, "Warning"), 10);
        assert_eq!(state.ui_state.table_state.selected(), Some(0));
        state.select_up();
        assert_eq!(state.ui_state.table_state.selected(), Some(2));
        state.select_down();
        assert_eq!(state.ui_state.table_state.selected(), Some(0));
        assert_eq!(state.selected_record().map(|r| r.line), Some(1));
    }

    #[test]
    fn test_cycle_error_type() {
        let mut content = log_lines(2, "Warning");
        content.push_str(&log_lines(1, "Notice"));
        let (mut state, _file) = state_for(&content, 10);

        state.cycle_error_type(true);
        assert_eq!(state.query.criteria.severity(), Some("Warning"));
        assert_eq!(state.page.as_ref().unwrap().total_matched, 2);

        state.cycle_error_type(true);
        assert_eq!(state.query.criteria.severity(), Some("Notice"));

        state.cycle_error_type(true);
        assert_eq!(state.query.criteria.severity(), None);
        assert_eq!(state.page.as_ref().unwrap().total_matched, 3);

        state.cycle_error_type(false);
        assert_eq!(state.query.criteria.severity(), Some("Notice"));
    }

    #[test]
    fn test_invalid_form_keeps_form_open() {
        let (mut state, _file) = state_for(&log_lines(3, "Warning"), 10);
        state.start_filter();
        state.ui_state.form.start_date = "yesterday".to_string();
        state.apply_filter();
        assert!(state.ui_state.form_active);
        assert!(state.ui_state.form_error.is_some());

        state.ui_state.form.start_date.clear();
        state.ui_state.form.search = "msg 1".to_string();
        state.apply_filter();
        assert!(!state.ui_state.form_active);
        assert_eq!(state.page.as_ref().unwrap().total_matched, 1);
    }

    #[test]
    fn test_missing_file_shows_message() {
        let mut state = AppState::new(PathBuf::from("/no/such/error_log"), LogQuery::default(), Tz::UTC, Vec::new());
        state.refresh();
        assert!(state.page.is_none());
        assert!(state.ui_state.message.as_deref().unwrap().contains("not found"));
    }

    #[test]
    fn test_message_expires() {
        let (mut state, _file) = state_for("", 10);
        state.show_error("hello".to_string());
        for _ in 0..MESSAGE_TICKS {
            state.tick();
        }
        assert!(state.ui_state.message.is_none());
    }
}
