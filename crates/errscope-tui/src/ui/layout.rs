use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Layout helper for consistent screen layouts
pub struct Layout;

impl Layout {
    /// Split the log viewer into header, optional bars, table and status bar
    ///
    /// Returns (header, stats, filter, table, status).
    pub fn log_viewer(area: Rect, show_stats: bool, show_filter: bool) -> [Option<Rect>; 5] {
        let mut constraints = vec![Constraint::Length(3)]; // Header always
        if show_stats {
            constraints.push(Constraint::Length(3));
        }
        if show_filter {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(1)); // Table
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;
        let mut next = |enabled: bool| {
            if !enabled {
                return None;
            }
            let rect = chunks[idx];
            idx += 1;
            Some(rect)
        };

        [next(true), next(show_stats), next(show_filter), next(true), next(true)]
    }

    /// Centered popup of at most `width` x `height`, leaving a margin
    pub fn popup(area: Rect, width: u16, height: u16) -> Rect {
        let popup_width = width.min(area.width.saturating_sub(4));
        let popup_height = height.min(area.height.saturating_sub(4));

        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        Rect::new(x, y, popup_width, popup_height)
    }
}
