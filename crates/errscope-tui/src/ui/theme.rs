use ratatui::style::{Color, Modifier, Style, Stylize};

use errscope_types::SeverityClass;

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const EMPHASIS: Color = Color::Yellow;
const BAR_BG: Color = Color::DarkGray;

/// Styles shared by the viewer widgets
pub struct Theme;

impl Theme {
    pub fn border() -> Style {
        Style::new().fg(MUTED)
    }

    pub fn border_focused() -> Style {
        Style::new().fg(ACCENT)
    }

    /// Filter bar border: red after a rejected submission, yellow while editing
    pub fn form_border(editing: bool, rejected: bool) -> Style {
        match (editing, rejected) {
            (_, true) => Style::new().fg(Color::Red),
            (true, false) => Style::new().fg(EMPHASIS),
            (false, false) => Self::border(),
        }
    }

    pub fn title() -> Style {
        Style::new().fg(ACCENT).bold()
    }

    pub fn text() -> Style {
        Style::new().fg(Color::White)
    }

    pub fn text_dim() -> Style {
        Style::new().fg(MUTED)
    }

    pub fn text_highlight() -> Style {
        Style::new().fg(EMPHASIS).bold()
    }

    /// Key name in the help listing
    pub fn key() -> Style {
        Style::new().fg(Color::Green)
    }

    /// Keyword match inside a message
    pub fn search_match() -> Style {
        Style::new().fg(Color::Black).bg(EMPHASIS)
    }

    pub fn table_header() -> Style {
        Self::title().add_modifier(Modifier::UNDERLINED)
    }

    pub fn row_selected() -> Style {
        Style::new().bg(MUTED).bold()
    }

    /// Fatal entries are bold on top of their class color
    pub fn severity(class: SeverityClass) -> Style {
        let style = Style::new().fg(class.color());
        match class {
            SeverityClass::Fatal => style.bold(),
            _ => style,
        }
    }

    pub fn status_bar() -> Style {
        Style::new().fg(Color::Gray).bg(BAR_BG)
    }

    pub fn status_bar_key() -> Style {
        Style::new().fg(EMPHASIS).bg(BAR_BG).bold()
    }

    /// Transient message on the status bar
    pub fn status_message() -> Style {
        Self::error().bg(BAR_BG)
    }

    pub fn error() -> Style {
        Style::new().fg(Color::Red).bold()
    }
}
