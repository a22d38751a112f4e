//! Shared types for errscope
//!
//! This crate contains data structures used across multiple errscope crates.

use chrono::{DateTime, FixedOffset, Utc};
use ratatui::style::Color;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Log Types
// ============================================================================

/// Severity values offered by the filter UI.
pub const ERROR_TYPES: &[&str] = &["Warning", "Notice", "Fatal error", "Parse error", "Deprecated"];

/// A parsed error log entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Physical line within the source file (1-based)
    pub line_number: u64,

    /// Timestamp text as captured, including the zone identifier
    pub date: String,

    /// Parsed timestamp (None if the text could not be resolved)
    pub timestamp: Option<DateTime<FixedOffset>>,

    /// Severity tag following the `PHP` marker ("Warning", "Fatal error", ...)
    #[serde(rename = "type")]
    pub severity: String,

    pub message: String,

    /// Source file that raised the error
    pub file: String,

    /// Line within `file`
    pub line: u32,
}

impl LogRecord {
    /// Coarse class of the severity tag, used for coloring and stats
    pub fn class(&self) -> SeverityClass {
        SeverityClass::from_tag(&self.severity)
    }

    /// Timestamp converted to UTC for range comparisons
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.timestamp.map(|ts| ts.with_timezone(&Utc))
    }

    /// `file:line` location string
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

/// Re-serializes the record into the error log line format
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] PHP {}: {} in {} on line {}",
            self.date, self.severity, self.message, self.file, self.line
        )
    }
}

/// An unparsed log line, kept as-is
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawLogLine {
    /// Physical line within the source file (1-based)
    pub line_number: u64,

    pub text: String,
}

impl RawLogLine {
    pub fn new(line_number: u64, text: String) -> Self {
        Self { line_number, text }
    }
}

/// Coarse severity classification
///
/// The severity tag itself is an open set; this only groups the common
/// tags so they can be colored and counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SeverityClass {
    Fatal,
    Warning,
    Notice,
    Deprecated,
    Other,
}

impl SeverityClass {
    /// Classify a severity tag
    pub fn from_tag(tag: &str) -> Self {
        let lower = tag.to_ascii_lowercase();
        if lower.contains("fatal") || lower.contains("parse") || lower == "error" {
            Self::Fatal
        } else if lower.starts_with("warn") {
            Self::Warning
        } else if lower == "notice" || lower.starts_with("strict") {
            Self::Notice
        } else if lower == "deprecated" {
            Self::Deprecated
        } else {
            Self::Other
        }
    }

    /// Get display color for this class
    pub fn color(&self) -> Color {
        match self {
            Self::Fatal => Color::Red,
            Self::Warning => Color::Yellow,
            Self::Notice => Color::Cyan,
            Self::Deprecated => Color::Magenta,
            Self::Other => Color::White,
        }
    }

    /// Short display string (3 chars)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FTL",
            Self::Warning => "WRN",
            Self::Notice => "NTC",
            Self::Deprecated => "DEP",
            Self::Other => "???",
        }
    }
}

// ============================================================================
// Query Types
// ============================================================================

/// Inclusive time range; a missing bound is open
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// True when neither bound is set
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check whether an instant lies within the range
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant <= end)
    }
}

/// Filter configuration; every supplied criterion must match
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the message
    pub keyword: Option<String>,

    /// Case-insensitive exact severity tag
    pub severity: Option<String>,

    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = non_empty(keyword.into());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = non_empty(severity.into());
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Keyword, ignoring empty input
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }

    /// Severity tag, ignoring empty input
    pub fn severity(&self) -> Option<&str> {
        self.severity.as_deref().filter(|s| !s.is_empty())
    }

    /// Check if no criterion is set (matches everything)
    pub fn is_empty(&self) -> bool {
        self.keyword().is_none() && self.severity().is_none() && self.date_range.is_open()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// One page of matched entries plus pagination metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,

    /// Number of entries matching the criteria across all pages
    pub total_matched: usize,

    pub total_pages: usize,

    /// Requested page (1-based, may lie outside `1..=total_pages`)
    pub current_page: i64,

    pub per_page: usize,
}

impl<T> PageResult<T> {
    /// Whether a page follows the current one
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages as i64
    }

    /// Index of the first item on this page within the full match list (0-based)
    pub fn offset(&self) -> usize {
        let page = self.current_page.max(1) as usize;
        (page - 1).saturating_mul(self.per_page)
    }
}
