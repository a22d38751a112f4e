use errscope_types::{DateRange, FilterCriteria, LogRecord, RawLogLine};

use crate::LineParser;

/// Keep records whose message contains `keyword`, ignoring ASCII case
///
/// An empty or absent keyword keeps everything.
pub fn filter_by_keyword(mut records: Vec<LogRecord>, keyword: Option<&str>) -> Vec<LogRecord> {
    if let Some(keyword) = keyword.filter(|k| !k.is_empty()) {
        records.retain(|r| contains_ignore_case(&r.message, keyword));
    }
    records
}

/// Keep records whose severity equals `severity`, ignoring ASCII case
///
/// This is an exact match: "warning" matches "Warning" but not
/// "Warning: deprecated". An empty or absent tag keeps everything.
pub fn filter_by_type(mut records: Vec<LogRecord>, severity: Option<&str>) -> Vec<LogRecord> {
    if let Some(severity) = severity.filter(|s| !s.is_empty()) {
        records.retain(|r| r.severity.eq_ignore_ascii_case(severity));
    }
    records
}

/// Keep records whose timestamp lies in `range` (inclusive)
///
/// Records whose timestamp could not be parsed never match a bounded range.
pub fn filter_by_date_range(mut records: Vec<LogRecord>, range: &DateRange) -> Vec<LogRecord> {
    if !range.is_open() {
        records.retain(|r| in_range(r.instant(), range));
    }
    records
}

fn in_range(instant: Option<chrono::DateTime<chrono::Utc>>, range: &DateRange) -> bool {
    if range.is_open() {
        return true;
    }
    instant.is_some_and(|i| range.contains(i))
}

/// Substring search ignoring ASCII case, without allocating
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return true;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle))
}

/// All three criteria compiled into a single predicate
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    /// Keyword (None = any)
    keyword: Option<String>,

    /// Severity tag (None = any)
    severity: Option<String>,

    date_range: DateRange,
}

impl CompiledFilter {
    /// Create a filter from criteria; empty strings count as absent
    pub fn new(criteria: &FilterCriteria) -> Self {
        Self {
            keyword: criteria.keyword().map(str::to_string),
            severity: criteria.severity().map(str::to_string),
            date_range: criteria.date_range,
        }
    }

    /// Check if a record matches every criterion
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(severity) = &self.severity {
            if !record.severity.eq_ignore_ascii_case(severity) {
                return false;
            }
        }

        if let Some(keyword) = &self.keyword {
            if !contains_ignore_case(&record.message, keyword) {
                return false;
            }
        }

        in_range(record.instant(), &self.date_range)
    }

    /// Check if an unparsed line matches
    ///
    /// The keyword is searched in the whole line. Severity needs the line to
    /// follow the error log pattern, and the date range needs a leading
    /// timestamp; lines lacking them are excluded when that criterion is set.
    pub fn matches_raw(&self, line: &RawLogLine) -> bool {
        if let Some(keyword) = &self.keyword {
            if !contains_ignore_case(&line.text, keyword) {
                return false;
            }
        }

        if let Some(severity) = &self.severity {
            let matched = LineParser::parse(&line.text, line.line_number)
                .is_some_and(|r| r.severity.eq_ignore_ascii_case(severity));
            if !matched {
                return false;
            }
        }

        if self.date_range.is_open() {
            return true;
        }
        let instant = LineParser::leading_timestamp(&line.text).map(|ts| ts.with_timezone(&chrono::Utc));
        in_range(instant, &self.date_range)
    }

    /// Keep the matching records, preserving order
    pub fn apply(&self, mut records: Vec<LogRecord>) -> Vec<LogRecord> {
        if !self.is_empty() {
            records.retain(|r| self.matches(r));
        }
        records
    }

    /// Keep the matching raw lines, preserving order
    pub fn apply_raw(&self, mut lines: Vec<RawLogLine>) -> Vec<RawLogLine> {
        if !self.is_empty() {
            lines.retain(|l| self.matches_raw(l));
        }
        lines
    }

    /// Find keyword positions in a string (for highlighting)
    pub fn find_matches(&self, text: &str) -> Vec<(usize, usize)> {
        let Some(keyword) = &self.keyword else {
            return Vec::new();
        };
        let needle = keyword.as_bytes();
        let bytes = text.as_bytes();
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos + needle.len() <= bytes.len() {
            if bytes[pos..pos + needle.len()].eq_ignore_ascii_case(needle) {
                matches.push((pos, pos + needle.len()));
                pos += needle.len();
            } else {
                pos += 1;
            }
        }
        matches
    }

    /// Check if filter is empty (matches everything)
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.severity.is_none() && self.date_range.is_open()
    }
}
