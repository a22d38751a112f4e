use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;

use crate::timestamp::parse_timestamp;
use errscope_types::LogRecord;

/// `[date zone] PHP <type>: <message> in <file> on line <n>`
///
/// The severity is lazy so it stops at the first colon ("Fatal error"),
/// while message and file are greedy so the last ` in ` / ` on line ` wins.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[(?P<date>\d{2}-\w{3}-\d{4} \d{2}:\d{2}:\d{2} \w+(?:/[\w+\-]+)*)\] PHP (?P<type>\w+(?: \w+)*?):\s+(?P<message>.*) in (?P<file>.*) on line (?P<line>\d+)",
    )
    .expect("line pattern is a valid regex")
});

/// Leading bracketed timestamp, for lines that do not match the full pattern
static LEADING_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(?P<date>[^\]]+)\]").expect("timestamp pattern is a valid regex"));

/// Log parser for extracting structure from raw error log lines
pub struct LineParser;

impl LineParser {
    /// Parse a raw line into a LogRecord
    ///
    /// Returns None when the line does not follow the error log pattern
    /// (continuation lines, stack traces, blank lines).
    pub fn parse(raw: &str, line_number: u64) -> Option<LogRecord> {
        let caps = LINE_PATTERN.captures(raw)?;
        let line = caps["line"].parse::<u32>().ok()?;
        let date = caps["date"].to_string();
        let timestamp = parse_timestamp(&date);

        Some(LogRecord {
            line_number,
            date,
            timestamp,
            severity: caps["type"].to_string(),
            message: caps["message"].to_string(),
            file: caps["file"].to_string(),
            line,
        })
    }

    /// Extract the bracketed timestamp at the start of a line
    pub fn leading_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
        let caps = LEADING_TIMESTAMP.captures(raw.trim_start())?;
        parse_timestamp(&caps["date"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Warning: Undefined variable $x in /var/www/app/index.php on line 42";

    #[test]
    fn test_parse_warning() {
        let record = LineParser::parse(SAMPLE, 7).unwrap();
        assert_eq!(record.date, "10-Nov-2024 14:23:01 Asia/Jakarta");
        assert_eq!(record.severity, "Warning");
        assert_eq!(record.message, "Undefined variable $x");
        assert_eq!(record.file, "/var/www/app/index.php");
        assert_eq!(record.line, 42);
        assert_eq!(record.line_number, 7);
        assert!(record.timestamp.is_some());
    }

    const FATAL: &str = "[10-Nov-2024 14:25:00 Europe/Berlin] PHP Fatal error:  Uncaught Error: Call to undefined function foo() in /srv/app/lib.php on line 3";
    const NESTED_IN: &str = "[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Notice: Value in array in /app/a.php on line 9";
    const DEEP_ZONE: &str = "[01-Jan-2025 00:00:00 America/Argentina/Buenos_Aires] PHP Notice: n in /app/x.php on line 1";
    const MULTIBYTE: &str = "[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Warning: ─── ✓ ümlaut in /app/ü.php on line 5";

    /// Walk the line left to right, consuming each captured field verbatim
    fn assert_fields_in_place(line: &str) {
        let r = LineParser::parse(line, 1).unwrap();
        let rest = line.strip_prefix('[').unwrap();
        let rest = rest.strip_prefix(r.date.as_str()).unwrap();
        let rest = rest.strip_prefix("] PHP ").unwrap();
        let rest = rest.strip_prefix(r.severity.as_str()).unwrap();
        let rest = rest.strip_prefix(':').unwrap().trim_start();
        let rest = rest.strip_prefix(r.message.as_str()).unwrap();
        let rest = rest.strip_prefix(" in ").unwrap();
        let rest = rest.strip_prefix(r.file.as_str()).unwrap();
        assert_eq!(rest, format!(" on line {}", r.line));

        let reparsed = LineParser::parse(&r.to_string(), 1).unwrap();
        assert_eq!(reparsed, r);
    }

    #[test]
    fn test_round_trip_fields() {
        let record = LineParser::parse(SAMPLE, 1).unwrap();
        assert_eq!(record.to_string(), SAMPLE);

        for line in [SAMPLE, FATAL, NESTED_IN, DEEP_ZONE, MULTIBYTE] {
            assert_fields_in_place(line);
        }
    }

    #[test]
    fn test_parse_multi_word_severity() {
        let line = "[10-Nov-2024 14:25:00 Europe/Berlin] PHP Fatal error:  Uncaught Error: Call to undefined function foo() in /srv/app/lib.php on line 3";
        let record = LineParser::parse(line, 1).unwrap();
        assert_eq!(record.severity, "Fatal error");
        assert_eq!(record.message, "Uncaught Error: Call to undefined function foo()");
        assert_eq!(record.file, "/srv/app/lib.php");
        assert_eq!(record.line, 3);
    }

    #[test]
    fn test_greedy_message_split() {
        let line = "[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Notice: Value in array in /app/a.php on line 9";
        let record = LineParser::parse(line, 1).unwrap();
        assert_eq!(record.message, "Value in array");
        assert_eq!(record.file, "/app/a.php");
    }

    #[test]
    fn test_parse_bare_zone_and_deep_zone() {
        let utc = "[01-Jan-2025 00:00:00 UTC] PHP Deprecated: Old API in /app/x.php on line 1";
        assert!(LineParser::parse(utc, 1).unwrap().timestamp.is_some());

        let deep = "[01-Jan-2025 00:00:00 America/Argentina/Buenos_Aires] PHP Notice: n in /app/x.php on line 1";
        let record = LineParser::parse(deep, 1).unwrap();
        assert_eq!(record.date, "01-Jan-2025 00:00:00 America/Argentina/Buenos_Aires");
        assert!(record.timestamp.is_some());
    }

    #[test]
    fn test_unknown_zone_keeps_record() {
        let line = "[10-Nov-2024 14:23:01 Mars/Olympus] PHP Warning: x in /a.php on line 1";
        let record = LineParser::parse(line, 1).unwrap();
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_malformed_lines() {
        assert!(LineParser::parse("", 1).is_none());
        assert!(LineParser::parse("   ", 1).is_none());
        assert!(LineParser::parse("#0 /var/www/app/index.php(12): foo()", 1).is_none());
        assert!(
            LineParser::parse("[10-Nov-2024 14:23:01 Asia/Jakarta] Warning: x in /a.php on line 1", 1).is_none()
        );
        assert!(LineParser::parse("[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Warning: x in /a.php", 1).is_none());
        assert!(LineParser::parse("Stack trace:", 1).is_none());
    }

    #[test]
    fn test_line_number_overflow_is_no_match() {
        let line = "[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Warning: x in /a.php on line 99999999999";
        assert!(LineParser::parse(line, 1).is_none());
    }

    #[test]
    fn test_leading_timestamp() {
        assert!(LineParser::leading_timestamp("[10-Nov-2024 14:23:01 Asia/Jakarta] anything").is_some());
        assert!(LineParser::leading_timestamp("no timestamp here").is_none());
    }

    #[test]
    fn test_multibyte_utf8_no_panic() {
        let line = "[10-Nov-2024 14:23:01 Asia/Jakarta] PHP Warning: ─── ✓ ümlaut in /app/ü.php on line 5";
        let record = LineParser::parse(line, 1).unwrap();
        assert_eq!(record.message, "─── ✓ ümlaut");
        assert_eq!(record.file, "/app/ü.php");
    }
}
