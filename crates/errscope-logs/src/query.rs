//! Request parameters for one pipeline invocation
//!
//! Presentation layers hand the pipeline a `LogQuery`; nothing in the core
//! reads filter state from anywhere else.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;
use url::form_urlencoded;

use crate::LogError;
use crate::paginator::Paginator;
use crate::timestamp::{day_end, day_start};
use errscope_types::{DateRange, FilterCriteria};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw query parameters as received from a form or query string
///
/// Values are kept as text until `into_query` validates them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub search: Option<String>,
    pub error_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
}

impl QueryParams {
    /// Parse `search=..&errorType=..&startDate=..&endDate=..&page=..`
    ///
    /// A leading `?` is ignored, as are unknown keys. Later duplicates win.
    pub fn from_query_string(qs: &str) -> Self {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        let mut params = Self::default();

        for (key, value) in form_urlencoded::parse(qs.as_bytes()) {
            let value = Some(value.into_owned());
            match key.as_ref() {
                "search" => params.search = value,
                "errorType" => params.error_type = value,
                "startDate" => params.start_date = value,
                "endDate" => params.end_date = value,
                "page" => params.page = value,
                _ => {}
            }
        }
        params
    }

    /// Validate into a LogQuery, reading dates as whole days in `tz`
    pub fn into_query(self, per_page: usize, tz: Tz) -> Result<LogQuery, LogError> {
        let start = parse_day("startDate", self.start_date.as_deref())?;
        let end = parse_day("endDate", self.end_date.as_deref())?;
        let start = start.map(|d| bound("startDate", d, day_start(d, tz))).transpose()?;
        let end = end.map(|d| bound("endDate", d, day_end(d, tz))).transpose()?;
        let date_range = DateRange::new(start, end);

        let criteria = FilterCriteria::default()
            .with_keyword(self.search.unwrap_or_default())
            .with_severity(self.error_type.unwrap_or_default())
            .with_date_range(date_range);

        Ok(LogQuery {
            criteria,
            page: parse_page(self.page.as_deref()),
            per_page,
        })
    }
}

/// Filter criteria plus the requested page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogQuery {
    pub criteria: FilterCriteria,

    /// Requested page (1-based)
    pub page: i64,

    pub per_page: usize,
}

impl LogQuery {
    pub fn new(criteria: FilterCriteria, page: i64, per_page: usize) -> Self {
        Self {
            criteria,
            page,
            per_page,
        }
    }

    /// Parse a query string; see `QueryParams::from_query_string`
    pub fn from_query_string(qs: &str, per_page: usize, tz: Tz) -> Result<Self, LogError> {
        QueryParams::from_query_string(qs).into_query(per_page, tz)
    }

    /// Same criteria on a different page
    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Render back into query-string form, dates as days in `tz`
    pub fn to_query_string(&self, tz: Tz) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(keyword) = self.criteria.keyword() {
            out.append_pair("search", keyword);
        }
        if let Some(severity) = self.criteria.severity() {
            out.append_pair("errorType", severity);
        }
        if let Some(start) = self.criteria.date_range.start {
            out.append_pair("startDate", &start.with_timezone(&tz).format(DATE_FORMAT).to_string());
        }
        if let Some(end) = self.criteria.date_range.end {
            out.append_pair("endDate", &end.with_timezone(&tz).format(DATE_FORMAT).to_string());
        }
        out.append_pair("page", &self.page.to_string());
        out.finish()
    }
}

impl Default for LogQuery {
    fn default() -> Self {
        Self::new(FilterCriteria::default(), 1, Paginator::DEFAULT_PER_PAGE)
    }
}

/// Parse a `YYYY-MM-DD` day; empty input means no bound
pub fn parse_day(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, LogError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
            .map(Some)
            .map_err(|_| LogError::InvalidDate {
                field,
                value: v.to_string(),
            }),
    }
}

fn bound(field: &'static str, day: NaiveDate, instant: Option<DateTime<Utc>>) -> Result<DateTime<Utc>, LogError> {
    instant.ok_or_else(|| LogError::InvalidDate {
        field,
        value: day.format(DATE_FORMAT).to_string(),
    })
}

/// Page number from text, falling back to 1
fn parse_page(value: Option<&str>) -> i64 {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => 1,
        Some(v) => v.parse().unwrap_or_else(|_| {
            warn!(page = v, "ignoring non-numeric page parameter");
            1
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::resolve_time_zone;
    use chrono::TimeZone;

    fn jakarta() -> Tz {
        resolve_time_zone("Asia/Jakarta").unwrap()
    }

    #[test]
    fn test_defaults() {
        let query = LogQuery::from_query_string("", 50, Tz::UTC).unwrap();
        assert_eq!(query, LogQuery::default());
        assert!(query.criteria.is_empty());
    }

    #[test]
    fn test_full_query_string() {
        let qs = "?search=Undefined+variable&errorType=Fatal%20error&startDate=2024-11-10&endDate=2024-11-10&page=2&extra=1";
        let query = LogQuery::from_query_string(qs, 25, jakarta()).unwrap();

        assert_eq!(query.criteria.keyword(), Some("Undefined variable"));
        assert_eq!(query.criteria.severity(), Some("Fatal error"));
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 25);
        assert_eq!(
            query.criteria.date_range.start,
            Some(Utc.with_ymd_and_hms(2024, 11, 9, 17, 0, 0).unwrap())
        );
        assert_eq!(
            query.criteria.date_range.end,
            Some(Utc.with_ymd_and_hms(2024, 11, 10, 16, 59, 59).unwrap())
        );
    }

    #[test]
    fn test_empty_values_are_absent() {
        let query = LogQuery::from_query_string("search=&errorType=&startDate=&endDate=&page=", 50, Tz::UTC).unwrap();
        assert!(query.criteria.is_empty());
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_bad_page_falls_back() {
        assert_eq!(LogQuery::from_query_string("page=abc", 50, Tz::UTC).unwrap().page, 1);
        assert_eq!(LogQuery::from_query_string("page=-2", 50, Tz::UTC).unwrap().page, -2);
    }

    #[test]
    fn test_bad_date_rejected() {
        let err = LogQuery::from_query_string("startDate=10-11-2024", 50, Tz::UTC).unwrap_err();
        assert!(matches!(err, LogError::InvalidDate { field: "startDate", .. }));
    }

    #[test]
    fn test_out_of_range_day_rejected() {
        let tz = resolve_time_zone("America/New_York").unwrap();
        let err = LogQuery::from_query_string("endDate=%2B262142-12-31", 50, tz).unwrap_err();
        assert!(matches!(err, LogError::InvalidDate { field: "endDate", .. }));
    }

    #[test]
    fn test_query_string_round_trip() {
        let qs = "search=memory&errorType=Warning&startDate=2024-11-01&endDate=2024-11-30&page=3";
        let query = LogQuery::from_query_string(qs, 50, jakarta()).unwrap();
        assert_eq!(query.to_query_string(jakarta()), qs);
        assert_eq!(query.with_page(4).page, 4);
    }
}
