use std::path::Path;

use tracing::debug;

use crate::{CompiledFilter, LogError, LogLoader, LogQuery, Paginator};
use errscope_types::{FilterCriteria, LogRecord, PageResult, RawLogLine};

/// Load, filter and paginate the structured entries of a log file
///
/// Every call reads the file afresh; nothing is cached between calls.
pub fn run(path: impl AsRef<Path>, query: &LogQuery) -> Result<PageResult<LogRecord>, LogError> {
    let paginator = Paginator::new(query.per_page)?;
    let matches = collect_matches(path, &query.criteria)?;
    let page = paginator.paginate(matches, query.page);
    debug!(
        page = page.current_page,
        total_pages = page.total_pages,
        matched = page.total_matched,
        "paginated"
    );
    Ok(page)
}

/// Same as `run`, over unparsed lines
pub fn run_raw(path: impl AsRef<Path>, query: &LogQuery) -> Result<PageResult<RawLogLine>, LogError> {
    let paginator = Paginator::new(query.per_page)?;
    let lines = LogLoader::load_raw(path)?;
    let matches = CompiledFilter::new(&query.criteria).apply_raw(lines);
    Ok(paginator.paginate(matches, query.page))
}

/// All structured entries matching `criteria`, in file order
pub fn collect_matches(path: impl AsRef<Path>, criteria: &FilterCriteria) -> Result<Vec<LogRecord>, LogError> {
    let records = LogLoader::load(path)?;
    let loaded = records.len();
    let matches = CompiledFilter::new(criteria).apply(records);
    debug!(loaded, matched = matches.len(), "filtered records");
    Ok(matches)
}
