//! Log processing for errscope
//!
//! This crate provides error log parsing, loading, filtering and pagination.

mod error;
mod filter;
mod loader;
mod paginator;
mod parser;
mod pipeline;
mod query;
mod stats;
pub mod timestamp;

pub use error::LogError;
pub use filter::{CompiledFilter, filter_by_date_range, filter_by_keyword, filter_by_type};
pub use loader::LogLoader;
pub use paginator::Paginator;
pub use parser::LineParser;
pub use pipeline::{collect_matches, run, run_raw};
pub use query::{LogQuery, QueryParams, parse_day};
pub use stats::SeverityCounts;

// Re-export types used in our public API
pub use errscope_types::{
    DateRange, ERROR_TYPES, FilterCriteria, LogRecord, PageResult, RawLogLine, SeverityClass,
};
