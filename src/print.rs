use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use errscope_logs::{LogRecord, PageResult, RawLogLine, SeverityCounts};

const SEPARATOR_WIDTH: usize = 50;

fn write_header<T>(out: &mut impl Write, page: &PageResult<T>) -> Result<()> {
    writeln!(
        out,
        "Total matched: {} | Page {}/{}",
        page.total_matched, page.current_page, page.total_pages
    )?;
    Ok(())
}

/// One block per entry, separated by a dashed line
pub fn write_records(out: &mut impl Write, page: &PageResult<LogRecord>) -> Result<()> {
    write_header(out, page)?;
    for record in &page.items {
        writeln!(out, "Date: {}", record.date)?;
        writeln!(out, "Type: {}", record.severity)?;
        writeln!(out, "Message: {}", record.message)?;
        writeln!(out, "File: {}", record.file)?;
        writeln!(out, "Line: {}", record.line)?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    }
    Ok(())
}

/// Unparsed lines prefixed by their line number
pub fn write_raw(out: &mut impl Write, page: &PageResult<RawLogLine>) -> Result<()> {
    write_header(out, page)?;
    for line in &page.items {
        writeln!(out, "{:>6}: {}", line.line_number, line.text)?;
    }
    Ok(())
}

pub fn write_json<T: Serialize>(out: &mut impl Write, page: &PageResult<T>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, page)?;
    writeln!(out)?;
    Ok(())
}

/// Counts per severity tag, most frequent first
pub fn write_stats(out: &mut impl Write, counts: &SeverityCounts) -> Result<()> {
    let mut tags: Vec<_> = counts.by_tag.iter().collect();
    tags.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let width = tags.iter().map(|(tag, _)| tag.len()).max().unwrap_or(0).max(5);
    for (tag, count) in tags {
        writeln!(out, "{:<width$}  {}", tag, count)?;
    }
    writeln!(out, "{:<width$}  {}", "Total", counts.total())?;
    Ok(())
}
