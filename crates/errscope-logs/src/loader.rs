use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::{LineParser, LogError};
use errscope_types::{LogRecord, RawLogLine};

/// Reads error log files into memory
///
/// The file is read line by line through a buffered reader and the handle is
/// dropped before returning on every path.
pub struct LogLoader;

impl LogLoader {
    /// Load and parse a log file, dropping lines that do not match the pattern
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<LogRecord>, LogError> {
        let path = path.as_ref();
        let mut records = Vec::new();
        let mut skipped = 0usize;

        let total = Self::for_each_line(path, |line_number, line| {
            match LineParser::parse(line, line_number) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        })?;

        info!(
            path = %path.display(),
            lines = total,
            records = records.len(),
            skipped,
            "loaded error log"
        );
        Ok(records)
    }

    /// Load every line of a log file unparsed
    pub fn load_raw(path: impl AsRef<Path>) -> Result<Vec<RawLogLine>, LogError> {
        let path = path.as_ref();
        let mut lines = Vec::new();

        Self::for_each_line(path, |line_number, line| {
            lines.push(RawLogLine::new(line_number, line.to_string()));
        })?;

        info!(path = %path.display(), lines = lines.len(), "loaded raw log");
        Ok(lines)
    }

    /// Feed each line (1-based number, text without line terminator) to `f`
    ///
    /// Returns the number of lines read.
    fn for_each_line<F>(path: &Path, f: F) -> Result<u64, LogError>
    where
        F: FnMut(u64, &str),
    {
        let file = File::open(path).map_err(|e| LogError::open(path, e))?;
        debug!(path = %path.display(), "opened log file");
        read_lines(BufReader::new(file), f).map_err(|e| LogError::read(path, e))
    }
}

/// Invalid UTF-8 is replaced rather than failing the whole load
fn read_lines<R, F>(mut reader: R, mut f: F) -> std::io::Result<u64>
where
    R: BufRead,
    F: FnMut(u64, &str),
{
    let mut buf = Vec::new();
    let mut line_number = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;
        let text = String::from_utf8_lossy(&buf);
        f(line_number, text.trim_end_matches(['\n', '\r']));
    }

    Ok(line_number)
}
