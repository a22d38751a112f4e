use std::collections::BTreeMap;

use errscope_types::{LogRecord, SeverityClass};

/// Counts per severity tag and per class
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    /// Exact tags as they appear in the log
    pub by_tag: BTreeMap<String, usize>,

    pub by_class: BTreeMap<SeverityClass, usize>,
}

impl SeverityCounts {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut counts = Self::default();
        for record in records {
            *counts.by_tag.entry(record.severity.clone()).or_default() += 1;
            *counts.by_class.entry(record.class()).or_default() += 1;
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.by_tag.values().sum()
    }

    /// Count for a tag, ignoring ASCII case
    pub fn tag(&self, tag: &str) -> usize {
        self.by_tag
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(tag))
            .map(|(_, v)| v)
            .sum()
    }

    pub fn class(&self, class: SeverityClass) -> usize {
        self.by_class.get(&class).copied().unwrap_or(0)
    }
}
