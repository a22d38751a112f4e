use errscope_types::PageResult;

use crate::LogError;

/// Splits a match list into fixed-size pages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    pub const DEFAULT_PER_PAGE: usize = 50;

    /// Create a paginator; a page size of zero is rejected
    pub fn new(per_page: usize) -> Result<Self, LogError> {
        if per_page == 0 {
            return Err(LogError::InvalidPageSize);
        }
        Ok(Self { per_page })
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages needed for `total` items
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    /// Take page `page` (1-based) out of `items`
    ///
    /// Pages outside `1..=total_pages` come back empty with the totals intact.
    pub fn paginate<T>(&self, items: Vec<T>, page: i64) -> PageResult<T> {
        let total_matched = items.len();
        let total_pages = self.page_count(total_matched);

        let in_range = page >= 1 && (page as u64) <= total_pages as u64;
        let items = if in_range {
            let start = (page as usize - 1) * self.per_page;
            items.into_iter().skip(start).take(self.per_page).collect()
        } else {
            Vec::new()
        };

        PageResult {
            items,
            total_matched,
            total_pages,
            current_page: page,
            per_page: self.per_page,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}
