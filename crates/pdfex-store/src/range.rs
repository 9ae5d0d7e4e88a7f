//! Zero-based page index to inclusive record-offset range.

/// Inclusive offset interval `[from, to]` selecting one page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRange {
    pub from: u64,
    pub to: u64,
}

impl RecordRange {
    /// Range covering page `page_index` when pages hold `page_size` rows.
    ///
    /// `page_size` must be at least 1.
    #[must_use]
    pub fn for_page(page_index: u64, page_size: u64) -> Self {
        let page_size = page_size.max(1);
        let from = page_index.saturating_mul(page_size);
        Self {
            from,
            to: from.saturating_add(page_size - 1),
        }
    }

    /// Number of rows the range spans.
    #[must_use]
    pub fn row_count(&self) -> u64 {
        self.to - self.from + 1
    }
}
