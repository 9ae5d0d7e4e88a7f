//! The paginated query capability the catalogue depends on.

use std::future::Future;

use pdfex_core::{RawProductRecord, PRODUCT_COLUMNS};

use crate::error::StoreError;
use crate::range::RecordRange;

/// One page request: table, column selection, sort key, and offset range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub table: String,
    pub columns: &'static [&'static str],
    pub order_column: &'static str,
    pub ascending: bool,
    pub range: RecordRange,
}

impl PageQuery {
    /// The catalogue's query: every product column, ascending by
    /// `product_code`, limited to `range`.
    #[must_use]
    pub fn products(table: impl Into<String>, range: RecordRange) -> Self {
        Self {
            table: table.into(),
            columns: PRODUCT_COLUMNS,
            order_column: "product_code",
            ascending: true,
            range,
        }
    }
}

/// Read-only, range-paginated access to product rows.
///
/// Implementations return the rows of `query.range` in `query` order, or an
/// empty vector once the range is past the end of the table.
pub trait ProductStore: Send + Sync {
    fn fetch_page(
        &self,
        query: &PageQuery,
    ) -> impl Future<Output = Result<Vec<RawProductRecord>, StoreError>> + Send;
}
