//! In-memory [`ProductStore`] over a fixed row set, used for offline
//! browsing of a JSON export and as a test double.

use pdfex_core::RawProductRecord;

use crate::error::StoreError;
use crate::store::{PageQuery, ProductStore};

/// Rows held in memory, sorted by `product_code` like the hosted table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<RawProductRecord>,
}

impl MemoryStore {
    #[must_use]
    pub fn from_rows(mut rows: Vec<RawProductRecord>) -> Self {
        rows.sort_by(|a, b| a.product_code.cmp(&b.product_code));
        Self { rows }
    }

    /// Parses a JSON array of product rows, as exported from the table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Deserialize`] if `json` is not an array of rows.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let rows = serde_json::from_str::<Vec<RawProductRecord>>(json).map_err(|e| {
            StoreError::Deserialize {
                context: "product export".to_owned(),
                source: e,
            }
        })?;
        Ok(Self::from_rows(rows))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ProductStore for MemoryStore {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<RawProductRecord>, StoreError> {
        let len = self.rows.len();
        let from = usize::try_from(query.range.from).unwrap_or(len).min(len);
        let to = usize::try_from(query.range.to)
            .map_or(len, |to| to.saturating_add(1))
            .min(len);

        let mut page = self.rows.get(from..to).unwrap_or_default().to_vec();
        if !query.ascending {
            page.reverse();
        }
        Ok(page)
    }
}
