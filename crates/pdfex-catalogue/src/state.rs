//! Session state and its transitions.
//!
//! All mutation goes through three steps so a network await never happens
//! while the state is borrowed: [`CatalogueState::begin_load`] hands out a
//! [`LoadTicket`], the caller queries the store, and
//! [`CatalogueState::finish_load`] applies the outcome.

use std::borrow::Cow;

use pdfex_core::{normalize, NormalizedProduct, RawProductRecord};
use pdfex_store::{RecordRange, StoreError};

use crate::error::CatalogueError;
use crate::filter::visible_indices;

/// Rows per page.
pub const PAGE_LIMIT: u64 = 48;

/// Proof that a load was started; consumed by [`CatalogueState::finish_load`].
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub page_index: u64,
    pub replace: bool,
    pub range: RecordRange,
}

/// What a finished load did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were normalized and appended or swapped in.
    Loaded { count: usize, has_more: bool },
    /// The page was empty; no more pages will be offered.
    Exhausted,
    /// The store failed; items are untouched and the message is recorded.
    Failed { message: String },
}

#[derive(Debug)]
pub struct CatalogueState {
    items: Vec<NormalizedProduct>,
    current_page_index: u64,
    has_more: bool,
    loading: bool,
    started: bool,
    error_message: Option<String>,
    search_term: String,
    visible: Vec<usize>,
    #[cfg(test)]
    derivations: u64,
}

impl Default for CatalogueState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogueState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current_page_index: 0,
            has_more: true,
            loading: false,
            started: false,
            error_message: None,
            search_term: String::new(),
            visible: Vec::new(),
            #[cfg(test)]
            derivations: 0,
        }
    }

    /// Marks a load of `page_index` as in flight.
    ///
    /// The previous error message is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::LoadInFlight`] if another load has not
    /// finished yet; the state is unchanged in that case.
    pub fn begin_load(
        &mut self,
        page_index: u64,
        replace: bool,
    ) -> Result<LoadTicket, CatalogueError> {
        if self.loading {
            return Err(CatalogueError::LoadInFlight);
        }
        self.loading = true;
        self.started = true;
        Ok(LoadTicket {
            page_index,
            replace,
            range: RecordRange::for_page(page_index, PAGE_LIMIT),
        })
    }

    /// Applies the store's answer for `ticket` and clears the loading flag.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<RawProductRecord>, StoreError>,
    ) -> LoadOutcome {
        self.loading = false;

        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                let message = e.to_string();
                self.error_message = Some(message.clone());
                return LoadOutcome::Failed { message };
            }
        };

        if rows.is_empty() {
            self.has_more = false;
            if ticket.replace && !self.items.is_empty() {
                self.items.clear();
                self.refresh_visible();
            }
            return LoadOutcome::Exhausted;
        }

        let count = rows.len();
        let normalized = rows.into_iter().map(normalize);
        if ticket.replace {
            self.items = normalized.collect();
        } else {
            self.items.extend(normalized);
        }
        self.refresh_visible();

        self.current_page_index = ticket.page_index;
        // A full page may still be the last one; only a short or empty page
        // proves the end.
        self.has_more = u64::try_from(count).is_ok_and(|n| n == PAGE_LIMIT);

        LoadOutcome::Loaded {
            count,
            has_more: self.has_more,
        }
    }

    /// Clears the loading flag for a load whose future was dropped before
    /// the store answered. Items and error message are untouched.
    pub fn abandon_load(&mut self) {
        self.loading = false;
    }

    /// Sets the search term, re-deriving the visible set only if it changed.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.refresh_visible();
        }
    }

    fn refresh_visible(&mut self) {
        self.visible = visible_indices(&self.items, &self.search_term);
        #[cfg(test)]
        {
            self.derivations += 1;
        }
    }

    /// All loaded products in retrieval order.
    #[must_use]
    pub fn items(&self) -> &[NormalizedProduct] {
        &self.items
    }

    /// Loaded products matching the current search term, in retrieval order.
    pub fn visible_items(&self) -> impl Iterator<Item = &NormalizedProduct> + '_ {
        self.visible.iter().filter_map(|&idx| self.items.get(idx))
    }

    /// Indices of the products matching `term`. The session's own term
    /// reuses the memoized set; any other term is matched on the spot
    /// without touching the session.
    #[must_use]
    pub fn visible_for(&self, term: &str) -> Cow<'_, [usize]> {
        if term == self.search_term {
            Cow::Borrowed(&self.visible)
        } else {
            Cow::Owned(visible_indices(&self.items, term))
        }
    }

    /// "Load more" as it would be offered with `term` as the search.
    #[must_use]
    pub fn can_load_more_for(&self, term: &str) -> bool {
        self.has_more && !self.loading && self.visible_for(term).len() == self.items.len()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn current_page_index(&self) -> u64 {
        self.current_page_index
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// `true` once any load has been started in this session.
    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// "Load more" is offered only while more pages may exist, nothing is in
    /// flight, and no search is narrowing the list.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.can_load_more_for(&self.search_term)
    }

    /// Show the "no matches" indicator instead of an empty grid.
    #[must_use]
    pub fn show_empty_state(&self) -> bool {
        self.visible.is_empty() && !self.loading
    }

    #[cfg(test)]
    pub(crate) fn derivations(&self) -> u64 {
        self.derivations
    }
}
