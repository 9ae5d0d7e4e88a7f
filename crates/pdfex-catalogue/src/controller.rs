//! The catalogue session controller: owns the store and the session state
//! and exposes the commands the UI layers call.

use std::sync::{Mutex, MutexGuard, PoisonError};

use pdfex_store::{PageQuery, ProductStore};

use crate::error::CatalogueError;
use crate::state::{CatalogueState, LoadOutcome};
use crate::view::CataloguePage;

fn lock(state: &Mutex<CatalogueState>) -> MutexGuard<'_, CatalogueState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the loading flag if a load future is dropped mid-flight.
struct InFlight<'a> {
    state: &'a Mutex<CatalogueState>,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("page load abandoned before the store answered");
            lock(self.state).abandon_load();
        }
    }
}

/// One catalogue session over a [`ProductStore`].
///
/// State is behind a short-lived lock that is never held across the store
/// call, so readers (page rendering, search input) are never blocked by a
/// slow page load. At most one load is in flight; a second one is refused
/// with [`CatalogueError::LoadInFlight`].
pub struct CatalogueController<S> {
    store: S,
    table: String,
    state: Mutex<CatalogueState>,
}

impl<S: ProductStore> CatalogueController<S> {
    pub fn new(store: S, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
            state: Mutex::new(CatalogueState::new()),
        }
    }

    /// Fetches page `page_index` and appends it, or replaces the loaded
    /// items when `replace` is set.
    ///
    /// Store failures do not surface here; they come back as
    /// [`LoadOutcome::Failed`] and are recorded in the session.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::LoadInFlight`] if another load is running.
    pub async fn load_page(
        &self,
        page_index: u64,
        replace: bool,
    ) -> Result<LoadOutcome, CatalogueError> {
        let ticket = lock(&self.state).begin_load(page_index, replace)?;
        let mut in_flight = InFlight {
            state: &self.state,
            armed: true,
        };

        let query = PageQuery::products(self.table.as_str(), ticket.range);
        let result = self.store.fetch_page(&query).await;
        if let Err(e) = &result {
            tracing::warn!(page_index, error = %e, "product page query failed");
        }

        in_flight.armed = false;
        let outcome = lock(&self.state).finish_load(ticket, result);
        if let LoadOutcome::Loaded { count, has_more } = &outcome {
            tracing::info!(page_index, count, has_more, replace, "loaded product page");
        }
        Ok(outcome)
    }

    /// Discards loaded items and fetches the first page again. Also the
    /// session's initial load.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::LoadInFlight`] if another load is running.
    pub async fn reload(&self) -> Result<LoadOutcome, CatalogueError> {
        self.load_page(0, true).await
    }

    /// Runs the initial load if this session has not loaded anything yet.
    /// Returns `None` when a load was already started earlier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::LoadInFlight`] if another load is running.
    pub async fn ensure_started(&self) -> Result<Option<LoadOutcome>, CatalogueError> {
        if lock(&self.state).started() {
            return Ok(None);
        }
        self.reload().await.map(Some)
    }

    /// Appends the page after the last one loaded.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::LoadMoreUnavailable`] unless "load more" is
    /// currently offered (see [`CatalogueState::can_load_more`]), or
    /// [`CatalogueError::LoadInFlight`] if another load is running.
    pub async fn load_next_page(&self) -> Result<LoadOutcome, CatalogueError> {
        let next = {
            let state = lock(&self.state);
            if state.loading() {
                return Err(CatalogueError::LoadInFlight);
            }
            if !state.can_load_more() {
                return Err(CatalogueError::LoadMoreUnavailable);
            }
            state.current_page_index() + 1
        };
        self.load_page(next, false).await
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        lock(&self.state).set_search_term(term);
    }

    /// Display snapshot of the current session.
    pub fn page(&self) -> CataloguePage {
        CataloguePage::from(&*lock(&self.state))
    }

    /// Display snapshot filtered by `search_term` instead of the session's
    /// own term. The session is left untouched, so concurrent callers with
    /// different searches never see each other's results.
    pub fn page_for_search(&self, search_term: &str) -> CataloguePage {
        CataloguePage::for_search(&lock(&self.state), search_term)
    }

    /// Runs `f` against the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&CatalogueState) -> R) -> R {
        f(&lock(&self.state))
    }
}
