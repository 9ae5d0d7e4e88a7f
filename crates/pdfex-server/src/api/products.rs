use axum::{
    extract::{Query, State},
    Extension, Json,
};
use pdfex_core::NormalizedProduct;
use pdfex_store::ProductStore;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{
    ensure_session_started, map_catalogue_error, ApiError, ApiResponse, AppState, ResponseMeta,
};

#[derive(Debug, Serialize)]
pub(super) struct ProductList {
    items: Vec<NormalizedProduct>,
    search_term: String,
    loaded_count: usize,
    current_page_index: u64,
    has_more: bool,
    can_load_more: bool,
    loading: bool,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub q: Option<String>,
}

/// Builds the listing in one lock so the items, flags, and filter agree.
fn snapshot<S: ProductStore>(state: &AppState<S>, search_term: &str) -> ProductList {
    state.catalogue.with_state(|s| ProductList {
        items: s
            .visible_for(search_term)
            .iter()
            .filter_map(|&idx| s.items().get(idx))
            .cloned()
            .collect(),
        search_term: search_term.to_owned(),
        loaded_count: s.items().len(),
        current_page_index: s.current_page_index(),
        has_more: s.has_more(),
        can_load_more: s.can_load_more_for(search_term),
        loading: s.loading(),
        error_message: s.error_message().map(str::to_owned),
    })
}

pub(super) async fn list_products<S: ProductStore + 'static>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Json<ApiResponse<ProductList>> {
    ensure_session_started(&state.catalogue).await;

    Json(ApiResponse {
        data: snapshot(&state, query.q.as_deref().unwrap_or_default()),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn load_next<S: ProductStore + 'static>(
    State(state): State<AppState<S>>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ProductList>>, ApiError> {
    let outcome = state
        .catalogue
        .load_next_page()
        .await
        .map_err(|e| map_catalogue_error(req_id.0.clone(), &e))?;
    tracing::debug!(?outcome, "next page requested over API");

    Ok(Json(ApiResponse {
        data: snapshot(&state, ""),
        meta: ResponseMeta::new(req_id.0),
    }))
}
