//! HTML pages. Commands are plain form posts answered with a redirect back
//! to the catalogue, so the page works without scripting. The search term
//! travels with each request and is never stored in the shared session.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use pdfex_catalogue::render::render_page;
use pdfex_store::ProductStore;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::api::{ensure_session_started, AppState};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    pub q: Option<String>,
}

/// `/`, keeping the active search when there is one.
fn home_location(search: Option<&str>) -> String {
    match search {
        Some(q) if !q.is_empty() => format!("/?q={}", utf8_percent_encode(q, NON_ALPHANUMERIC)),
        _ => "/".to_owned(),
    }
}

pub(crate) async fn index<S: ProductStore + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> Response {
    ensure_session_started(&state.catalogue).await;

    let page = state
        .catalogue
        .page_for_search(params.q.as_deref().unwrap_or_default());
    match render_page(&page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "catalogue template failed to render");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render catalogue").into_response()
        }
    }
}

pub(crate) async fn load_more<S: ProductStore + 'static>(
    State(state): State<AppState<S>>,
    Form(params): Form<SearchParams>,
) -> Redirect {
    let search = params.q.as_deref().unwrap_or_default();
    // The button is only rendered when the visitor's own search hides nothing.
    if state.catalogue.with_state(|s| s.can_load_more_for(search)) {
        if let Err(e) = state.catalogue.load_next_page().await {
            tracing::debug!(error = %e, "load more ignored");
        }
    } else {
        tracing::debug!(search, "load more not offered for this search");
    }
    Redirect::to(&home_location(params.q.as_deref()))
}

pub(crate) async fn reload<S: ProductStore + 'static>(
    State(state): State<AppState<S>>,
    Form(params): Form<SearchParams>,
) -> Redirect {
    if let Err(e) = state.catalogue.reload().await {
        tracing::debug!(error = %e, "reload ignored");
    }
    Redirect::to(&home_location(params.q.as_deref()))
}
