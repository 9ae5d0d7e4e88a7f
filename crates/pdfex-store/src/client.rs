//! HTTP client for a Supabase project's `PostgREST` endpoint.
//!
//! Pages are requested with `offset`/`limit` query parameters, which is how
//! the Supabase JS client translates `.range(from, to)`:
//!
//! ```text
//! GET /rest/v1/products?select=product_code,name,...&order=product_code.asc&offset=48&limit=48
//! apikey: <anon key>
//! Authorization: Bearer <anon key>
//! ```
//!
//! On failure `PostgREST` answers with a JSON envelope:
//!
//! ```text
//! {"code":"42P01","details":null,"hint":null,"message":"relation \"public.products\" does not exist"}
//! ```

use std::time::Duration;

use pdfex_core::{AppConfig, RawProductRecord};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::StoreError;
use crate::store::{PageQuery, ProductStore};

/// Error envelope returned by `PostgREST` on non-2xx responses.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Read-only [`ProductStore`] backed by a Supabase project.
pub struct SupabaseStore {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseStore {
    /// Creates a store client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// URL, or [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let mut parsed = Url::parse(base_url).map_err(|e| StoreError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }
        parsed.set_query(None);
        parsed.set_fragment(None);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            api_key: api_key.to_owned(),
        })
    }

    /// Creates a store client from application config.
    ///
    /// # Errors
    ///
    /// See [`SupabaseStore::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        Self::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            config.store_timeout_secs,
            &config.user_agent,
        )
    }

    /// Builds the `PostgREST` URL for `query`.
    fn query_url(&self, query: &PageQuery) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(["rest", "v1", query.table.as_str()]);

        let direction = if query.ascending { "asc" } else { "desc" };
        url.query_pairs_mut()
            .append_pair("select", &query.columns.join(","))
            .append_pair("order", &format!("{}.{direction}", query.order_column))
            .append_pair("offset", &query.range.from.to_string())
            .append_pair("limit", &query.range.row_count().to_string());

        Ok(url)
    }
}

impl ProductStore for SupabaseStore {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<RawProductRecord>, StoreError> {
        let url = self.query_url(query)?;
        tracing::debug!(
            table = %query.table,
            from = query.range.from,
            to = query.range.to,
            "querying product page"
        );

        let response = self
            .client
            .get(url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(query_failure(status.as_u16(), url.as_str(), &body));
        }

        serde_json::from_str::<Vec<RawProductRecord>>(&body).map_err(|e| {
            StoreError::Deserialize {
                context: format!(
                    "{} rows {}..={}",
                    query.table, query.range.from, query.range.to
                ),
                source: e,
            }
        })
    }
}

/// Maps a non-2xx response to a [`StoreError`], preferring `PostgREST`'s own
/// message when the body carries one.
fn query_failure(status: u16, url: &str, body: &str) -> StoreError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError {
            code,
            message: Some(message),
            details,
            hint,
        }) if !message.is_empty() => {
            tracing::debug!(status, ?code, ?details, ?hint, "store rejected query");
            StoreError::Query {
                status,
                code,
                message,
            }
        }
        _ => StoreError::UnexpectedStatus {
            status,
            url: url.to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use pdfex_core::PRODUCT_COLUMNS;

    use super::*;
    use crate::range::RecordRange;

    fn store(base_url: &str) -> SupabaseStore {
        SupabaseStore::new(base_url, "anon", 5, "pdfex-test").unwrap()
    }

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn query_url_targets_rest_endpoint() {
        let url = store("https://demo.supabase.co")
            .query_url(&PageQuery::products("products", RecordRange::for_page(1, 48)))
            .unwrap();
        assert_eq!(url.path(), "/rest/v1/products");
        assert_eq!(
            query_pairs(&url),
            vec![
                ("select".to_owned(), PRODUCT_COLUMNS.join(",")),
                ("order".to_owned(), "product_code.asc".to_owned()),
                ("offset".to_owned(), "48".to_owned()),
                ("limit".to_owned(), "48".to_owned()),
            ]
        );
    }

    #[test]
    fn query_url_keeps_base_path_prefix() {
        let url = store("http://localhost:54321/project/")
            .query_url(&PageQuery::products("products", RecordRange::for_page(0, 48)))
            .unwrap();
        assert_eq!(url.path(), "/project/rest/v1/products");
    }

    #[test]
    fn query_url_encodes_table_name() {
        let url = store("https://demo.supabase.co")
            .query_url(&PageQuery::products("odd table", RecordRange::for_page(0, 48)))
            .unwrap();
        assert_eq!(url.path(), "/rest/v1/odd%20table");
    }

    #[test]
    fn new_rejects_relative_url() {
        let result = SupabaseStore::new("not a url", "anon", 5, "pdfex-test");
        assert!(matches!(result, Err(StoreError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn query_failure_uses_postgrest_message() {
        let err = query_failure(
            404,
            "https://demo.supabase.co/rest/v1/products",
            r#"{"code":"42P01","details":null,"hint":null,"message":"relation \"public.products\" does not exist"}"#,
        );
        assert_eq!(
            err.to_string(),
            "relation \"public.products\" does not exist"
        );
        assert!(matches!(
            err,
            StoreError::Query { status: 404, code: Some(ref c), .. } if c == "42P01"
        ));
    }

    #[test]
    fn query_failure_without_envelope_reports_status() {
        let err = query_failure(502, "https://demo.supabase.co/rest/v1/products", "Bad Gateway");
        assert!(matches!(err, StoreError::UnexpectedStatus { status: 502, .. }));
    }
}
