//! Remote catalog access.
//!
//! The fetcher only talks to [`CatalogSource`]; `HttpCatalog` is the
//! production implementation and tests substitute in-process sources.

use std::time::Duration;

use tracing::debug;

use crate::catalog::resolve::CatalogId;
use crate::error::FetchError;
use crate::rating::record::RawProduct;

/// Blocking lookup of one catalog entry.
///
/// Implementations are called from tokio's blocking pool.
pub trait CatalogSource: Send + Sync {
    fn fetch_product(&self, id: CatalogId) -> Result<RawProduct, FetchError>;
}

/// Catalog served over HTTP at `{base_url}/products/{id}`.
pub struct HttpCatalog {
    base_url: String,
    timeout: Duration,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are classified below
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            agent: make_agent(timeout),
        }
    }

    pub fn product_url(&self, id: CatalogId) -> String {
        format!("{}/products/{}", self.base_url.trim_end_matches('/'), id)
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch_product(&self, id: CatalogId) -> Result<RawProduct, FetchError> {
        let url = self.product_url(id);
        debug!(%url, "fetching catalog entry");

        let response = self.agent.get(url.as_str()).call().map_err(|e| match e {
            ureq::Error::Timeout(_) => FetchError::Timeout(self.timeout),
            other => FetchError::Transport(other.to_string()),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .into_body()
            .read_json::<RawProduct>()
            .map_err(|e| FetchError::Parse(e.to_string()))
    }
}
