use foundation::Role;
use tracing::{debug, error, warn};
use transport::{HttpRequest, HttpTransport, TransportError};

use crate::config::GeocodeConfig;
use crate::ranking::{hinted_query, rank_by_locality};
use crate::result::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("undecodable geocoder response: {0}")]
    Decode(String),
    #[error("invalid {field} coordinate {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// Geocoding client with locality-hinted fallback search.
///
/// No caching and no de-duplication: every call goes to the network.
#[derive(Debug)]
pub struct GeocodeClient<T> {
    transport: T,
    config: GeocodeConfig,
}

impl<T: HttpTransport> GeocodeClient<T> {
    pub fn new(transport: T, config: GeocodeConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &GeocodeConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Up to `max_suggestions` candidates for `query`, locality matches first.
    ///
    /// Queries shorter than `min_query_chars` return immediately without a
    /// request. Transport and decode failures are logged and yield an empty
    /// list.
    pub async fn search(&self, query: &str, role: Role) -> Vec<SearchResult> {
        if query.chars().count() < self.config.min_query_chars {
            return Vec::new();
        }
        match self.try_search(query).await {
            Ok(results) => {
                debug!(?role, query, count = results.len(), "geocode search finished");
                results
            }
            Err(err) => {
                error!(?role, query, %err, "geocode search failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, GeocodeError> {
        let hinted = hinted_query(query, &self.config.locality_hint);
        let mut results = self.fetch(&hinted).await?;

        // An unhinted retry would repeat the identical request.
        if results.is_empty() && hinted != query {
            debug!(query, "hinted search empty, retrying without locality hint");
            results = self.fetch(query).await?;
        }

        Ok(rank_by_locality(
            results,
            &self.config.locality_aliases,
            self.config.max_suggestions,
        ))
    }

    /// One strategy round-trip. A non-2xx status counts as "no results".
    async fn fetch(&self, q: &str) -> Result<Vec<SearchResult>, GeocodeError> {
        let resp = self.transport.send(self.request_for(q)).await?;
        if !resp.is_success() {
            warn!(status = resp.status, q, "geocoder returned non-success status");
            return Ok(Vec::new());
        }
        serde_json::from_str(&resp.body).map_err(|e| GeocodeError::Decode(e.to_string()))
    }

    pub fn request_for(&self, q: &str) -> HttpRequest {
        let mut req = HttpRequest::get(self.config.endpoint.as_str())
            .with_query("format", "json")
            .with_query("q", q)
            .with_query("countrycodes", self.config.country_codes.as_str())
            .with_query("limit", self.config.fetch_limit.to_string())
            .with_query("addressdetails", "1");
        if let Some(agent) = &self.config.user_agent {
            req = req.with_header("User-Agent", agent.as_str());
        }
        req
    }
}
