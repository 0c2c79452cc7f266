use tracing::debug;

use crate::http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// `reqwest`-backed transport for native hosts.
///
/// Relative URLs such as `/calculate_route` are resolved against `base_url`,
/// mirroring how the browser resolves them against the page origin.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: None,
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        self.base_url = Some(base.trim_end_matches('/').to_string());
        self
    }

    fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{base}{url}"),
            _ => url.to_string(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let url = self.resolve(&request.url);
            debug!(method = request.method.as_str(), %url, "http request");

            let mut builder = match request.method {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
            };
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.json_body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body);
            }

            let resp = builder
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = resp.status();
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let body = resp
                .text()
                .await
                .map_err(|e| TransportError::Body(e.to_string()))?;

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text,
                body,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ReqwestTransport;

    #[test]
    fn relative_urls_resolve_against_base() {
        let t = ReqwestTransport::new().with_base_url("http://127.0.0.1:8000/");
        assert_eq!(
            t.resolve("/calculate_route"),
            "http://127.0.0.1:8000/calculate_route"
        );
        assert_eq!(
            t.resolve("https://nominatim.openstreetmap.org/search"),
            "https://nominatim.openstreetmap.org/search"
        );
    }

    #[test]
    fn without_base_urls_pass_through() {
        let t = ReqwestTransport::new();
        assert_eq!(t.resolve("/health"), "/health");
    }
}
