use std::future::Future;
use std::pin::Pin;

/// Boxed future for dyn-compatible transports.
///
/// Not `Send`: browser fetch futures are bound to the UI thread.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request in transport-neutral form.
///
/// Query pairs are kept unencoded; each transport applies its own encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// JSON body; sent with `Content-Type: application/json`.
    pub json_body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            json_body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            json_body: Some(body.into()),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Response with the standard reason phrase for `status`.
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, reason_phrase(status), body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Reason phrase for the statuses the route and geocoding services use.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, TLS, CORS, offline...).
    #[error("network error: {0}")]
    Network(String),
    /// A response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Anything that can turn an [`HttpRequest`] into an [`HttpResponse`].
///
/// Non-2xx statuses are responses, not errors; callers decide what they mean.
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::rc::Rc<T> {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_query_pairs_in_order() {
        let req = HttpRequest::get("https://example.test/search")
            .with_query("q", "Taipei 101")
            .with_query("format", "json");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.query_value("q"), Some("Taipei 101"));
        assert_eq!(req.query[1].0, "format");
        assert_eq!(req.query_value("limit"), None);
    }

    #[test]
    fn success_is_2xx_only() {
        assert!(HttpResponse::with_status(200, "").is_success());
        assert!(HttpResponse::with_status(204, "").is_success());
        assert!(!HttpResponse::with_status(304, "").is_success());
        assert!(!HttpResponse::with_status(500, "").is_success());
    }

    #[test]
    fn with_status_fills_reason_phrase() {
        let resp = HttpResponse::with_status(503, "{}");
        assert_eq!(resp.status_text, "Service Unavailable");
        assert_eq!(HttpResponse::with_status(599, "").status_text, "");
    }
}
