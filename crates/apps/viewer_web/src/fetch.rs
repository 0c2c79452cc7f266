use gloo_net::http::Request;
use transport::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// `fetch`-backed transport. Relative URLs resolve against the page origin.
#[derive(Debug, Default, Copy, Clone)]
pub struct GlooTransport;

impl HttpTransport for GlooTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(send(request))
    }
}

async fn send(req: HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut builder = match req.method {
        Method::Get => Request::get(&req.url),
        Method::Post => Request::post(&req.url),
    };
    if !req.query.is_empty() {
        builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    for (name, value) in &req.headers {
        // Browsers own the user agent.
        if name.eq_ignore_ascii_case("user-agent") {
            continue;
        }
        builder = builder.header(name, value);
    }

    let request = match req.json_body {
        Some(body) => builder.header("Content-Type", "application/json").body(body),
        None => builder.build(),
    }
    .map_err(|e| TransportError::Network(e.to_string()))?;

    let resp = request
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;
    let status = resp.status();
    let status_text = resp.status_text();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError::Body(e.to_string()))?;
    Ok(HttpResponse::new(status, status_text, body))
}
