use std::cell::RefCell;
use std::collections::VecDeque;

use crate::http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// A canned outcome for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond(HttpResponse),
    Fail(TransportError),
}

impl Reply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Reply::Respond(HttpResponse::with_status(status, body))
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Reply::Fail(TransportError::Network(message.into()))
    }
}

/// In-memory transport that replays scripted replies and records requests.
///
/// Replies are queued per URL fragment; a request takes the next reply from
/// the first queue whose fragment occurs in its URL. Unscripted requests fail
/// with a network error so a missing script shows up as a failed call rather
/// than a hang.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: RefCell<Vec<(String, VecDeque<Reply>)>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, url_fragment: &str, reply: Reply) {
        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|(f, _)| f == url_fragment) {
            Some((_, queue)) => queue.push_back(reply),
            None => routes.push((url_fragment.to_string(), VecDeque::from([reply]))),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Requests whose URL contains `url_fragment`.
    pub fn requests_to(&self, url_fragment: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.url.contains(url_fragment))
            .cloned()
            .collect()
    }

    fn next_reply(&self, url: &str) -> Option<Reply> {
        let mut routes = self.routes.borrow_mut();
        routes
            .iter_mut()
            .find(|(fragment, queue)| url.contains(fragment.as_str()) && !queue.is_empty())
            .and_then(|(_, queue)| queue.pop_front())
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        let reply = self.next_reply(&request.url);
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        Box::pin(async move {
            match reply {
                Some(Reply::Respond(resp)) => Ok(resp),
                Some(Reply::Fail(err)) => Err(err),
                None => Err(TransportError::Network(format!("no scripted reply for {url}"))),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpRequest;

    #[test]
    fn replays_in_fifo_order_per_route() {
        let t = ScriptedTransport::new();
        t.push("/search", Reply::json(200, "[1]"));
        t.push("/search", Reply::json(200, "[2]"));
        t.push("/calculate_route", Reply::json(500, "{}"));

        let a = pollster::block_on(t.send(HttpRequest::get("https://x.test/search"))).unwrap();
        let b = pollster::block_on(t.send(HttpRequest::post_json("/calculate_route", "{}"))).unwrap();
        let c = pollster::block_on(t.send(HttpRequest::get("https://x.test/search"))).unwrap();

        assert_eq!(a.body, "[1]");
        assert_eq!(b.status, 500);
        assert_eq!(c.body, "[2]");
        assert_eq!(t.request_count(), 3);
        assert_eq!(t.requests_to("/search").len(), 2);
    }

    #[test]
    fn unscripted_requests_fail_and_are_recorded() {
        let t = ScriptedTransport::new();
        let err = pollster::block_on(t.send(HttpRequest::get("/health"))).unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
        assert_eq!(t.request_count(), 1);
    }

    #[test]
    fn scripted_failures_surface_as_errors() {
        let t = ScriptedTransport::new();
        t.push("/health", Reply::network_error("offline"));
        let err = pollster::block_on(t.send(HttpRequest::get("/health"))).unwrap_err();
        assert_eq!(err, TransportError::Network("offline".into()));
    }
}
