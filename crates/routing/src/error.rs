use serde::Deserialize;
use transport::TransportError;

pub const MISSING_ENDPOINTS_MESSAGE: &str = "Please select both start and end locations";
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the route service. Please try again.";
pub const INVALID_ROUTE_MESSAGE: &str = "Received an invalid route from the server";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Start or destination is not set; nothing was sent.
    #[error("start and end locations are required")]
    MissingEndpoints,
    #[error("invalid departure time {0:?}")]
    InvalidDepartureTime(String),
    #[error("route service unreachable: {0}")]
    Transport(#[from] TransportError),
    #[error("route service returned {status} {status_text}")]
    Server {
        status: u16,
        status_text: String,
        detail: Option<String>,
    },
    #[error("undecodable route response: {0}")]
    Decode(String),
    #[error("failed to encode route request: {0}")]
    Encode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl RouteError {
    /// Builds a `Server` error from a non-2xx response.
    ///
    /// Only a non-empty string `detail` is kept; structured details (such as
    /// per-field validation lists) and unparseable bodies fall back to the
    /// status line.
    pub fn from_status(status: u16, status_text: &str, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            });
        RouteError::Server {
            status,
            status_text: status_text.to_string(),
            detail,
        }
    }

    /// Text for the panel's error line.
    pub fn user_message(&self) -> String {
        match self {
            RouteError::MissingEndpoints => MISSING_ENDPOINTS_MESSAGE.to_string(),
            RouteError::InvalidDepartureTime(raw) => format!("Invalid departure time: {raw}"),
            RouteError::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
            RouteError::Server {
                status,
                status_text,
                detail,
            } => match detail {
                Some(detail) => detail.clone(),
                None => format!("Server error: {status} {status_text}")
                    .trim_end()
                    .to_string(),
            },
            RouteError::Decode(_) | RouteError::Encode(_) => INVALID_ROUTE_MESSAGE.to_string(),
        }
    }
}
