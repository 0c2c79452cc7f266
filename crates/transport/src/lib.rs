//! HTTP seam between the client core and whatever can issue requests.
//!
//! The core never talks to a concrete HTTP stack. Geocoding and routing
//! clients are generic over [`HttpTransport`]; the browser shell plugs in a
//! fetch-backed implementation, native hosts use [`ReqwestTransport`], and
//! tests use [`ScriptedTransport`].

pub mod http;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(any(test, feature = "testing"))]
pub mod scripted;

pub use http::*;
#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;
#[cfg(any(test, feature = "testing"))]
pub use scripted::{Reply, ScriptedTransport};
