//! Client side of the remote route-calculation service.
//!
//! The service owns routing and traffic prediction; this crate only shapes
//! the request, interprets the response and turns failures into text a user
//! can act on.

pub mod client;
pub mod config;
pub mod departure;
pub mod error;
pub mod wire;

pub use client::*;
pub use config::*;
pub use departure::*;
pub use error::*;
pub use wire::*;
