//! Address search against a Nominatim-compatible geocoder.
//!
//! Queries are biased toward one locality: first with a locality hint
//! appended, then (only when that finds nothing) verbatim. Results naming the
//! locality are ranked first. Failures never reach the caller; they degrade to
//! an empty suggestion list.

pub mod client;
pub mod config;
pub mod ranking;
pub mod result;

pub use client::*;
pub use config::*;
pub use ranking::*;
pub use result::*;
