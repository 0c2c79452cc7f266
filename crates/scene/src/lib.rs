//! Renderer-facing adapters.
//!
//! The globe and tile-map renderers are external. This crate turns their raw
//! pointer events into location selections and describes what they should
//! draw, without depending on either renderer.

pub mod camera;
pub mod detectors;
pub mod globe;
pub mod map;

pub use camera::*;
pub use detectors::*;
pub use globe::*;
pub use map::*;
