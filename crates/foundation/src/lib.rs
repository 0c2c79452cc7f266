pub mod location;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested value types only.
pub use location::*;
pub use time::*;
