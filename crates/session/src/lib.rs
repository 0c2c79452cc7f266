//! Root state container for the route planner front-end.
//!
//! [`Store`] is the single owner of cross-component state and its only
//! mutator: renderers and panels send [`Intent`]s, the store answers with
//! [`Effect`]s describing outward work (searches, route requests, camera
//! moves). [`Session`] pairs a store with real clients and runs those effects.

pub mod autocomplete;
pub mod config;
pub mod intent;
pub mod model;
pub mod route_state;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod view;

pub use autocomplete::*;
pub use config::*;
pub use intent::*;
pub use model::*;
pub use route_state::*;
pub use session::*;
pub use snapshot::*;
pub use store::*;
pub use view::*;
