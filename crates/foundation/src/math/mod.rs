pub mod coords;
pub mod screen;

pub use coords::*;
pub use screen::*;
