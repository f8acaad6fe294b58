//! Procedural generation for the island and the static shapes placed on it.

pub mod island;
pub mod shapes;

pub use island::*;
pub use shapes::*;
