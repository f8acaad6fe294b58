//! Terrain sampling, obstacle collision and picking for Island Defense.

pub mod collision;
pub mod footprint;
pub mod picking;
pub mod terrain;

pub use collision::*;
pub use footprint::*;
pub use picking::*;
pub use terrain::*;
