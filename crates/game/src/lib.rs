//! Island Defense: walk the island, jump on the aliens circling it, keep them
//! away from the house.
//!
//! [`GameState`] owns a running game. Each frame the display loop hands it a
//! [`engine_core::FrameInput`] and the current [`input::InputState`], then asks
//! it to draw into any [`engine_core::SceneSink`].

pub mod config;
pub mod cutscene;
pub mod encounter;
pub mod glide;
pub mod jump;
pub mod player;
pub mod render;
pub mod state;
mod update;

pub use config::{GameConfig, OrbitMode};
pub use encounter::EncounterEvent;
pub use render::SceneMesh;
pub use state::GameState;
