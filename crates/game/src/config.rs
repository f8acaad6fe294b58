//! Game configuration (movement, jump, encounter tuning, level layout).
//! Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};

/// How aliens advance around the island each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitMode {
    /// A fresh random angle in `[0, orbit_jitter)` every tick.
    #[default]
    Jitter,
    /// A steady `orbit_speed` radians per second.
    Continuous,
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fraction of the glide vector covered per tick; the glide lasts `1 / glide_speed` ticks.
    #[serde(default = "default_glide_speed")]
    pub glide_speed: f32,
    /// Apex height of a jump.
    #[serde(default = "default_jump_distance")]
    pub jump_distance: f32,
    /// Planar distance inside which an airborne player captures an alien.
    #[serde(default = "default_capture_radius")]
    pub capture_radius: f32,
    /// Radius of the ring aliens spawn on.
    #[serde(default = "default_alien_ring_radius")]
    pub alien_ring_radius: f32,
    /// Flight height of aliens.
    #[serde(default = "default_alien_height")]
    pub alien_height: f32,
    /// Positions farther than this from the island center are out of play.
    #[serde(default = "default_play_radius")]
    pub play_radius: f32,
    /// Danger margin around the volcano footprint for aliens.
    #[serde(default = "default_volcano_leeway")]
    pub volcano_leeway: f32,
    #[serde(default)]
    pub orbit_mode: OrbitMode,
    /// Upper bound of the per-tick random orbit angle (radians).
    #[serde(default = "default_orbit_jitter")]
    pub orbit_jitter: f32,
    /// Orbit rate for `OrbitMode::Continuous` (radians per second).
    #[serde(default = "default_orbit_speed")]
    pub orbit_speed: f32,
    /// Inward drift per second per wave level.
    #[serde(default = "default_approach_speed")]
    pub approach_speed: f32,
    /// How many walkable surfaces a ground lookup scans.
    #[serde(default = "default_surface_scan_cap")]
    pub surface_scan_cap: usize,
    /// Uniform scale applied to the island mesh.
    #[serde(default = "default_terrain_scale")]
    pub terrain_scale: f32,
    /// Manual walking speed (units per second).
    #[serde(default = "default_meters_per_frame")]
    pub meters_per_frame: f32,
    /// Mouse steering rate (radians per pixel-second outside the dead zone).
    #[serde(default = "default_radians_per_frame")]
    pub radians_per_frame: f32,
    /// Half-width in pixels of the unsteered region around the screen center.
    #[serde(default = "default_mouse_dead_zone")]
    pub mouse_dead_zone: f32,
    /// Camera eye relative to the player (player frame).
    #[serde(default = "default_camera_offset")]
    pub camera_offset: [f32; 3],
    #[serde(default = "default_house_position")]
    pub house_position: [f32; 3],
    #[serde(default = "default_volcano_position")]
    pub volcano_position: [f32; 3],
    #[serde(default = "default_volcano_scale")]
    pub volcano_scale: [f32; 3],
    /// Fixed seed for alien spawns; random when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Seed for the island heightfield.
    #[serde(default = "default_island_seed")]
    pub island_seed: u64,
}

fn default_glide_speed() -> f32 {
    0.01
}
fn default_jump_distance() -> f32 {
    5.0
}
fn default_capture_radius() -> f32 {
    5.0
}
fn default_alien_ring_radius() -> f32 {
    30.0
}
fn default_alien_height() -> f32 {
    5.0
}
fn default_play_radius() -> f32 {
    40.0
}
fn default_volcano_leeway() -> f32 {
    2.0
}
fn default_orbit_jitter() -> f32 {
    0.05
}
fn default_orbit_speed() -> f32 {
    0.3
}
fn default_approach_speed() -> f32 {
    0.15
}
fn default_surface_scan_cap() -> usize {
    physics::DEFAULT_SCAN_CAP
}
fn default_terrain_scale() -> f32 {
    1.0
}
fn default_meters_per_frame() -> f32 {
    20.0
}
fn default_radians_per_frame() -> f32 {
    1.0 / 200.0
}
fn default_mouse_dead_zone() -> f32 {
    30.0
}
fn default_camera_offset() -> [f32; 3] {
    [0.0, 2.0, 6.0]
}
fn default_house_position() -> [f32; 3] {
    [8.0, 0.0, 0.0]
}
fn default_volcano_position() -> [f32; 3] {
    [0.0, 0.0, -25.0]
}
fn default_volcano_scale() -> [f32; 3] {
    [8.0, 6.0, 8.0]
}
fn default_island_seed() -> u64 {
    7
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            glide_speed: default_glide_speed(),
            jump_distance: default_jump_distance(),
            capture_radius: default_capture_radius(),
            alien_ring_radius: default_alien_ring_radius(),
            alien_height: default_alien_height(),
            play_radius: default_play_radius(),
            volcano_leeway: default_volcano_leeway(),
            orbit_mode: OrbitMode::default(),
            orbit_jitter: default_orbit_jitter(),
            orbit_speed: default_orbit_speed(),
            approach_speed: default_approach_speed(),
            surface_scan_cap: default_surface_scan_cap(),
            terrain_scale: default_terrain_scale(),
            meters_per_frame: default_meters_per_frame(),
            radians_per_frame: default_radians_per_frame(),
            mouse_dead_zone: default_mouse_dead_zone(),
            camera_offset: default_camera_offset(),
            house_position: default_house_position(),
            volcano_position: default_volcano_position(),
            volcano_scale: default_volcano_scale(),
            rng_seed: None,
            island_seed: default_island_seed(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(data) => Self::from_ron(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }),
            Err(_) => {
                log::info!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    /// Parse a RON document; absent fields take their defaults.
    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = GameConfig::from_ron("()").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.surface_scan_cap, 230);
        assert_eq!(config.orbit_mode, OrbitMode::Jitter);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config =
            GameConfig::from_ron("(jump_distance: 3.0, orbit_mode: Continuous, rng_seed: Some(4))")
                .unwrap();
        assert_eq!(config.jump_distance, 3.0);
        assert_eq!(config.orbit_mode, OrbitMode::Continuous);
        assert_eq!(config.rng_seed, Some(4));
        assert_eq!(config.glide_speed, 0.01);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = GameConfig {
            island_seed: 42,
            ..Default::default()
        };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(GameConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(GameConfig::from_ron("(jump_distance: \"high\")").is_err());
    }
}
