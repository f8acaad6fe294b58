//! Game state: everything one running island needs, owned in one place.
//!
//! Per-frame advancement lives in the `update` module, drawing in `render`.

use anyhow::{Context, Result};
use engine_core::{CameraState, FrameInput, Mat4, MeshData, SceneSink, Time, Vec3};
use input::InputState;
use physics::{DeferredFootprint, Footprint, SurfaceSet};
use procgen::IslandConfig;

use crate::config::GameConfig;
use crate::cutscene::{Earthquake, SkyFade};
use crate::encounter::{Encounter, EncounterEvent};
use crate::glide::GlideController;
use crate::jump::JumpState;
use crate::player::PlayerController;
use crate::render::{self, SceneMesh};
use crate::update;

/// Player spawn, in front of the house.
pub(crate) const PLAYER_START: Vec3 = Vec3::new(0.0, 0.0, 10.0);

/// Static meshes shared by drawing and collision.
pub struct SceneMeshes {
    pub island: MeshData,
    pub volcano: MeshData,
    pub house: MeshData,
    pub alien: MeshData,
    pub player: MeshData,
}

impl SceneMeshes {
    fn build(config: &GameConfig) -> Self {
        let island = procgen::generate_island(&IslandConfig {
            seed: config.island_seed,
            ..Default::default()
        });
        Self {
            island,
            volcano: procgen::volcano(16),
            house: procgen::house(),
            alien: procgen::alien(),
            player: procgen::player_figure(),
        }
    }
}

pub struct GameState {
    pub config: GameConfig,
    pub time: Time,
    pub meshes: SceneMeshes,
    pub surfaces: SurfaceSet,
    pub house_placement: Mat4,
    pub volcano_placement: Mat4,
    pub house_footprint: DeferredFootprint,
    pub volcano_footprint: DeferredFootprint,
    pub player: PlayerController,
    pub jump: JumpState,
    pub glide: GlideController,
    /// Last picked ground point, shown while a glide runs.
    pub pick_target: Option<Vec3>,
    pub encounter: Encounter,
    pub earthquake: Option<Earthquake>,
    /// Set when a quake brings the chimney down; never cleared.
    pub house_cracked: bool,
    pub sky: SkyFade,
    /// Camera of the last update; clicks are unprojected through it.
    pub camera: CameraState,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self> {
        let meshes = SceneMeshes::build(&config);
        let surfaces = SurfaceSet::from_shape(&meshes.island, config.terrain_scale)
            .context("island mesh has a malformed index buffer")?
            .with_scan_cap(config.surface_scan_cap);
        log::info!(
            "Island ready: {} walkable surfaces (scanning up to {})",
            surfaces.len(),
            config.surface_scan_cap
        );

        let house_placement = Mat4::from_translation(Vec3::from(config.house_position));
        let volcano_placement = Mat4::from_translation(Vec3::from(config.volcano_position))
            * Mat4::from_scale(Vec3::from(config.volcano_scale));

        let mut player = PlayerController::new(PLAYER_START, &config);
        player.place_on_terrain(&surfaces, 0.0);
        player.resolve_collision(&[], config.play_radius);

        let encounter = Encounter::from_config(&config);
        let jump = JumpState::new(config.jump_distance);
        let glide = GlideController::new(config.glide_speed);
        let camera = update::follow_camera(&player, &config, 1280.0 / 720.0);

        Ok(Self {
            time: Time::new(),
            meshes,
            surfaces,
            house_placement,
            volcano_placement,
            house_footprint: DeferredFootprint::new("house"),
            volcano_footprint: DeferredFootprint::new("volcano"),
            player,
            jump,
            glide,
            pick_target: None,
            encounter,
            earthquake: None,
            house_cracked: false,
            sky: SkyFade::default(),
            camera,
            config,
        })
    }

    /// Advance one frame. Returns what the alien encounter did this frame.
    pub fn update(&mut self, frame: &FrameInput, input: &mut InputState) -> EncounterEvent {
        update::frame(self, frame, input)
    }

    /// Draw the current state.
    pub fn render(&self, sink: &mut impl SceneSink) {
        render::run(self, sink);
    }

    /// Obstacles whose footprints are ready.
    pub fn obstacles(&self) -> Vec<Footprint> {
        [self.house_footprint.get(), self.volcano_footprint.get()]
            .into_iter()
            .flatten()
            .copied()
            .collect()
    }

    /// Mesh data by id, for uploading to a renderer.
    pub fn mesh(&self, id: SceneMesh) -> MeshData {
        match id {
            SceneMesh::Island => self.meshes.island.clone(),
            SceneMesh::Volcano => self.meshes.volcano.clone(),
            SceneMesh::House => self.meshes.house.clone(),
            SceneMesh::Alien => self.meshes.alien.clone(),
            SceneMesh::Player => self.meshes.player.clone(),
            SceneMesh::Chimney | SceneMesh::Marker => MeshData::cube(),
        }
    }
}
