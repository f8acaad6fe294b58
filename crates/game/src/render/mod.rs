//! Rendering: turns the game state into draw calls on a [`SceneSink`].

use engine_core::{Light, Mat4, Material, Quat, SceneSink, Vec3, Vec4};
use std::f32::consts::TAU;

use crate::cutscene::{chimney_rest_transform, chimney_transform_for, ChimneyPose};
use crate::GameState;

/// Mesh ids handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SceneMesh {
    Island,
    Volcano,
    House,
    Alien,
    Player,
    Chimney,
    Marker,
}

impl SceneMesh {
    pub const ALL: [SceneMesh; 7] = [
        SceneMesh::Island,
        SceneMesh::Volcano,
        SceneMesh::House,
        SceneMesh::Alien,
        SceneMesh::Player,
        SceneMesh::Chimney,
        SceneMesh::Marker,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Scene palette.
pub struct Palette {
    pub island: Material,
    pub volcano: Material,
    pub house: Material,
    pub cracked: Material,
    pub brick: Material,
    pub alien: Material,
    pub player: Material,
    pub marker: Material,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            island: Material::from_hex(0x83a945).with_ambient(0.3).with_diffusivity(0.8),
            volcano: Material::from_hex(0x208f52).with_ambient(0.3).with_diffusivity(0.6),
            house: Material::from_hex(0xddd6c3).with_ambient(0.7).with_diffusivity(0.8),
            cracked: Material::from_hex(0xffffff)
                .with_ambient(0.5)
                .with_diffusivity(0.1)
                .with_specularity(0.1),
            brick: Material::from_hex(0xea4e3e).with_ambient(0.2).with_diffusivity(0.3),
            alien: Material::from_hex(0x0b0b0b).with_ambient(0.5),
            player: Material::from_hex(0x004f00),
            marker: Material::from_hex(0xffffff).with_ambient(1.0),
        }
    }
}

/// Issue every draw call for one frame. Called from `GameState::render()`.
pub fn run(state: &GameState, sink: &mut impl SceneSink) {
    let palette = Palette::default();
    let now = state.time.now();

    sink.set_camera(state.camera);
    let daylight = state.sky.ambient().max(0.1);
    sink.set_lights(&[Light {
        position: Vec4::new(10.0, 10.0, 10.0, 1.0),
        color: [daylight, daylight, daylight, 1.0],
        size: 10_000.0,
    }]);

    sink.draw(
        SceneMesh::Island.id(),
        Mat4::from_scale(Vec3::splat(state.config.terrain_scale)),
        &palette.island,
    );
    sink.draw(SceneMesh::Volcano.id(), state.volcano_placement, &palette.volcano);

    // The house and chimney shake with the ground.
    let shake = state.earthquake.as_ref().map_or(0.0, |q| q.shake_offset());
    let house = Mat4::from_translation(Vec3::new(shake, 0.0, 0.0)) * state.house_placement;
    let house_material = if state.house_cracked {
        &palette.cracked
    } else {
        &palette.house
    };
    sink.draw(SceneMesh::House.id(), house, house_material);

    let chimney = match &state.earthquake {
        Some(quake) => state.house_placement * quake.chimney_transform(),
        None if state.house_cracked => {
            state.house_placement * chimney_transform_for(ChimneyPose::Toppled, 0.0)
        }
        None => state.house_placement * chimney_rest_transform(),
    };
    sink.draw(SceneMesh::Chimney.id(), chimney, &palette.brick);

    sink.draw(SceneMesh::Player.id(), state.player.model_matrix(), &palette.player);

    if let Some(target) = state.pick_target {
        let marker = Mat4::from_translation(target) * Mat4::from_scale(Vec3::splat(0.3));
        sink.draw(SceneMesh::Marker.id(), marker, &palette.marker);
    }

    let spin = Quat::from_rotation_y((now * 3.0) % TAU);
    for alien in state.encounter.wave().living() {
        sink.draw(
            SceneMesh::Alien.id(),
            Mat4::from_rotation_translation(spin, alien),
            &palette.alien,
        );
    }
}
