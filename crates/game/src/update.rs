//! Gameplay update logic: all per-frame game state advancement.

use engine_core::{CameraState, FrameInput, Vec3};
use input::{InputState, KeyCode};
use physics::{pick_ground_point, MouseRay};
use std::f32::consts::FRAC_PI_4;

use crate::config::GameConfig;
use crate::cutscene::{Earthquake, QuakeIntensity, SkyTarget};
use crate::encounter::EncounterEvent;
use crate::player::PlayerController;
use crate::GameState;

/// Ground plane clicks are projected onto.
const PICK_PLANE_HEIGHT: f32 = 0.0;

/// Run one frame of gameplay. Called from `GameState::update()`.
pub fn frame(state: &mut GameState, frame: &FrameInput, input: &mut InputState) -> EncounterEvent {
    state.time.update(frame);
    let now = state.time.now();
    let dt = state.time.delta_seconds();

    poll_footprints(state);

    if input.is_jump_pressed() && state.jump.trigger(now) {
        log::debug!("Jump at t={:.2}", now);
    }
    let jump_height = state.jump.update(now);

    move_player(state, input, dt);

    state.player.place_on_terrain(&state.surfaces, jump_height);

    // A blocked glide keeps ticking and is rolled back each frame until its
    // budget runs out.
    let obstacles = state.obstacles();
    state
        .player
        .resolve_collision(&obstacles, state.config.play_radius);

    let event = state.encounter.update(
        dt,
        state.player.position(),
        state.jump.is_airborne(),
        state.house_footprint.get(),
        state.volcano_footprint.get(),
    );
    handle_event(state, event);

    update_cutscenes(state, input, dt);

    state.camera = follow_camera(&state.player, &state.config, frame.aspect());
    event
}

/// Kick off the footprint workers and collect whatever has finished.
fn poll_footprints(state: &mut GameState) {
    if !state.house_footprint.is_requested() {
        state
            .house_footprint
            .request(state.meshes.house.positions.clone(), state.house_placement);
    }
    if !state.volcano_footprint.is_requested() {
        state
            .volcano_footprint
            .request(state.meshes.volcano.positions.clone(), state.volcano_placement);
    }
    state.house_footprint.poll();
    state.volcano_footprint.poll();
}

/// Mouse steering, WASD thrust, then click-to-move.
fn move_player(state: &mut GameState, input: &mut InputState, dt: f32) {
    let thrust = input.thrust();
    state.player.steer(input.mouse_from_center(), dt);
    state.player.apply_thrust(thrust, dt);

    if input.take_click() {
        // Unproject through last frame's camera, which is what the user saw.
        let ray = MouseRay::from_ndc(input.mouse_ndc(), state.camera.view, state.camera.projection);
        let origin = state.player.position() + Vec3::new(0.0, state.config.camera_offset[1], 0.0);
        let target = pick_ground_point(origin, ray.direction(), PICK_PLANE_HEIGHT);
        state.glide.latch(target - origin);
        state.pick_target = Some(target);
        log::debug!("Glide toward ({:.2}, {:.2})", target.x, target.z);
    }

    state.glide.tick(&mut state.player.transform, !thrust.is_idle());
    if !state.glide.is_moving() {
        state.pick_target = None;
    }
}

fn handle_event(state: &mut GameState, event: EncounterEvent) {
    match event {
        EncounterEvent::Idle => {}
        EncounterEvent::Captured(n) => log::debug!("Captured {} alien(s)", n),
        EncounterEvent::WaveCleared { level, score } => {
            log::info!("Wave cleared! Score {}, now on wave {}", score, level);
        }
        EncounterEvent::GameOver {
            final_score,
            final_level,
        } => {
            log::info!(
                "The aliens reached the house. Final score {} on wave {}",
                final_score,
                final_level
            );
            start_quake(state, QuakeIntensity::Large);
        }
    }
}

fn start_quake(state: &mut GameState, intensity: QuakeIntensity) {
    log::info!("Earthquake: {:?}", intensity);
    state.earthquake = Some(Earthquake::new(intensity));
}

fn update_cutscenes(state: &mut GameState, input: &InputState, dt: f32) {
    if input.is_key_pressed(KeyCode::Digit1) {
        start_quake(state, QuakeIntensity::Small);
    }
    if input.is_key_pressed(KeyCode::Digit2) {
        start_quake(state, QuakeIntensity::Large);
    }
    if input.is_key_pressed(KeyCode::KeyN) && state.sky.request(SkyTarget::Day) {
        log::info!("Sky fading to day");
    }
    if input.is_key_pressed(KeyCode::KeyM) && state.sky.request(SkyTarget::Night) {
        log::info!("Sky fading to night");
    }

    if let Some(quake) = state.earthquake.as_mut() {
        quake.tick(dt);
        if quake.is_cracked() && !state.house_cracked {
            log::info!("The chimney came down");
            state.house_cracked = true;
        }
        if quake.is_finished() {
            state.earthquake = None;
        }
    }
    state.sky.tick(dt);
}

/// Third-person camera: eye at the configured offset in the player's frame,
/// looking at the player.
pub fn follow_camera(player: &PlayerController, config: &GameConfig, aspect: f32) -> CameraState {
    let eye = player.transform.transform_point(Vec3::from(config.camera_offset));
    CameraState::look_at(eye, player.position(), FRAC_PI_4, aspect, 1.0, 500.0)
}
