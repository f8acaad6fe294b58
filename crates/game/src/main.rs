//! Island Defense - headless run of the island game loop.
//!
//! Drives `GameState` with a scripted input track at a fixed 60 Hz and records
//! each frame into a `DrawList`, the way a windowed front end would.

use anyhow::Result;
use engine_core::{DrawList, FrameInput, MeshData, Shape};
use std::collections::HashMap;
use game::{EncounterEvent, GameConfig, GameState, SceneMesh};
use input::{ElementState, InputState, KeyCode, MouseButton};

const FRAME_RATE: f32 = 60.0;
const RUN_SECONDS: f32 = 40.0;

/// What the scripted player does on a given frame.
fn scripted_input(input: &mut InputState, frame: u32) {
    let tap = |input: &mut InputState, key: KeyCode| {
        input.process_keyboard(key, ElementState::Pressed);
        input.process_keyboard(key, ElementState::Released);
    };

    match frame {
        30 => input.process_keyboard(KeyCode::KeyW, ElementState::Pressed),
        90 => input.process_keyboard(KeyCode::KeyW, ElementState::Released),
        120 | 400 | 700 => tap(input, KeyCode::Space),
        200 => {
            input.process_cursor_position((900.0, 560.0));
            input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        }
        201 => {
            input.process_mouse_button(MouseButton::Left, ElementState::Released);
            input.process_cursor_position((640.0, 360.0));
        }
        600 => tap(input, KeyCode::Digit1),
        900 => tap(input, KeyCode::KeyM),
        1500 => tap(input, KeyCode::KeyN),
        _ => {}
    }
}

/// Triangles submitted by one frame's draw calls.
fn triangles_drawn(draws: &DrawList, meshes: &HashMap<u32, MeshData>) -> usize {
    draws
        .commands
        .iter()
        .filter_map(|c| meshes.get(&c.mesh_id))
        .map(|m| m.triangle_count())
        .sum()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                     Island Defense                       ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  WASD  - Walk            │  Mouse      - Steer           ║");
    println!("║  Space - Jump            │  Left Click - Glide to point  ║");
    println!("║  1 / 2 - Earthquake      │  N / M      - Day / Night     ║");
    println!("╚══════════════════════════════════════════════════════════╝");

    let config = GameConfig::load();
    let mut state = GameState::new(config)?;
    log::info!("Starting Island Defense (headless, {:.0} s)", RUN_SECONDS);

    // What a renderer would upload once; here it sizes each frame's work.
    let meshes: HashMap<u32, MeshData> = SceneMesh::ALL
        .iter()
        .map(|&id| (id.id(), state.mesh(id)))
        .collect();
    log::info!(
        "{} meshes, {} triangles total",
        meshes.len(),
        meshes.values().map(|m| m.triangle_count()).sum::<usize>()
    );

    let mut input = InputState::new();
    input.process_cursor_position((640.0, 360.0));
    let mut draws = DrawList::new();

    let dt = 1.0 / FRAME_RATE;
    let frames = (RUN_SECONDS * FRAME_RATE) as u32;
    let mut captures = 0;
    let mut peak_triangles = 0;
    for frame in 0..frames {
        scripted_input(&mut input, frame);

        let event = state.update(&FrameInput::new(frame as f32 * dt, dt), &mut input);
        if let EncounterEvent::Captured(n) = event {
            captures += n;
        }

        draws.clear();
        state.render(&mut draws);
        peak_triangles = peak_triangles.max(triangles_drawn(&draws, &meshes));
        input.begin_frame();
    }

    log::info!(
        "Finished after {} frames ({:.0} fps): wave {}, score {}, {} capture(s), {} alien(s) in the air",
        state.time.frame_count(),
        state.time.fps(),
        state.encounter.level(),
        state.encounter.score(),
        captures,
        draws.count_mesh(SceneMesh::Alien.id()),
    );
    log::info!(
        "{} draw calls last frame, peak {} triangles per frame",
        draws.commands.len(),
        peak_triangles
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Mat4, Material, SceneSink};

    #[test]
    fn triangle_count_follows_mesh_table() {
        let mut meshes = HashMap::new();
        meshes.insert(SceneMesh::Marker.id(), MeshData::cube());
        let mut draws = DrawList::new();
        draws.draw(SceneMesh::Marker.id(), Mat4::IDENTITY, &Material::default());
        draws.draw(SceneMesh::Marker.id(), Mat4::IDENTITY, &Material::default());
        // Unknown meshes contribute nothing.
        draws.draw(SceneMesh::Island.id(), Mat4::IDENTITY, &Material::default());
        assert_eq!(triangles_drawn(&draws, &meshes), 24);
    }
}
