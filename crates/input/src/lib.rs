//! Input handling for keyboard and mouse.

use glam::Vec2;
use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Discrete directional thrust, each axis in {-1, 0, 1}.
///
/// `z = -1` is forward (W), `x = -1` is left (A).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thrust {
    pub x: i8,
    pub z: i8,
}

impl Thrust {
    pub const NONE: Thrust = Thrust { x: 0, z: 0 };

    pub fn new(x: i8, z: i8) -> Self {
        Self {
            x: x.signum(),
            z: z.signum(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.x == 0 && self.z == 0
    }

    /// Model yaw that faces the thrust direction (forward is -Z).
    /// `None` when idle.
    pub fn heading(&self) -> Option<f32> {
        thrust_heading(self.x, self.z)
    }
}

/// Yaw for each of the eight thrust directions; idle has no heading.
pub fn thrust_heading(dx: i8, dz: i8) -> Option<f32> {
    match (dx.signum(), dz.signum()) {
        (0, 0) => None,
        (0, -1) => Some(0.0),
        (-1, -1) => Some(FRAC_PI_4),
        (-1, 0) => Some(FRAC_PI_2),
        (-1, 1) => Some(3.0 * FRAC_PI_4),
        (0, 1) => Some(PI),
        (1, 1) => Some(-3.0 * FRAC_PI_4),
        (1, 0) => Some(-FRAC_PI_2),
        (1, -1) => Some(-FRAC_PI_4),
        _ => None,
    }
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Window size in pixels, for NDC conversion.
    viewport: Vec2,

    /// Set by a click, cleared by whoever consumes it.
    click: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            viewport: Vec2::new(1280.0, 720.0),
            ..Default::default()
        }
    }

    /// Clear per-frame state. Call at the start of each frame.
    ///
    /// The click flag survives until consumed with [`InputState::take_click`].
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event. A left press latches a click.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if button == MouseButton::Left && !self.mouse_held.contains(&button) {
                    self.click = true;
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    /// Process a window resize.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Cursor offset from the window center in pixels, +y up.
    pub fn mouse_from_center(&self) -> Vec2 {
        let half = self.viewport * 0.5;
        Vec2::new(
            self.mouse_position.x - half.x,
            half.y - self.mouse_position.y,
        )
    }

    /// Cursor in normalized device coordinates, -1..1 on both axes, +y up.
    pub fn mouse_ndc(&self) -> Vec2 {
        let half = self.viewport * 0.5;
        if half.x <= 0.0 || half.y <= 0.0 {
            return Vec2::ZERO;
        }
        self.mouse_from_center() / half
    }

    /// Consume the pending click, if any. Returns true at most once per click.
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.click)
    }

    /// Directional thrust from WASD.
    pub fn thrust(&self) -> Thrust {
        let mut thrust = Thrust::NONE;
        if self.is_key_held(KeyCode::KeyW) {
            thrust.z -= 1;
        }
        if self.is_key_held(KeyCode::KeyS) {
            thrust.z += 1;
        }
        if self.is_key_held(KeyCode::KeyA) {
            thrust.x -= 1;
        }
        if self.is_key_held(KeyCode::KeyD) {
            thrust.x += 1;
        }
        thrust
    }

    /// Check if jump was pressed (Space).
    pub fn is_jump_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Space)
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
