//! Click-to-move: a bounded, constant-velocity glide toward a picked point.

use engine_core::{Transform, Vec3};

/// An active glide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlideCommand {
    /// Picked target minus the pick origin.
    pub glide_vector: Vec3,
    pub elapsed_ticks: u32,
}

/// Drives the player along a latched glide vector, one step per frame.
#[derive(Debug, Clone)]
pub struct GlideController {
    speed: f32,
    tick_budget: u32,
    command: Option<GlideCommand>,
}

impl GlideController {
    /// `speed` is the fraction of the glide vector covered per tick.
    pub fn new(speed: f32) -> Self {
        let tick_budget = if speed > 0.0 {
            (1.0 / speed).round().max(1.0) as u32
        } else {
            0
        };
        Self {
            speed,
            tick_budget,
            command: None,
        }
    }

    /// Start (or restart) a glide along `glide_vector`.
    pub fn latch(&mut self, glide_vector: Vec3) {
        self.command = Some(GlideCommand {
            glide_vector,
            elapsed_ticks: 0,
        });
    }

    pub fn cancel(&mut self) {
        self.command = None;
    }

    pub fn is_moving(&self) -> bool {
        self.command.is_some()
    }

    pub fn command(&self) -> Option<&GlideCommand> {
        self.command.as_ref()
    }

    pub fn tick_budget(&self) -> u32 {
        self.tick_budget
    }

    /// Advance one tick. Returns true if the transform was moved.
    ///
    /// Manual input or a zero-length vector cancels the glide; otherwise the
    /// transform shifts by `glide_vector · speed` in world XZ, and the glide
    /// ends once the tick budget is spent, wherever that leaves the player.
    pub fn tick(&mut self, transform: &mut Transform, manual_input: bool) -> bool {
        let Some(command) = self.command.as_mut() else {
            return false;
        };

        if manual_input
            || command.glide_vector.length_squared() == 0.0
            || command.elapsed_ticks >= self.tick_budget
        {
            self.command = None;
            return false;
        }

        let step = command.glide_vector * self.speed;
        transform.translate(Vec3::new(step.x, 0.0, step.z));
        command.elapsed_ticks += 1;

        if command.elapsed_ticks >= self.tick_budget {
            self.command = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_moves_by_scaled_vector() {
        let mut glide = GlideController::new(0.01);
        let origin = Vec3::new(1.0, 0.0, 1.0);
        let target = Vec3::new(11.0, 0.0, -9.0);
        let mut transform = Transform::from_position(origin);

        glide.latch(target - origin);
        assert!(glide.tick(&mut transform, false));
        let moved = transform.position - origin;
        assert!((moved - (target - origin) * 0.01).length() < 1e-6);
        assert!(glide.is_moving());
    }

    #[test]
    fn glide_ends_after_budget() {
        let mut glide = GlideController::new(0.01);
        assert_eq!(glide.tick_budget(), 100);
        let mut transform = Transform::default();
        glide.latch(Vec3::new(10.0, 0.0, 0.0));

        for _ in 0..100 {
            assert!(glide.is_moving());
            assert!(glide.tick(&mut transform, false));
        }
        assert!(!glide.is_moving());
        assert!((transform.position.x - 10.0).abs() < 1e-3);
        assert!(!glide.tick(&mut transform, false));
    }

    #[test]
    fn manual_input_cancels() {
        let mut glide = GlideController::new(0.01);
        let mut transform = Transform::default();
        glide.latch(Vec3::new(10.0, 0.0, 0.0));
        glide.tick(&mut transform, false);
        let before = transform.position;

        assert!(!glide.tick(&mut transform, true));
        assert!(!glide.is_moving());
        assert_eq!(transform.position, before);
    }

    #[test]
    fn zero_vector_cancels_without_moving() {
        let mut glide = GlideController::new(0.01);
        let mut transform = Transform::default();
        glide.latch(Vec3::ZERO);
        assert!(glide.is_moving());
        assert!(!glide.tick(&mut transform, false));
        assert!(!glide.is_moving());
        assert_eq!(transform.position, Vec3::ZERO);
    }

    #[test]
    fn glide_ignores_vertical_component() {
        let mut glide = GlideController::new(0.5);
        let mut transform = Transform::default();
        glide.latch(Vec3::new(2.0, -4.0, 2.0));
        glide.tick(&mut transform, false);
        assert_eq!(transform.position, Vec3::new(1.0, 0.0, 1.0));
    }
}
