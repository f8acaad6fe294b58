//! Player controller: steering, walking, terrain placement and collision rollback.

use engine_core::{Mat4, Quat, Transform, Vec2, Vec3};
use input::Thrust;
use physics::{outside_play_radius, point_in_box, Footprint, SurfaceSet};

use crate::config::GameConfig;

/// Player controller handling movement and obstacle rollback.
pub struct PlayerController {
    /// Proposed transform for this frame; committed or rolled back by
    /// [`PlayerController::resolve_collision`].
    pub transform: Transform,
    /// Last transform that passed collision.
    last_valid: Transform,
    /// Model yaw from the last nonzero thrust, on top of the steering yaw.
    facing: f32,
    /// Terrain height from the last successful ground lookup.
    resting_height: f32,
    meters_per_frame: f32,
    radians_per_frame: f32,
    dead_zone: f32,
}

impl PlayerController {
    pub fn new(position: Vec3, config: &GameConfig) -> Self {
        let transform = Transform::from_position(position);
        Self {
            transform,
            last_valid: transform,
            facing: 0.0,
            resting_height: position.y,
            meters_per_frame: config.meters_per_frame,
            radians_per_frame: config.radians_per_frame,
            dead_zone: config.mouse_dead_zone,
        }
    }

    /// Get player position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn last_valid(&self) -> &Transform {
        &self.last_valid
    }

    pub fn resting_height(&self) -> f32 {
        self.resting_height
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Turn while the cursor sits outside the dead zone around the screen
    /// center. Only the horizontal offset past the zone edge counts.
    pub fn steer(&mut self, mouse_from_center: Vec2, dt: f32) {
        let mx = mouse_from_center.x;
        let past_edge = if mx - self.dead_zone > 0.0 {
            mx - self.dead_zone
        } else if mx + self.dead_zone < 0.0 {
            mx + self.dead_zone
        } else {
            0.0
        };
        let velocity = past_edge * self.radians_per_frame * dt;
        if velocity != 0.0 {
            self.transform.rotate_y(-velocity * 0.7);
        }
    }

    /// Walk along the thrust in the player's own frame.
    pub fn apply_thrust(&mut self, thrust: Thrust, dt: f32) {
        let Some(heading) = thrust.heading() else {
            return;
        };
        self.facing = heading;
        let dir = Vec3::new(thrust.x as f32, 0.0, thrust.z as f32);
        self.transform
            .translate_local(dir * self.meters_per_frame * dt);
    }

    /// Stand on the terrain under the player, lifted by the jump offset.
    ///
    /// Off the walkable surfaces the previous resting height is kept.
    pub fn place_on_terrain(&mut self, surfaces: &SurfaceSet, jump_height: f32) {
        let p = self.transform.position;
        match surfaces.ground_height(p.x, p.z) {
            Some(h) => self.resting_height = h,
            None => log::debug!("No ground under ({:.2}, {:.2})", p.x, p.z),
        }
        self.transform.position.y = self.resting_height + jump_height;
    }

    /// Reject the proposed transform if it is inside an obstacle or out of
    /// play; otherwise commit it. Returns true on rollback.
    pub fn resolve_collision(&mut self, obstacles: &[Footprint], play_radius: f32) -> bool {
        let p = self.transform.position;
        let blocked = outside_play_radius(p, play_radius)
            || obstacles.iter().any(|fp| point_in_box(p, fp, 0.0, 0.0));
        if blocked {
            self.transform = self.last_valid;
        } else {
            self.last_valid = self.transform;
        }
        blocked
    }

    /// Model matrix for drawing: the transform, turned to face the thrust.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix() * Mat4::from_quat(Quat::from_rotation_y(self.facing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_ground(height: f32) -> SurfaceSet {
        let vertices = [
            Vec3::new(-50.0, height, -50.0),
            Vec3::new(50.0, height, -50.0),
            Vec3::new(-50.0, height, 50.0),
            Vec3::new(50.0, height, 50.0),
        ];
        SurfaceSet::build(&vertices, &[0, 2, 1, 1, 2, 3], 1.0).unwrap()
    }

    fn player_at(position: Vec3) -> PlayerController {
        PlayerController::new(position, &GameConfig::default())
    }

    #[test]
    fn thrust_moves_in_player_frame() {
        let mut player = player_at(Vec3::ZERO);
        player.apply_thrust(Thrust::new(0, -1), 0.5);
        assert!((player.position() - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
        assert_eq!(player.facing(), 0.0);

        player.transform.rotate_y(std::f32::consts::FRAC_PI_2);
        player.apply_thrust(Thrust::new(0, -1), 0.5);
        assert!((player.position() - Vec3::new(-10.0, 0.0, -10.0)).length() < 1e-4);
    }

    #[test]
    fn idle_thrust_keeps_position_and_facing() {
        let mut player = player_at(Vec3::ONE);
        player.apply_thrust(Thrust::new(1, 0), 0.0);
        let facing = player.facing();
        player.apply_thrust(Thrust::NONE, 1.0);
        assert_eq!(player.position(), Vec3::ONE);
        assert_eq!(player.facing(), facing);
    }

    #[test]
    fn dead_zone_suppresses_steering() {
        let mut player = player_at(Vec3::ZERO);
        player.steer(Vec2::new(25.0, 300.0), 1.0);
        assert_eq!(player.transform.rotation, Quat::IDENTITY);
        player.steer(Vec2::new(130.0, 0.0), 1.0);
        // (130 - 30) px * 1/200 * 0.7 turned clockwise.
        let (axis, angle) = player.transform.rotation.to_axis_angle();
        assert!((angle - 0.35).abs() < 1e-4);
        assert!(axis.y < 0.0);
    }

    #[test]
    fn terrain_and_jump_set_height() {
        let ground = flat_ground(2.0);
        let mut player = player_at(Vec3::new(1.0, 0.0, 1.0));
        player.place_on_terrain(&ground, 0.0);
        assert!((player.position().y - 2.0).abs() < 1e-5);
        player.place_on_terrain(&ground, 3.0);
        assert!((player.position().y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn terrain_miss_keeps_last_height() {
        let ground = flat_ground(2.0);
        let mut player = player_at(Vec3::new(1.0, 0.0, 1.0));
        player.place_on_terrain(&ground, 0.0);
        player.transform.position.x = 500.0;
        player.place_on_terrain(&ground, 1.0);
        assert!((player.position().y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn blocked_move_rolls_back() {
        let house = Footprint::new(10.0, 6.0, 2.0, -2.0);
        let mut player = player_at(Vec3::new(4.0, 0.0, 0.0));
        assert!(!player.resolve_collision(&[house], 40.0));

        player.transform.position = Vec3::new(7.0, 0.0, 0.0);
        assert!(player.resolve_collision(&[house], 40.0));
        assert_eq!(player.position(), Vec3::new(4.0, 0.0, 0.0));

        player.transform.position = Vec3::new(4.0, 0.0, 5.0);
        assert!(!player.resolve_collision(&[house], 40.0));
        assert_eq!(player.last_valid().position, Vec3::new(4.0, 0.0, 5.0));
    }

    #[test]
    fn leaving_play_area_rolls_back() {
        let mut player = player_at(Vec3::ZERO);
        player.transform.position = Vec3::new(41.0, 0.0, 0.0);
        assert!(player.resolve_collision(&[], 40.0));
        assert_eq!(player.position(), Vec3::ZERO);
    }
}
