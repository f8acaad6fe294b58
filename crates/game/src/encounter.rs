//! Alien waves circling the island.
//!
//! Each wave spawns on a ring around the island center and circles inward.
//! Jumping into an alien captures it; clearing a wave scores its point value,
//! doubles the next one and adds an alien. An alien reaching the house ends
//! the run and everything starts over from wave 1.

use engine_core::Vec3;
use physics::{outside_play_radius, point_in_box, xz_distance_squared, Footprint};
use rand::prelude::*;
use std::f32::consts::TAU;

use crate::config::{GameConfig, OrbitMode};

/// Points awarded for clearing the first wave.
pub const BASE_POINTS: u64 = 100;

/// Tuning for spawn placement, movement and hit tests.
#[derive(Debug, Clone)]
pub struct EncounterParams {
    pub ring_radius: f32,
    pub height: f32,
    pub capture_radius: f32,
    pub play_radius: f32,
    pub volcano_leeway: f32,
    pub orbit_mode: OrbitMode,
    pub orbit_jitter: f32,
    pub orbit_speed: f32,
    pub approach_speed: f32,
}

impl From<&GameConfig> for EncounterParams {
    fn from(config: &GameConfig) -> Self {
        Self {
            ring_radius: config.alien_ring_radius,
            height: config.alien_height,
            capture_radius: config.capture_radius,
            play_radius: config.play_radius,
            volcano_leeway: config.volcano_leeway,
            orbit_mode: config.orbit_mode,
            orbit_jitter: config.orbit_jitter,
            orbit_speed: config.orbit_speed,
            approach_speed: config.approach_speed,
        }
    }
}

/// What happened during one encounter update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterEvent {
    Idle,
    /// Aliens captured this frame; the wave is still going.
    Captured(usize),
    /// The last alien of a wave fell; `level` is the new wave.
    WaveCleared { level: u32, score: u64 },
    /// An alien hit the house.
    GameOver { final_score: u64, final_level: u32 },
}

/// Per-slot alien state, kept as parallel vectors of equal length.
#[derive(Debug, Clone, Default)]
pub struct AlienWave {
    positions: Vec<Vec3>,
    previous: Vec<Vec3>,
    alive: Vec<bool>,
}

impl AlienWave {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn previous(&self) -> &[Vec3] {
        &self.previous
    }

    pub fn alive(&self) -> &[bool] {
        &self.alive
    }

    /// Positions of aliens still in play.
    pub fn living(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.positions
            .iter()
            .zip(&self.alive)
            .filter(|(_, &alive)| alive)
            .map(|(&p, _)| p)
    }

    fn push_slot(&mut self) {
        self.positions.push(Vec3::ZERO);
        self.previous.push(Vec3::ZERO);
        self.alive.push(true);
    }

    fn truncate(&mut self, len: usize) {
        self.positions.truncate(len);
        self.previous.truncate(len);
        self.alive.truncate(len);
    }
}

/// Score, wave level and the aliens of the current wave.
pub struct Encounter {
    wave: AlienWave,
    level: u32,
    score: u64,
    potential_points: u64,
    params: EncounterParams,
    rng: StdRng,
}

impl Encounter {
    pub fn new(params: EncounterParams, rng: StdRng) -> Self {
        let mut encounter = Self {
            wave: AlienWave::default(),
            level: 1,
            score: 0,
            potential_points: BASE_POINTS,
            params,
            rng,
        };
        encounter.wave.push_slot();
        encounter.spawn_all();
        encounter
    }

    /// Seeded from `rng_seed` when configured, otherwise from entropy.
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(EncounterParams::from(config), rng)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn potential_points(&self) -> u64 {
        self.potential_points
    }

    pub fn wave(&self) -> &AlienWave {
        &self.wave
    }

    /// Back to wave 1 with a single fresh alien.
    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.potential_points = BASE_POINTS;
        self.wave.truncate(1);
        self.spawn_all();
    }

    fn ring_position(&mut self) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        Vec3::new(
            self.params.ring_radius * theta.cos(),
            self.params.height,
            self.params.ring_radius * theta.sin(),
        )
    }

    /// Put every slot back on the ring, alive.
    fn spawn_all(&mut self) {
        for i in 0..self.wave.len() {
            let p = self.ring_position();
            self.wave.positions[i] = p;
            self.wave.previous[i] = p;
            self.wave.alive[i] = true;
        }
    }

    /// Move every living alien one tick around (and toward) the center.
    pub fn advance_orbits(&mut self, dt: f32) {
        let drift = self.params.approach_speed * self.level as f32 * dt;
        for i in 0..self.wave.len() {
            if !self.wave.alive[i] {
                continue;
            }
            let angle = match self.params.orbit_mode {
                OrbitMode::Jitter if self.params.orbit_jitter > 0.0 => {
                    self.rng.gen_range(0.0..self.params.orbit_jitter)
                }
                OrbitMode::Jitter => 0.0,
                OrbitMode::Continuous => self.params.orbit_speed * dt,
            };

            let current = self.wave.positions[i];
            self.wave.previous[i] = current;

            // Rotation about +Y through the origin; height is left untouched.
            let (sin, cos) = angle.sin_cos();
            let mut next = Vec3::new(
                current.x * cos + current.z * sin,
                current.y,
                current.z * cos - current.x * sin,
            );
            let radius = (next.x * next.x + next.z * next.z).sqrt();
            if radius > 0.0 && drift > 0.0 {
                let shrink = (radius - drift).max(0.0) / radius;
                next.x *= shrink;
                next.z *= shrink;
            }
            self.wave.positions[i] = next;
        }
    }

    /// Hit tests for the current positions: out of play and volcano skip the
    /// alien, the house ends the run, an airborne player in reach captures.
    pub fn resolve(
        &mut self,
        player: Vec3,
        airborne: bool,
        house: Option<&Footprint>,
        volcano: Option<&Footprint>,
    ) -> EncounterEvent {
        let reach = self.params.capture_radius * self.params.capture_radius;
        let leeway = self.params.volcano_leeway;
        let mut captured = 0;

        for i in 0..self.wave.len() {
            if !self.wave.alive[i] {
                continue;
            }
            let alien = self.wave.positions[i];

            if outside_play_radius(alien, self.params.play_radius) {
                continue;
            }
            if volcano.is_some_and(|fp| point_in_box(alien, fp, leeway, leeway)) {
                continue;
            }
            if house.is_some_and(|fp| point_in_box(alien, fp, 0.0, 0.0)) {
                let event = EncounterEvent::GameOver {
                    final_score: self.score,
                    final_level: self.level,
                };
                self.reset();
                return event;
            }
            if airborne && xz_distance_squared(player, alien) < reach {
                self.wave.alive[i] = false;
                captured += 1;
            }
        }

        if self.wave.alive.iter().all(|&alive| !alive) {
            self.score = self.score.saturating_add(self.potential_points);
            self.potential_points = self.potential_points.saturating_mul(2);
            self.level += 1;
            self.wave.push_slot();
            self.spawn_all();
            return EncounterEvent::WaveCleared {
                level: self.level,
                score: self.score,
            };
        }

        if captured > 0 {
            EncounterEvent::Captured(captured)
        } else {
            EncounterEvent::Idle
        }
    }

    /// One frame: orbit, then hit tests.
    pub fn update(
        &mut self,
        dt: f32,
        player: Vec3,
        airborne: bool,
        house: Option<&Footprint>,
        volcano: Option<&Footprint>,
    ) -> EncounterEvent {
        self.advance_orbits(dt);
        self.resolve(player, airborne, house, volcano)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encounter(seed: u64) -> Encounter {
        let config = GameConfig {
            rng_seed: Some(seed),
            ..Default::default()
        };
        Encounter::from_config(&config)
    }

    fn assert_invariant(enc: &Encounter) {
        let wave = enc.wave();
        assert_eq!(wave.positions().len(), enc.level() as usize);
        assert_eq!(wave.previous().len(), enc.level() as usize);
        assert_eq!(wave.alive().len(), enc.level() as usize);
    }

    fn on_ring(p: Vec3) -> bool {
        ((p.x * p.x + p.z * p.z).sqrt() - 30.0).abs() < 1e-3 && p.y == 5.0
    }

    /// Jump onto living aliens one at a time until the wave clears.
    fn clear_wave(enc: &mut Encounter) -> EncounterEvent {
        let level = enc.level();
        loop {
            let target = enc.wave().living().next().expect("wave has a living alien");
            let event = enc.resolve(target, true, None, None);
            if enc.level() != level {
                return event;
            }
        }
    }

    #[test]
    fn starts_with_one_alien_on_the_ring() {
        let enc = encounter(1);
        assert_eq!(enc.level(), 1);
        assert_eq!(enc.score(), 0);
        assert_eq!(enc.potential_points(), 100);
        assert_invariant(&enc);
        assert!(on_ring(enc.wave().positions()[0]));
    }

    #[test]
    fn airborne_capture_clears_first_wave() {
        let mut enc = encounter(2);
        let alien = enc.wave().positions()[0];
        let event = enc.resolve(alien + Vec3::new(1.0, -5.0, 1.0), true, None, None);

        assert_eq!(event, EncounterEvent::WaveCleared { level: 2, score: 100 });
        assert_eq!(enc.score(), 100);
        assert_eq!(enc.level(), 2);
        assert_eq!(enc.potential_points(), 200);
        assert_eq!(enc.wave().len(), 2);
        assert!(enc.wave().alive().iter().all(|&a| a));
        assert!(enc.wave().positions().iter().all(|&p| on_ring(p)));
        assert_invariant(&enc);
    }

    #[test]
    fn grounded_player_does_not_capture() {
        let mut enc = encounter(3);
        enc.wave.positions[0] = Vec3::new(3.0, 0.0, 0.0);
        let event = enc.resolve(Vec3::ZERO, false, None, None);
        assert_eq!(event, EncounterEvent::Idle);
        assert!(enc.wave().alive()[0]);
    }

    #[test]
    fn partial_capture_reports_count() {
        let mut enc = encounter(4);
        clear_wave(&mut enc);
        assert_eq!(enc.level(), 2);
        enc.wave.positions[0] = Vec3::new(3.0, 5.0, 0.0);
        enc.wave.positions[1] = Vec3::new(-20.0, 5.0, 0.0);
        let event = enc.resolve(Vec3::ZERO, true, None, None);
        assert_eq!(event, EncounterEvent::Captured(1));
        assert_eq!(enc.wave().alive(), &[false, true]);
        assert_eq!(enc.wave().living().count(), 1);
    }

    #[test]
    fn points_double_each_wave() {
        let mut enc = encounter(5);
        assert_eq!(clear_wave(&mut enc), EncounterEvent::WaveCleared { level: 2, score: 100 });
        assert_eq!(clear_wave(&mut enc), EncounterEvent::WaveCleared { level: 3, score: 300 });
        assert_eq!(clear_wave(&mut enc), EncounterEvent::WaveCleared { level: 4, score: 700 });
        assert_eq!(enc.potential_points(), 800);
        assert_invariant(&enc);
    }

    #[test]
    fn alien_in_house_resets_everything() {
        let mut enc = encounter(6);
        clear_wave(&mut enc);
        clear_wave(&mut enc);
        assert_eq!(enc.level(), 3);

        let house = Footprint::new(10.0, 6.0, 2.0, -2.0);
        enc.wave.positions[1] = Vec3::new(8.0, 5.0, 0.0);
        let event = enc.resolve(Vec3::new(-30.0, 0.0, -30.0), false, Some(&house), None);

        assert_eq!(event, EncounterEvent::GameOver { final_score: 300, final_level: 3 });
        assert_eq!(enc.score(), 0);
        assert_eq!(enc.level(), 1);
        assert_eq!(enc.potential_points(), 100);
        assert_eq!(enc.wave().len(), 1);
        assert!(enc.wave().alive()[0]);
        assert_invariant(&enc);
    }

    #[test]
    fn alien_near_volcano_is_skipped_not_fatal() {
        let mut enc = encounter(7);
        let volcano = Footprint::new(8.0, -8.0, -17.0, -33.0);
        enc.wave.positions[0] = Vec3::new(0.0, 5.0, -25.0);
        // Even a player right under it cannot capture while it is skipped.
        let event = enc.resolve(Vec3::new(0.0, 0.0, -25.0), true, None, Some(&volcano));
        assert_eq!(event, EncounterEvent::Idle);
        assert_eq!(enc.level(), 1);
        assert!(enc.wave().alive()[0]);

        // Inside the box but within the leeway margin of its edge: not skipped.
        enc.wave.positions[0] = Vec3::new(7.0, 5.0, -25.0);
        let event = enc.resolve(Vec3::new(7.0, 0.0, -25.0), true, None, Some(&volcano));
        assert_eq!(event, EncounterEvent::WaveCleared { level: 2, score: 100 });
    }

    #[test]
    fn out_of_play_alien_is_skipped() {
        let mut enc = encounter(8);
        enc.wave.positions[0] = Vec3::new(45.0, 5.0, 0.0);
        let event = enc.resolve(Vec3::new(45.0, 0.0, 0.0), true, None, None);
        assert_eq!(event, EncounterEvent::Idle);
        assert!(enc.wave().alive()[0]);
    }

    #[test]
    fn continuous_orbit_rotates_and_closes_in() {
        let config = GameConfig {
            rng_seed: Some(9),
            orbit_mode: OrbitMode::Continuous,
            orbit_speed: std::f32::consts::FRAC_PI_2,
            approach_speed: 2.0,
            ..Default::default()
        };
        let mut enc = Encounter::from_config(&config);
        enc.wave.positions[0] = Vec3::new(30.0, 5.0, 0.0);
        enc.advance_orbits(1.0);

        assert_eq!(enc.wave().previous()[0], Vec3::new(30.0, 5.0, 0.0));
        let p = enc.wave().positions()[0];
        // Quarter turn about +Y takes +X to -Z, and the radius drops by 2.
        assert!((p - Vec3::new(0.0, 5.0, -28.0)).length() < 1e-3, "{:?}", p);
    }

    #[test]
    fn jitter_orbit_keeps_radius_without_drift() {
        let config = GameConfig {
            rng_seed: Some(10),
            approach_speed: 0.0,
            ..Default::default()
        };
        let mut enc = Encounter::from_config(&config);
        let start = enc.wave().positions()[0];
        for _ in 0..20 {
            enc.advance_orbits(1.0 / 60.0);
        }
        let end = enc.wave().positions()[0];
        assert!(on_ring(end));
        assert_ne!(start, end);
    }

    #[test]
    fn orbiting_never_changes_height() {
        let config = GameConfig {
            rng_seed: Some(12),
            orbit_mode: OrbitMode::Continuous,
            orbit_speed: 1.3,
            ..Default::default()
        };
        let mut enc = Encounter::from_config(&config);
        for _ in 0..600 {
            enc.advance_orbits(1.0 / 60.0);
            assert_eq!(enc.wave().positions()[0].y, 5.0);
        }
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut enc = encounter(13);
        enc.score = u64::MAX - 10;
        enc.potential_points = u64::MAX / 2 + 1;
        let event = clear_wave(&mut enc);
        assert_eq!(event, EncounterEvent::WaveCleared { level: 2, score: u64::MAX });
        assert_eq!(enc.potential_points(), u64::MAX);
    }

    #[test]
    fn update_orbits_then_resolves() {
        let mut enc = encounter(11);
        let event = enc.update(1.0 / 60.0, Vec3::ZERO, false, None, None);
        assert_eq!(event, EncounterEvent::Idle);
        assert_ne!(enc.wave().positions()[0], enc.wave().previous()[0]);
    }
}
