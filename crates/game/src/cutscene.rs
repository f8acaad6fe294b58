//! Scripted scenes played on top of the game: earthquakes that shake the
//! house (and, when strong enough, bring the chimney down) and the day/night
//! sky fade.

use engine_core::{Mat4, Vec3};
use std::f32::consts::PI;

/// Chimney top in house space.
const CHIMNEY_BASE: Vec3 = Vec3::new(1.0, 2.0, -1.0);
const CHIMNEY_SCALE: Vec3 = Vec3::new(0.25, 0.75, 0.25);

const WOBBLE_END: f32 = 6.45;
const FALL_END: f32 = 9.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuakeIntensity {
    Small,
    Large,
}

impl QuakeIntensity {
    pub fn duration(self) -> f32 {
        match self {
            QuakeIntensity::Small => 10.0,
            QuakeIntensity::Large => 15.0,
        }
    }

    pub fn amplitude(self) -> f32 {
        match self {
            QuakeIntensity::Small => 0.25,
            QuakeIntensity::Large => 0.5,
        }
    }
}

/// Where the chimney is in its collapse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChimneyPose {
    /// Rocking about its base; angle around Z in radians.
    Wobbling(f32),
    /// Sliding off the roof; vertical drop so far.
    Falling(f32),
    /// On the ground next to the house.
    Toppled,
}

/// A running earthquake.
#[derive(Debug, Clone)]
pub struct Earthquake {
    intensity: QuakeIntensity,
    elapsed: f32,
    cracked: bool,
}

impl Earthquake {
    pub fn new(intensity: QuakeIntensity) -> Self {
        Self {
            intensity,
            elapsed: 0.0,
            cracked: false,
        }
    }

    pub fn intensity(&self) -> QuakeIntensity {
        self.intensity
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tick(&mut self, dt: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed += dt.max(0.0);
        if self.chimney_pose() == ChimneyPose::Toppled {
            self.cracked = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.intensity.duration()
    }

    /// The house has cracked once the chimney came down; it stays cracked.
    pub fn is_cracked(&self) -> bool {
        self.cracked
    }

    /// Sideways (X) displacement of everything standing on the ground.
    pub fn shake_offset(&self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }
        self.intensity.amplitude() * (0.4 * PI * self.elapsed).sin()
    }

    pub fn chimney_pose(&self) -> ChimneyPose {
        let t = self.elapsed;
        match self.intensity {
            QuakeIntensity::Small => ChimneyPose::Wobbling(PI / 16.0 * (-0.4 * PI * t).sin()),
            QuakeIntensity::Large if t < WOBBLE_END => {
                ChimneyPose::Wobbling(PI / 12.0 * (-0.4 * PI * t).sin())
            }
            QuakeIntensity::Large if t < FALL_END => ChimneyPose::Falling(-0.89 * (t - 6.65)),
            QuakeIntensity::Large => ChimneyPose::Toppled,
        }
    }

    /// Chimney placement in house space, shake included.
    pub fn chimney_transform(&self) -> Mat4 {
        let shake = Mat4::from_translation(Vec3::new(self.shake_offset(), 0.0, 0.0));
        shake * chimney_transform_for(self.chimney_pose(), self.elapsed)
    }
}

/// Chimney placement in house space for a pose; `t` drives the fall arc.
pub fn chimney_transform_for(pose: ChimneyPose, t: f32) -> Mat4 {
    match pose {
        ChimneyPose::Wobbling(angle) => {
            Mat4::from_translation(CHIMNEY_BASE)
                * Mat4::from_rotation_z(angle)
                * Mat4::from_scale(CHIMNEY_SCALE)
        }
        ChimneyPose::Falling(drop) => {
            let slide = 0.333 * (t - 6.25);
            Mat4::from_translation(CHIMNEY_BASE + Vec3::new(slide, drop, 0.0))
                * Mat4::from_rotation_z(PI * (6.75 - t) / 6.6)
                * Mat4::from_scale(CHIMNEY_SCALE)
        }
        ChimneyPose::Toppled => {
            Mat4::from_translation(Vec3::new(CHIMNEY_BASE.x + 1.0, -0.75, CHIMNEY_BASE.z))
                * Mat4::from_rotation_z(PI / 2.0)
                * Mat4::from_scale(CHIMNEY_SCALE)
        }
    }
}

/// Resting chimney, no quake.
pub fn chimney_rest_transform() -> Mat4 {
    chimney_transform_for(ChimneyPose::Wobbling(0.0), 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyTarget {
    Night,
    Day,
}

impl SkyTarget {
    fn ambient(self) -> f32 {
        match self {
            SkyTarget::Night => 0.0,
            SkyTarget::Day => 1.0,
        }
    }
}

/// Ambient ramp between night and day.
#[derive(Debug, Clone)]
pub struct SkyFade {
    target: SkyTarget,
    elapsed: f32,
}

impl SkyFade {
    pub const DURATION: f32 = 10.0;

    /// Settled on `target`.
    pub fn new(target: SkyTarget) -> Self {
        Self {
            target,
            elapsed: Self::DURATION,
        }
    }

    /// Start fading toward `target`. Refused while a fade is running or when
    /// the sky is already there.
    pub fn request(&mut self, target: SkyTarget) -> bool {
        if !self.is_finished() || target == self.target {
            return false;
        }
        self.target = target;
        self.elapsed = 0.0;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(Self::DURATION);
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= Self::DURATION
    }

    pub fn target(&self) -> SkyTarget {
        self.target
    }

    /// Current ambient level, 0 at night and 1 in daylight.
    pub fn ambient(&self) -> f32 {
        let progress = self.elapsed / Self::DURATION;
        let from = 1.0 - self.target.ambient();
        from + (self.target.ambient() - from) * progress
    }
}

impl Default for SkyFade {
    fn default() -> Self {
        Self::new(SkyTarget::Day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(quake: &mut Earthquake, until: f32) {
        while quake.elapsed() < until && !quake.is_finished() {
            quake.tick(0.05);
        }
    }

    #[test]
    fn small_quake_only_wobbles() {
        let mut quake = Earthquake::new(QuakeIntensity::Small);
        run(&mut quake, 9.0);
        assert!(matches!(quake.chimney_pose(), ChimneyPose::Wobbling(a) if a.abs() <= PI / 16.0));
        assert!(quake.shake_offset().abs() <= 0.25);
        run(&mut quake, 20.0);
        assert!(quake.is_finished());
        assert!(!quake.is_cracked());
        assert_eq!(quake.shake_offset(), 0.0);
    }

    #[test]
    fn large_quake_timeline() {
        let mut quake = Earthquake::new(QuakeIntensity::Large);
        run(&mut quake, 3.0);
        assert!(matches!(quake.chimney_pose(), ChimneyPose::Wobbling(_)));

        run(&mut quake, 8.0);
        match quake.chimney_pose() {
            ChimneyPose::Falling(drop) => {
                let expected = -0.89 * (quake.elapsed() - 6.65);
                assert!((drop - expected).abs() < 1e-5);
            }
            other => panic!("expected falling, got {:?}", other),
        }
        assert!(!quake.is_cracked());

        run(&mut quake, 10.0);
        assert_eq!(quake.chimney_pose(), ChimneyPose::Toppled);
        assert!(quake.is_cracked());

        run(&mut quake, 30.0);
        assert!(quake.is_finished());
        assert!(quake.elapsed() < 15.1);
        assert!(quake.is_cracked());
    }

    #[test]
    fn shake_follows_sine() {
        let mut quake = Earthquake::new(QuakeIntensity::Large);
        quake.tick(1.25);
        // sin(0.4π · 1.25) = sin(π/2) = 1.
        assert!((quake.shake_offset() - 0.5).abs() < 1e-5);
        let x = quake.chimney_transform().w_axis.x;
        assert!((x - (CHIMNEY_BASE.x + 0.5)).abs() < 1e-4);
    }

    #[test]
    fn toppled_chimney_lies_beside_house() {
        let lying = chimney_transform_for(ChimneyPose::Toppled, 12.0);
        let standing = chimney_rest_transform();
        assert!(lying.w_axis.y < standing.w_axis.y);
        assert!(lying.w_axis.x > standing.w_axis.x);
    }

    #[test]
    fn sky_fade_ramps_and_rejects_overlap() {
        let mut sky = SkyFade::default();
        assert_eq!(sky.ambient(), 1.0);
        assert!(!sky.request(SkyTarget::Day));

        assert!(sky.request(SkyTarget::Night));
        sky.tick(5.0);
        assert!((sky.ambient() - 0.5).abs() < 1e-5);
        assert!(!sky.request(SkyTarget::Day));
        assert_eq!(sky.target(), SkyTarget::Night);

        sky.tick(6.0);
        assert!(sky.is_finished());
        assert_eq!(sky.ambient(), 0.0);
        assert!(sky.request(SkyTarget::Day));
        sky.tick(2.5);
        assert!((sky.ambient() - 0.25).abs() < 1e-5);
    }
}
