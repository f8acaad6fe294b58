//! Axis-aligned obstacle footprints and the overlap tests built on them.

use engine_core::{Mat4, Vec3};

/// Axis-aligned bounding rectangle of an obstacle in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub max_x: f32,
    pub min_x: f32,
    pub max_z: f32,
    pub min_z: f32,
}

impl Footprint {
    pub fn new(max_x: f32, min_x: f32, max_z: f32, min_z: f32) -> Self {
        Self {
            max_x,
            min_x,
            max_z,
            min_z,
        }
    }

    /// Inverted bounds that contain nothing; any point extends them.
    pub const EMPTY: Footprint = Footprint {
        max_x: f32::NEG_INFINITY,
        min_x: f32::INFINITY,
        max_z: f32::NEG_INFINITY,
        min_z: f32::INFINITY,
    };

    /// Grow the rectangle to cover a point.
    pub fn include(&mut self, point: Vec3) {
        self.max_x = self.max_x.max(point.x);
        self.min_x = self.min_x.min(point.x);
        self.max_z = self.max_z.max(point.z);
        self.min_z = self.min_z.min(point.z);
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.max_x + self.min_x) * 0.5,
            0.0,
            (self.max_z + self.min_z) * 0.5,
        )
    }
}

/// Transform every vertex by `placement` and reduce to XZ extrema.
///
/// An empty vertex list gives [`Footprint::EMPTY`], which nothing overlaps.
pub fn compute_footprint(positions: &[Vec3], placement: Mat4) -> Footprint {
    positions.iter().fold(Footprint::EMPTY, |mut fp, &p| {
        fp.include(placement.transform_point3(p));
        fp
    })
}

/// Strict containment of `point` in `footprint`, shrunk by a per-axis leeway
/// on the point's side: `x + lx < max_x`, `x - lx > min_x`, same for z.
pub fn point_in_box(point: Vec3, footprint: &Footprint, leeway_x: f32, leeway_z: f32) -> bool {
    point.x + leeway_x < footprint.max_x
        && point.x - leeway_x > footprint.min_x
        && point.z + leeway_z < footprint.max_z
        && point.z - leeway_z > footprint.min_z
}

/// True when the point lies farther than `radius` from the vertical axis
/// through the origin.
pub fn outside_play_radius(point: Vec3, radius: f32) -> bool {
    (point.x * point.x + point.z * point.z).sqrt() > radius
}

/// Squared distance between two points, ignoring height.
pub fn xz_distance_squared(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}
