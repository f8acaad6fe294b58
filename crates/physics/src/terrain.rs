//! Terrain height sampling on a triangulated heightfield.
//!
//! The island mesh is reduced once to the triangles that sit above sea level.
//! Every frame the player's (x, z) is located inside one of them with an
//! area-sum containment test, and the height is read off that triangle's plane.

use engine_core::{Shape, Vec3};
use thiserror::Error;

/// Number of surfaces scanned per lookup unless configured otherwise.
pub const DEFAULT_SCAN_CAP: usize = 230;

/// Absolute area slack for points that sit on a triangle edge.
pub const CONTAINMENT_TOLERANCE: f32 = 0.05;

/// Errors raised while turning a mesh into a surface set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    #[error("index buffer length {0} is not a multiple of three")]
    RaggedIndices(usize),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// A world-space terrain triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl Triangle {
    /// Returned by [`find_surface`] when nothing contains the query point.
    pub const SENTINEL: Triangle = Triangle {
        p1: Vec3::new(-1.0, -1.0, -1.0),
        p2: Vec3::new(-1.0, -1.0, -1.0),
        p3: Vec3::new(-1.0, -1.0, -1.0),
    };

    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    /// All three vertices strictly above the horizon.
    fn is_land(&self) -> bool {
        self.p1.y > 0.0 && self.p2.y > 0.0 && self.p3.y > 0.0
    }
}

/// Unsigned area of the XZ projection of (a, b, c).
fn area_xz(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    ((a.x * (b.z - c.z) + b.x * (c.z - a.z) + c.x * (a.z - b.z)) / 2.0).abs()
}

/// Whether (x, z) falls inside the triangle's XZ projection.
///
/// The three sub-triangles formed with the query point cover the triangle
/// exactly when the point is inside; outside, their areas overshoot.
pub fn is_inside(triangle: &Triangle, x: f32, z: f32) -> bool {
    let p = Vec3::new(x, 0.0, z);
    let whole = area_xz(triangle.p1, triangle.p2, triangle.p3);
    let parts = area_xz(p, triangle.p2, triangle.p3)
        + area_xz(triangle.p1, p, triangle.p3)
        + area_xz(triangle.p1, triangle.p2, p);
    (whole - parts).abs() < CONTAINMENT_TOLERANCE
}

/// Height of the triangle's plane at (x, z).
///
/// Solves `ax + by + cz + d = 0` for y. The division by `b` is not guarded:
/// near-vertical triangles (and the sentinel) give huge or non-finite values.
pub fn height_at(triangle: &Triangle, x: f32, z: f32) -> f32 {
    let normal = (triangle.p2 - triangle.p1).cross(triangle.p3 - triangle.p1);
    let d = -normal.dot(triangle.p1);
    -(normal.x * x + normal.z * z + d) / normal.y
}

/// Walkable triangles of a level, in mesh order.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSet {
    triangles: Vec<Triangle>,
    scan_cap: usize,
}

impl SurfaceSet {
    /// Scale the mesh uniformly and keep the triangles that are entirely
    /// above Y = 0.
    pub fn build(vertices: &[Vec3], indices: &[u32], scale: f32) -> Result<Self, TerrainError> {
        if indices.len() % 3 != 0 {
            return Err(TerrainError::RaggedIndices(indices.len()));
        }

        let vertex = |index: u32| -> Result<Vec3, TerrainError> {
            vertices
                .get(index as usize)
                .map(|&v| v * scale)
                .ok_or(TerrainError::IndexOutOfRange {
                    index,
                    vertex_count: vertices.len(),
                })
        };

        let mut triangles = Vec::with_capacity(indices.len() / 3);
        for tri in indices.chunks_exact(3) {
            let triangle = Triangle::new(vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?);
            if triangle.is_land() {
                triangles.push(triangle);
            }
        }

        log::debug!(
            "Surface set: kept {} of {} triangles",
            triangles.len(),
            indices.len() / 3
        );

        Ok(Self {
            triangles,
            scan_cap: DEFAULT_SCAN_CAP,
        })
    }

    /// Build from any shape's vertex and index buffers.
    pub fn from_shape(shape: &impl Shape, scale: f32) -> Result<Self, TerrainError> {
        Self::build(shape.positions(), shape.indices(), scale)
    }

    /// Override how many surfaces a lookup may scan.
    pub fn with_scan_cap(mut self, scan_cap: usize) -> Self {
        self.scan_cap = scan_cap;
        self
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Ground height under (x, z), or `None` off the scanned surfaces.
    pub fn ground_height(&self, x: f32, z: f32) -> Option<f32> {
        find_surface_checked(self, x, z).map(|t| height_at(&t, x, z))
    }
}

/// First scanned surface containing (x, z).
pub fn find_surface_checked(surfaces: &SurfaceSet, x: f32, z: f32) -> Option<Triangle> {
    let scan = surfaces.triangles.len().min(surfaces.scan_cap);
    surfaces.triangles[..scan]
        .iter()
        .find(|t| is_inside(t, x, z))
        .copied()
}

/// Like [`find_surface_checked`], but a miss yields [`Triangle::SENTINEL`].
pub fn find_surface(surfaces: &SurfaceSet, x: f32, z: f32) -> Triangle {
    find_surface_checked(surfaces, x, z).unwrap_or(Triangle::SENTINEL)
}
