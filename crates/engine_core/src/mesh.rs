//! Mesh data structures and primitive generation.
//!
//! Gameplay code never touches GPU buffers; it only needs vertex positions
//! and the triangle index buffer of a shape, which is what `Shape` exposes.

use glam::{Mat4, Vec3};

/// Capability shared by every static shape: positions plus a triangle list.
pub trait Shape {
    /// Vertex positions in the shape's local frame.
    fn positions(&self) -> &[Vec3];
    /// Triangle list indices into `positions`.
    fn indices(&self) -> &[u32];

    /// Number of triangles in the index buffer.
    fn triangle_count(&self) -> usize {
        self.indices().len() / 3
    }
}

/// CPU-side mesh: vertex positions and triangle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Shape for MeshData {
    fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Axis-aligned cube spanning -1..1 on every axis.
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 2, 3, 0,       // Front
            5, 4, 7, 7, 6, 5,       // Back
            3, 2, 6, 6, 7, 3,       // Top
            4, 5, 1, 1, 0, 4,       // Bottom
            1, 5, 6, 6, 2, 1,       // Right
            4, 0, 3, 3, 7, 4,       // Left
        ];

        Self { positions, indices }
    }

    /// Closed prism along Z (depth 1, centered) with a regular polygon of
    /// `sides` sides and unit circumradius as its cross-section.
    pub fn prism(sides: u32) -> Self {
        let sides = sides.max(3);
        let mut positions = Vec::with_capacity(sides as usize * 2);
        for z in [0.5_f32, -0.5] {
            for i in 0..sides {
                let angle = i as f32 / sides as f32 * std::f32::consts::TAU;
                positions.push(Vec3::new(angle.cos(), angle.sin(), z));
            }
        }

        let mut indices = Vec::new();
        // Side walls
        for i in 0..sides {
            let next = (i + 1) % sides;
            let (a, b, c, d) = (i, next, sides + next, sides + i);
            indices.extend_from_slice(&[a, d, b, b, d, c]);
        }
        // End caps as fans
        for i in 1..sides - 1 {
            indices.extend_from_slice(&[0, i, i + 1]);
            indices.extend_from_slice(&[sides, sides + i + 1, sides + i]);
        }

        Self { positions, indices }
    }

    /// Append a copy of `other` with every vertex transformed by `transform`.
    pub fn insert_transformed(&mut self, other: &impl Shape, transform: Mat4) {
        let base = self.positions.len() as u32;
        self.positions
            .extend(other.positions().iter().map(|&p| transform.transform_point3(p)));
        self.indices.extend(other.indices().iter().map(|&i| i + base));
    }

    /// Builder-style variant of `insert_transformed`.
    pub fn with_transformed(mut self, other: &impl Shape, transform: Mat4) -> Self {
        self.insert_transformed(other, transform);
        self
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_triangles() {
        let cube = MeshData::cube();
        assert_eq!(cube.positions().len(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices().iter().all(|&i| (i as usize) < cube.positions.len()));
    }

    #[test]
    fn prism_indices_stay_in_range() {
        let prism = MeshData::prism(3);
        assert_eq!(prism.positions.len(), 6);
        // 3 walls * 2 + 2 caps
        assert_eq!(prism.triangle_count(), 8);
        assert!(prism.indices.iter().all(|&i| (i as usize) < prism.positions.len()));
    }

    #[test]
    fn insert_transformed_offsets_indices() {
        let cube = MeshData::cube();
        let mut mesh = MeshData::cube();
        mesh.insert_transformed(&cube, Mat4::from_translation(Vec3::X * 10.0));
        assert_eq!(mesh.positions.len(), 16);
        assert_eq!(mesh.indices[cube.indices.len()], cube.indices[0] + 8);
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo.x, -1.0);
        assert_eq!(hi.x, 11.0);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(MeshData::default().bounds().is_none());
    }
}
