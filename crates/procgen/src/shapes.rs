//! Static scene shapes: the house, the volcano, the actors.
//!
//! Only their vertices matter to gameplay (collision footprints); the
//! renderer gets the same data for drawing.

use engine_core::{Mat4, MeshData, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Placement of the triangular roof prism on top of a unit block.
pub fn roof_transform() -> Mat4 {
    Mat4::from_scale(Vec3::new(1.5, 1.0, 2.0))
        * Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0))
        * Mat4::from_rotation_z(FRAC_PI_2)
        * Mat4::from_scale(Vec3::new(1.0, 1.16, 2.0))
        * Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0))
}

/// A block with a gabled roof.
pub fn block_with_roof() -> MeshData {
    MeshData::default()
        .with_transformed(&MeshData::cube(), Mat4::from_scale(Vec3::new(1.5, 1.0, 2.0)))
        .with_transformed(&MeshData::prism(3), roof_transform())
}

/// Main block plus two smaller wings.
pub fn house() -> MeshData {
    let wing = block_with_roof();
    MeshData::default()
        .with_transformed(&wing, Mat4::IDENTITY)
        .with_transformed(
            &wing,
            Mat4::from_translation(Vec3::new(0.75, -0.5, 3.0))
                * Mat4::from_scale(Vec3::new(1.5, 0.5, 0.5)),
        )
        .with_transformed(
            &wing,
            Mat4::from_rotation_y(FRAC_PI_2)
                * Mat4::from_scale(Vec3::new(1.5, 0.5, 0.7))
                * Mat4::from_translation(Vec3::new(0.0, -1.0, 3.0)),
        )
}

/// Truncated cone: base radius 1 at y = 0, crater radius 0.2 at y = 1.
pub fn volcano(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut positions = Vec::with_capacity(segments as usize * 2);
    for (radius, y) in [(1.0_f32, 0.0_f32), (0.2, 1.0)] {
        for i in 0..segments {
            let angle = i as f32 / segments as f32 * TAU;
            positions.push(Vec3::new(angle.cos() * radius, y, angle.sin() * radius));
        }
    }

    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let next = (i + 1) % segments;
        let (a, b, c, d) = (i, next, segments + next, segments + i);
        indices.extend_from_slice(&[a, d, b, b, d, c]);
    }

    MeshData::new(positions, indices)
}

/// Flying saucer with four pods.
pub fn alien() -> MeshData {
    let hull = Mat4::from_quat(Quat::from_rotation_x(FRAC_PI_2))
        * Mat4::from_scale(Vec3::new(1.0, 1.0, 0.7));
    let mut mesh = MeshData::default().with_transformed(&MeshData::prism(8), hull);
    for (x, z) in [(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
        mesh.insert_transformed(
            &MeshData::cube(),
            Mat4::from_translation(Vec3::new(x, 0.0, z)) * Mat4::from_scale(Vec3::new(0.5, 0.3, 0.5)),
        );
    }
    mesh
}

/// Block body with a head on top.
pub fn player_figure() -> MeshData {
    MeshData::default()
        .with_transformed(&MeshData::cube(), Mat4::from_scale(Vec3::new(0.35, 0.5, 0.25)))
        .with_transformed(
            &MeshData::cube(),
            Mat4::from_translation(Vec3::new(0.0, 0.85, 0.0))
                * Mat4::from_scale(Vec3::new(0.35, 0.35, 0.25)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_extents_cover_all_wings() {
        let (lo, hi) = house().bounds().unwrap();
        // Main block spans x -1.5..1.5; the side wing reaches past z = 3.
        assert!(lo.x <= -1.5 && hi.x >= 1.5);
        assert!(lo.z <= -2.0 && hi.z > 3.0);
        assert!(hi.y > 1.0, "roof should rise above the block");
    }

    #[test]
    fn volcano_base_is_unit_radius() {
        let (lo, hi) = volcano(16).bounds().unwrap();
        assert!((lo.x + 1.0).abs() < 1e-5 && (hi.x - 1.0).abs() < 1e-5);
        assert_eq!(lo.y, 0.0);
        assert_eq!(hi.y, 1.0);
    }

    #[test]
    fn shape_indices_are_valid() {
        for mesh in [house(), volcano(8), alien(), player_figure()] {
            assert_eq!(mesh.indices.len() % 3, 0);
            assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
        }
    }
}
