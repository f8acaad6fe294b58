//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3, Vec4};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Origin of the transform as a homogeneous point (x, y, z, 1).
    pub fn origin(&self) -> Vec4 {
        self.position.extend(1.0)
    }

    /// Translate the transform by a world-space delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Translate along the transform's own axes (rotation applied first).
    pub fn translate_local(&mut self, delta: Vec3) {
        self.position += self.rotation * delta;
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }

    /// Transform a point given in this transform's local frame to world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(local)
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<Mat4> for TransformRaw {
    fn from(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self::from(transform.to_matrix())
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}
