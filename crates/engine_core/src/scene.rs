//! The drawing surface the gameplay code talks to.
//!
//! The renderer is a collaborator: gameplay only sets the camera and lights
//! and asks for "this mesh, with this transform, in this material".

use glam::{Mat4, Vec3, Vec4};

use crate::TransformRaw;

/// Phong-style surface parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 4],
    pub ambient: f32,
    pub diffusivity: f32,
    pub specularity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            ambient: 0.2,
            diffusivity: 0.5,
            specularity: 0.5,
        }
    }
}

impl Material {
    /// Material from a packed `0xRRGGBB` color.
    pub fn from_hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Self {
            color: [channel(16), channel(8), channel(0), 1.0],
            ..Default::default()
        }
    }

    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffusivity(mut self, diffusivity: f32) -> Self {
        self.diffusivity = diffusivity;
        self
    }

    pub fn with_specularity(mut self, specularity: f32) -> Self {
        self.specularity = specularity;
        self
    }
}

/// Point light (w = 1) or directional light (w = 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec4,
    pub color: [f32; 4],
    pub size: f32,
}

/// View and projection for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub view: Mat4,
    pub projection: Mat4,
}

impl CameraState {
    /// Right-handed look-at camera with a perspective projection.
    pub fn look_at(eye: Vec3, target: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            view: Mat4::look_at_rh(eye, target, Vec3::Y),
            projection: Mat4::perspective_rh_gl(fov_y, aspect, near, far),
        }
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh_id: u32,
    pub model: TransformRaw,
    pub material: Material,
}

/// Anything that can receive a frame's worth of drawing.
pub trait SceneSink {
    fn set_camera(&mut self, camera: CameraState);
    fn set_lights(&mut self, lights: &[Light]);
    fn draw(&mut self, mesh_id: u32, model: Mat4, material: &Material);
}

/// Sink that records everything it is given; the renderer drains it.
#[derive(Debug, Default)]
pub struct DrawList {
    pub camera: Option<CameraState>,
    pub lights: Vec<Light>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame.
    pub fn clear(&mut self) {
        self.camera = None;
        self.lights.clear();
        self.commands.clear();
    }

    /// Draw calls issued for a given mesh.
    pub fn count_mesh(&self, mesh_id: u32) -> usize {
        self.commands.iter().filter(|c| c.mesh_id == mesh_id).count()
    }
}

impl SceneSink for DrawList {
    fn set_camera(&mut self, camera: CameraState) {
        self.camera = Some(camera);
    }

    fn set_lights(&mut self, lights: &[Light]) {
        self.lights.clear();
        self.lights.extend_from_slice(lights);
    }

    fn draw(&mut self, mesh_id: u32, model: Mat4, material: &Material) {
        self.commands.push(DrawCommand {
            mesh_id,
            model: TransformRaw::from(model),
            material: *material,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_from_hex_splits_channels() {
        let m = Material::from_hex(0xff8000);
        assert_eq!(m.color[0], 1.0);
        assert!((m.color[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(m.color[2], 0.0);
    }

    #[test]
    fn draw_list_records_and_clears() {
        let mut list = DrawList::new();
        list.set_lights(&[Light {
            position: Vec4::new(10.0, 10.0, 10.0, 1.0),
            color: [1.0; 4],
            size: 10_000.0,
        }]);
        list.draw(3, Mat4::IDENTITY, &Material::default());
        list.draw(3, Mat4::from_translation(Vec3::X), &Material::default());
        assert_eq!(list.count_mesh(3), 2);
        assert_eq!(list.lights.len(), 1);
        list.clear();
        assert!(list.commands.is_empty());
        assert!(list.camera.is_none());
    }
}
