//! Mouse rays and ground-plane picking.

use engine_core::{Mat4, Vec2, Vec3, Vec4};

/// A pick ray through the cursor, as near/far world points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseRay {
    pub near: Vec3,
    pub far: Vec3,
}

impl MouseRay {
    /// Unproject a normalized device coordinate through `inverse(P * V)`.
    pub fn from_ndc(ndc: Vec2, view: Mat4, projection: Mat4) -> Self {
        let ndc_to_world = (projection * view).inverse();
        let unproject = |depth: f32| {
            let p = ndc_to_world * Vec4::new(ndc.x, ndc.y, depth, 1.0);
            p.truncate() / p.w
        };
        Self {
            near: unproject(-1.0),
            far: unproject(1.0),
        }
    }

    /// Far minus near, normalized (zero for a degenerate ray).
    pub fn direction(&self) -> Vec3 {
        (self.far - self.near).normalize_or_zero()
    }
}

/// Where a ray from `origin` along `ray_direction` meets the horizontal plane
/// `y = plane_height`.
///
/// Returns `origin` unchanged for a centered ray (`ray_direction.x == 0`) and
/// for planes behind the origin.
pub fn pick_ground_point(origin: Vec3, ray_direction: Vec3, plane_height: f32) -> Vec3 {
    if ray_direction.x == 0.0 {
        return origin;
    }
    let t = (plane_height - origin.y) / ray_direction.y;
    if t < 0.0 {
        return origin;
    }
    Vec3::new(
        origin.x + ray_direction.x * t,
        plane_height,
        origin.z + ray_direction.z * t,
    )
}
