use crate::core::ray::Ray;
use crate::core::scene::MaterialId;

/// Result of a successful intersection query. Stack-scoped; `t` doubles as
/// the running upper bound while an aggregate query narrows the nearest hit.
pub struct Intersection {
    pub t: f32,
    pub position: glam::Vec3A,
    pub normal: glam::Vec3A,
    pub texcoords: glam::Vec2,
    pub material: Option<MaterialId>,
}

impl Default for Intersection {
    fn default() -> Self {
        Self {
            t: f32::MAX,
            position: glam::Vec3A::ZERO,
            normal: glam::Vec3A::Y,
            texcoords: glam::Vec2::ZERO,
            material: None,
        }
    }
}

impl Intersection {
    /// Geometric normal flipped to the side the ray came from.
    pub fn face_normal(&self, ray: &Ray) -> glam::Vec3A {
        if ray.direction.dot(self.normal) < 0.0 {
            self.normal
        } else {
            -self.normal
        }
    }

    pub fn is_front_face(&self, ray: &Ray) -> bool {
        ray.direction.dot(self.normal) < 0.0
    }
}
