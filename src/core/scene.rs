use crate::camera::Camera;
use crate::core::color::Color;
use crate::material::Material;
use crate::primitive::{Bvh, PrimitiveList};

/// Handle into the scene's material arena. Hit records carry this instead of
/// an owning pointer; the arena outlives the whole render.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MaterialId(pub(crate) usize);

pub struct Scene {
    materials: Vec<Material>,
    aggregate: Bvh,
    lights: PrimitiveList,
    background: Color,
    camera: Camera,
}

impl Scene {
    pub fn new(
        materials: Vec<Material>,
        aggregate: Bvh,
        lights: PrimitiveList,
        background: Color,
        camera: Camera,
    ) -> Self {
        Self {
            materials,
            aggregate,
            lights,
            background,
            camera,
        }
    }

    pub fn aggregate(&self) -> &Bvh {
        &self.aggregate
    }

    pub fn lights(&self) -> &PrimitiveList {
        &self.lights
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}
