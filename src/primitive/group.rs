use crate::core::{bbox::Bbox, intersection::Intersection, ray::Ray, rng::Rng};

use super::{Primitive, PrimitiveT};

/// Linear-scan aggregate. Doubles as the scene's designated light list and
/// as the brute-force reference the BVH is checked against.
#[derive(Clone, Default)]
pub struct PrimitiveList {
    primitives: Vec<Primitive>,
}

impl PrimitiveList {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }
}

impl PrimitiveT for PrimitiveList {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection) -> bool {
        let mut result = false;
        for primitive in &self.primitives {
            result |= primitive.intersect(ray, inter);
        }
        result
    }

    fn bounding_box(&self) -> Option<Bbox> {
        let mut bbox = Bbox::empty();
        for primitive in &self.primitives {
            bbox = bbox.merge(primitive.bounding_box()?);
        }
        Some(bbox)
    }

    fn pdf_value(&self, origin: glam::Vec3A, direction: glam::Vec3A) -> f32 {
        if self.primitives.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .primitives
            .iter()
            .map(|p| p.pdf_value(origin, direction))
            .sum();
        sum / self.primitives.len() as f32
    }

    fn random(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        if self.primitives.is_empty() {
            return glam::Vec3A::X;
        }
        let index = rng.uniform_1d() * self.primitives.len() as f32;
        let index = (index as usize).min(self.primitives.len() - 1);
        self.primitives[index].random(origin, rng)
    }
}
