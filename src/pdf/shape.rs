use crate::core::rng::Rng;
use crate::primitive::{PrimitiveList, PrimitiveT};

use super::PdfT;

/// Importance-samples directions from a fixed origin toward a set of
/// primitives, typically the scene's designated lights.
pub struct ShapePdf<'a> {
    origin: glam::Vec3A,
    shapes: &'a PrimitiveList,
}

impl<'a> ShapePdf<'a> {
    pub fn new(origin: glam::Vec3A, shapes: &'a PrimitiveList) -> Self {
        Self { origin, shapes }
    }
}

impl PdfT for ShapePdf<'_> {
    fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        self.shapes.random(self.origin, rng)
    }

    fn value(&self, direction: glam::Vec3A) -> f32 {
        self.shapes.pdf_value(self.origin, direction)
    }
}
