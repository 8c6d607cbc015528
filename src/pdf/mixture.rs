use crate::core::rng::Rng;

use super::{Pdf, PdfT};

/// 50/50 blend of two samplers. The density is always the arithmetic mean of
/// both sub-densities, never the density of only the branch that was drawn;
/// anything else biases the estimator.
pub struct MixturePdf<'a> {
    a: Box<Pdf<'a>>,
    b: Box<Pdf<'a>>,
}

impl<'a> MixturePdf<'a> {
    pub fn new(a: Pdf<'a>, b: Pdf<'a>) -> Self {
        Self {
            a: Box::new(a),
            b: Box::new(b),
        }
    }
}

impl PdfT for MixturePdf<'_> {
    fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        if rng.uniform_1d() < 0.5 {
            self.a.generate(rng)
        } else {
            self.b.generate(rng)
        }
    }

    fn value(&self, direction: glam::Vec3A) -> f32 {
        0.5 * (self.a.value(direction) + self.b.value(direction))
    }
}
