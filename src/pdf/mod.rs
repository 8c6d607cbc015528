mod cosine;
mod mixture;
mod shape;

pub use cosine::*;
pub use mixture::*;
pub use shape::*;

use crate::core::rng::Rng;

/// Directional sampler: draw a direction, or evaluate the density it claims
/// at a given direction. Densities integrate to 1 over the sampler's solid
/// angle measure; the estimator is biased otherwise.
pub trait PdfT {
    fn generate(&self, rng: &mut Rng) -> glam::Vec3A;

    fn value(&self, direction: glam::Vec3A) -> f32;
}

/// The `Shape` variant borrows the scene's light list, so the enum is
/// matched by hand instead of enum-dispatched.
pub enum Pdf<'a> {
    Cosine(CosinePdf),
    Shape(ShapePdf<'a>),
    Mixture(MixturePdf<'a>),
}

impl PdfT for Pdf<'_> {
    fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        match self {
            Pdf::Cosine(pdf) => pdf.generate(rng),
            Pdf::Shape(pdf) => pdf.generate(rng),
            Pdf::Mixture(pdf) => pdf.generate(rng),
        }
    }

    fn value(&self, direction: glam::Vec3A) -> f32 {
        match self {
            Pdf::Cosine(pdf) => pdf.value(direction),
            Pdf::Shape(pdf) => pdf.value(direction),
            Pdf::Mixture(pdf) => pdf.value(direction),
        }
    }
}

impl From<CosinePdf> for Pdf<'_> {
    fn from(pdf: CosinePdf) -> Self {
        Pdf::Cosine(pdf)
    }
}

impl<'a> From<ShapePdf<'a>> for Pdf<'a> {
    fn from(pdf: ShapePdf<'a>) -> Self {
        Pdf::Shape(pdf)
    }
}

impl<'a> From<MixturePdf<'a>> for Pdf<'a> {
    fn from(pdf: MixturePdf<'a>) -> Self {
        Pdf::Mixture(pdf)
    }
}
