use crate::core::{coord::Coordinate, rng::Rng};

use super::PdfT;

/// Cosine-weighted hemisphere about a surface normal, density
/// `max(0, cos theta) / pi`.
pub struct CosinePdf {
    coord: Coordinate,
}

impl CosinePdf {
    pub fn new(normal: glam::Vec3A) -> Self {
        Self {
            coord: Coordinate::from_z(normal),
        }
    }
}

impl PdfT for CosinePdf {
    fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        self.coord.to_world(rng.cosine_weighted_on_hemisphere())
    }

    fn value(&self, direction: glam::Vec3A) -> f32 {
        let cos_theta = self.coord.to_local(direction.normalize()).z;
        (cos_theta * std::f32::consts::FRAC_1_PI).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integrating the density over the sphere with uniform directions should
    // give 1 for any proper pdf.
    #[test]
    fn density_integrates_to_one() {
        let pdf = CosinePdf::new(glam::Vec3A::new(0.2, 0.9, -0.1).normalize());
        let mut rng = Rng::from_seed(17);

        let n = 200_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let dir = rng.uniform_on_sphere();
            sum += pdf.value(dir) as f64 * 4.0 * std::f64::consts::PI;
        }
        let integral = sum / n as f64;
        assert!(
            (integral - 1.0).abs() < 0.02,
            "cosine pdf integral = {}",
            integral
        );
    }

    #[test]
    fn generated_directions_have_positive_density() {
        let normal = glam::Vec3A::Y;
        let pdf = CosinePdf::new(normal);
        let mut rng = Rng::from_seed(23);
        for _ in 0..1000 {
            let dir = pdf.generate(&mut rng);
            assert!(dir.dot(normal) >= 0.0);
            assert!(pdf.value(dir) >= 0.0);
        }
    }
}
