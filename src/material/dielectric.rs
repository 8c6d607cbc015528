use crate::core::{
    color::Color, intersection::Intersection, loader::InputParams, ray::Ray, rng::Rng,
};

use super::{util, MaterialT, Scatter};

pub struct Dielectric {
    ior: f32,
}

impl Dielectric {
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let ior = params.get_float("ior")?;
        Ok(Self::new(ior))
    }
}

impl MaterialT for Dielectric {
    fn scatter(&self, ray: &Ray, inter: &Intersection, rng: &mut Rng) -> Option<Scatter> {
        let normal = inter.face_normal(ray);
        let ni_over_nt = if inter.is_front_face(ray) {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit = ray.direction.normalize();
        let cos_theta = (-unit).dot(normal).min(1.0);

        // total internal reflection falls back to the mirror branch
        let direction = match util::refract(unit, normal, ni_over_nt) {
            Some(refracted) if util::schlick(cos_theta, ni_over_nt) <= rng.uniform_1d() => {
                refracted
            }
            _ => util::reflect(unit, normal),
        };

        Some(Scatter::Specular {
            ray: Ray::new(inter.position, direction),
            attenuation: Color::WHITE,
        })
    }
}
