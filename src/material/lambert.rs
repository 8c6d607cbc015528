use std::collections::HashMap;

use crate::core::{intersection::Intersection, loader::InputParams, ray::Ray, rng::Rng};
use crate::pdf::CosinePdf;
use crate::texture::{Texture, TextureT};

use super::{MaterialT, Scatter};

pub struct Lambertian {
    albedo: Texture,
}

impl Lambertian {
    pub fn new(albedo: Texture) -> Self {
        Self { albedo }
    }

    pub fn load(
        params: &mut InputParams,
        textures: &HashMap<String, Texture>,
    ) -> anyhow::Result<Self> {
        let albedo = super::resolve_texture(params, "albedo", textures)?;
        Ok(Self::new(albedo))
    }
}

impl MaterialT for Lambertian {
    fn scatter(&self, ray: &Ray, inter: &Intersection, _rng: &mut Rng) -> Option<Scatter> {
        Some(Scatter::Diffuse {
            attenuation: self.albedo.color_at(inter),
            pdf: CosinePdf::new(inter.face_normal(ray)).into(),
        })
    }

    // Same density the sampler above reports; the two must not drift apart.
    fn scattering_pdf(&self, ray: &Ray, inter: &Intersection, direction: glam::Vec3A) -> f32 {
        let cos_theta = inter.face_normal(ray).dot(direction.normalize());
        (cos_theta * std::f32::consts::FRAC_1_PI).max(0.0)
    }
}
