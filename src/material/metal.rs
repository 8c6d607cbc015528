use std::collections::HashMap;

use crate::core::{intersection::Intersection, loader::InputParams, ray::Ray, rng::Rng};
use crate::texture::{Texture, TextureT};

use super::{util, MaterialT, Scatter};

pub struct Metal {
    albedo: Texture,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Texture, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    pub fn load(
        params: &mut InputParams,
        textures: &HashMap<String, Texture>,
    ) -> anyhow::Result<Self> {
        let albedo = super::resolve_texture(params, "albedo", textures)?;
        let fuzz = params.get_float_or("fuzz", 0.0);
        Ok(Self::new(albedo, fuzz))
    }
}

impl MaterialT for Metal {
    fn scatter(&self, ray: &Ray, inter: &Intersection, rng: &mut Rng) -> Option<Scatter> {
        let normal = inter.face_normal(ray);
        let mut reflected = util::reflect(ray.direction.normalize(), normal);
        if self.fuzz > 0.0 {
            reflected = reflected + self.fuzz * rng.uniform_in_ball();
        }
        // a fuzzed ray pushed under the surface is absorbed
        if reflected.dot(normal) <= 0.0 {
            return None;
        }
        Some(Scatter::Specular {
            ray: Ray::new(inter.position, reflected),
            attenuation: self.albedo.color_at(inter),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::texture::SolidTexture;

    #[test]
    fn polished_metal_reflects_deterministically() {
        let material = Metal::new(SolidTexture::new(Color::gray(0.9)).into(), 0.0);
        let ray = Ray::new(glam::Vec3A::new(-1.0, 1.0, 0.0), glam::Vec3A::new(1.0, -1.0, 0.0));
        let mut inter = Intersection::default();
        inter.position = glam::Vec3A::ZERO;
        inter.normal = glam::Vec3A::Y;

        let mut rng = Rng::from_seed(1);
        match material.scatter(&ray, &inter, &mut rng) {
            Some(Scatter::Specular { ray: scattered, .. }) => {
                let expected = glam::Vec3A::new(1.0, 1.0, 0.0).normalize();
                assert!((scattered.direction.normalize() - expected).length() < 1e-5);
            }
            _ => panic!("mirror must scatter specularly"),
        }
    }

    #[test]
    fn grazing_fuzz_can_absorb() {
        let material = Metal::new(SolidTexture::new(Color::WHITE).into(), 1.0);
        let ray = Ray::new(
            glam::Vec3A::new(-1.0, 0.001, 0.0),
            glam::Vec3A::new(1.0, -0.001, 0.0),
        );
        let mut inter = Intersection::default();
        inter.normal = glam::Vec3A::Y;

        let mut rng = Rng::from_seed(2);
        let mut absorbed = 0;
        for _ in 0..200 {
            if material.scatter(&ray, &inter, &mut rng).is_none() {
                absorbed += 1;
            }
        }
        assert!(absorbed > 0);
    }
}
