mod dielectric;
mod diffuse_light;
mod lambert;
mod metal;

pub mod util;

pub use dielectric::*;
pub use diffuse_light::*;
pub use lambert::*;
pub use metal::*;

use std::collections::HashMap;

use crate::core::{
    color::Color, intersection::Intersection, loader::InputParams, ray::Ray, rng::Rng,
};
use crate::pdf::Pdf;
use crate::texture::{SolidTexture, Texture};

/// Outcome of a scatter event. A specular bounce carries a concrete ray and
/// is followed with weight = attenuation; a diffuse bounce carries a sampler
/// whose density divides the attenuation during integration.
pub enum Scatter {
    Specular { ray: Ray, attenuation: Color },
    Diffuse { attenuation: Color, pdf: Pdf<'static> },
}

#[enum_dispatch::enum_dispatch(Material)]
pub trait MaterialT: Send + Sync {
    /// Absorptive default: the ray terminates here.
    fn scatter(&self, _ray: &Ray, _inter: &Intersection, _rng: &mut Rng) -> Option<Scatter> {
        None
    }

    /// Density the material itself assigns to `direction`. Must agree with
    /// the sampler handed out by `scatter` for the same hit.
    fn scattering_pdf(&self, _ray: &Ray, _inter: &Intersection, _direction: glam::Vec3A) -> f32 {
        0.0
    }

    fn emitted(&self, _ray: &Ray, _inter: &Intersection) -> Color {
        Color::BLACK
    }
}

#[enum_dispatch::enum_dispatch]
pub enum Material {
    Lambertian,
    Metal,
    Dielectric,
    DiffuseLight,
}

pub fn create_material_from_params(
    params: &mut InputParams,
    textures: &HashMap<String, Texture>,
) -> anyhow::Result<Material> {
    params.set_name("material".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("material-{}", ty).into());

    let res = match ty.as_str() {
        "lambert" => Lambertian::load(params, textures)?.into(),
        "metal" => Metal::load(params, textures)?.into(),
        "dielectric" => Dielectric::load(params)?.into(),
        "light" => DiffuseLight::load(params, textures)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    Ok(res)
}

/// A texture-valued field is either an inline `[r, g, b]` or the name of a
/// texture defined in the scene's texture table.
pub(crate) fn resolve_texture(
    params: &mut InputParams,
    key: &str,
    textures: &HashMap<String, Texture>,
) -> anyhow::Result<Texture> {
    if let Ok(color) = params.get_float3(key) {
        return Ok(SolidTexture::new(color.into()).into());
    }
    let name = params.get_str(key)?;
    if let Some(tex) = textures.get(&name) {
        Ok(tex.clone())
    } else {
        anyhow::bail!(format!("{}: texture '{}' not found", params.name(), name))
    }
}
