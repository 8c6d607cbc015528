mod bvh;
mod group;
mod plane;
mod quad;
mod sphere;

pub use bvh::*;
pub use group::*;
pub use plane::*;
pub use quad::*;
pub use sphere::*;

use std::collections::HashMap;

use crate::core::{
    bbox::Bbox, intersection::Intersection, loader::InputParams, ray::Ray, rng::Rng,
    scene::MaterialId,
};

#[enum_dispatch::enum_dispatch(Primitive)]
pub trait PrimitiveT: Send + Sync {
    /// Nearest hit with `ray.t_min < t < inter.t`; overwrites the record and
    /// returns true on success, leaving `inter.t` as the new upper bound.
    fn intersect(&self, ray: &Ray, inter: &mut Intersection) -> bool;

    /// `None` for unbounded geometry, which must not be placed in a BVH.
    fn bounding_box(&self) -> Option<Bbox>;

    /// Solid-angle density of `random` directions from `origin`. Only
    /// primitives registered as lights need a real implementation.
    fn pdf_value(&self, _origin: glam::Vec3A, _direction: glam::Vec3A) -> f32 {
        0.0
    }

    fn random(&self, _origin: glam::Vec3A, _rng: &mut Rng) -> glam::Vec3A {
        glam::Vec3A::X
    }
}

#[enum_dispatch::enum_dispatch]
#[derive(Clone)]
pub enum Primitive {
    Sphere,
    Quad,
    Plane,
}

pub fn create_primitive_from_params(
    params: &mut InputParams,
    materials: &HashMap<String, MaterialId>,
) -> anyhow::Result<Primitive> {
    params.set_name("primitive".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("primitive-{}", ty).into());

    let res = match ty.as_str() {
        "sphere" => Sphere::load(params, materials)?.into(),
        "quad" => Quad::load(params, materials)?.into(),
        "plane" => Plane::load(params, materials)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    Ok(res)
}

pub(crate) fn resolve_material(
    params: &mut InputParams,
    materials: &HashMap<String, MaterialId>,
) -> anyhow::Result<MaterialId> {
    let name = params.get_str("material")?;
    if let Some(id) = materials.get(&name) {
        Ok(*id)
    } else {
        anyhow::bail!(format!("{}: material '{}' not found", params.name(), name))
    }
}
