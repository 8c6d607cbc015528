use std::collections::HashMap;

use crate::core::{
    bbox::Bbox, intersection::Intersection, loader::InputParams, ray::Ray, scene::MaterialId,
};

use super::PrimitiveT;

/// Infinite plane. Reports no bounding box, so the aggregate keeps it out of
/// the BVH and scans it linearly.
#[derive(Clone)]
pub struct Plane {
    point: glam::Vec3A,
    normal: glam::Vec3A,
    material: MaterialId,
}

impl Plane {
    pub fn new(point: glam::Vec3A, normal: glam::Vec3A, material: MaterialId) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }

    pub fn load(
        params: &mut InputParams,
        materials: &HashMap<String, MaterialId>,
    ) -> anyhow::Result<Self> {
        let point = params.get_float3_or("point", [0.0, 0.0, 0.0]);
        let normal = params.get_float3("normal")?;
        let material = super::resolve_material(params, materials)?;
        Ok(Plane::new(point.into(), normal.into(), material))
    }
}

impl PrimitiveT for Plane {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection) -> bool {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-8 {
            return false;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if ray.t_min < t && t < inter.t {
            inter.t = t;
            inter.position = ray.point_at(t);
            inter.normal = self.normal;
            inter.texcoords = glam::Vec2::ZERO;
            inter.material = Some(self.material);
            return true;
        }
        false
    }

    fn bounding_box(&self) -> Option<Bbox> {
        None
    }
}
