use std::collections::HashMap;

use crate::core::{
    bbox::Bbox, coord::Coordinate, intersection::Intersection, loader::InputParams, ray::Ray,
    rng::Rng, scene::MaterialId,
};

use super::PrimitiveT;

#[derive(Clone)]
pub struct Sphere {
    center: glam::Vec3A,
    radius: f32,
    material: MaterialId,
    bbox: Bbox,
}

impl Sphere {
    pub fn new(center: glam::Vec3A, radius: f32, material: MaterialId) -> Self {
        let delta = glam::Vec3A::splat(radius);
        let bbox = Bbox::new(center - delta, center + delta);
        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let delta = b * b - a * c;
        if delta >= 0.0 {
            let delta = delta.sqrt();
            let min = (-b - delta) / a;
            let max = (-b + delta) / a;
            Some((min, max))
        } else {
            None
        }
    }

    pub fn load(
        params: &mut InputParams,
        materials: &HashMap<String, MaterialId>,
    ) -> anyhow::Result<Self> {
        let center = params.get_float3_or("center", [0.0, 0.0, 0.0]);
        let radius = params.get_float("radius")?;
        let material = super::resolve_material(params, materials)?;
        Ok(Sphere::new(center.into(), radius, material))
    }
}

impl PrimitiveT for Sphere {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection) -> bool {
        if let Some((min, max)) = self.intersect_ray(ray) {
            let t = if min < ray.t_min { max } else { min };
            if ray.t_min < t && t < inter.t {
                let position = ray.point_at(t);
                let norm = (position - self.center) / self.radius;
                inter.t = t;
                inter.position = position;
                inter.normal = norm;
                inter.texcoords = sphere_normal_to_texcoords(norm);
                inter.material = Some(self.material);
                return true;
            }
        }
        false
    }

    fn bounding_box(&self) -> Option<Bbox> {
        Some(self.bbox)
    }

    fn pdf_value(&self, origin: glam::Vec3A, direction: glam::Vec3A) -> f32 {
        let ray = Ray::new(origin, direction);
        let hit = match self.intersect_ray(&ray) {
            Some((min, max)) => min.max(ray.t_min) < max && max > ray.t_min,
            None => false,
        };
        if !hit {
            return 0.0;
        }

        let dist_sqr = (self.center - origin).length_squared();
        if dist_sqr <= self.radius * self.radius {
            // origin inside the sphere: every direction hits it
            return 0.25 * std::f32::consts::FRAC_1_PI;
        }
        let cos_theta_max = (1.0 - self.radius * self.radius / dist_sqr).max(0.0).sqrt();
        let solid_angle = 2.0 * std::f32::consts::PI * (1.0 - cos_theta_max);
        if solid_angle > 0.0 {
            1.0 / solid_angle
        } else {
            0.0
        }
    }

    fn random(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        let to_center = self.center - origin;
        let dist_sqr = to_center.length_squared();
        if dist_sqr <= self.radius * self.radius {
            return rng.uniform_on_sphere();
        }

        // uniform over the cone subtended by the sphere
        let coord = Coordinate::from_z(to_center / dist_sqr.sqrt());
        let (r1, r2) = rng.uniform_2d();
        let cos_theta_max = (1.0 - self.radius * self.radius / dist_sqr).max(0.0).sqrt();
        let z = 1.0 + r2 * (cos_theta_max - 1.0);
        let r = (1.0 - z * z).max(0.0).sqrt();
        let phi = r1 * 2.0 * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        coord.to_world(glam::Vec3A::new(r * cos_phi, r * sin_phi, z))
    }
}

fn sphere_normal_to_texcoords(p: glam::Vec3A) -> glam::Vec2 {
    let theta = p.y.acos();
    let phi = p.x.atan2(p.z) + std::f32::consts::PI;
    glam::Vec2::new(
        phi * 0.5 * std::f32::consts::FRAC_1_PI,
        theta * std::f32::consts::FRAC_1_PI,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(glam::Vec3A::ZERO, 1.0, MaterialId(0))
    }

    #[test]
    fn nearest_root_is_reported() {
        let sphere = unit_sphere();
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, -3.0), glam::Vec3A::Z);
        let mut inter = Intersection::default();
        assert!(sphere.intersect(&ray, &mut inter));
        assert!((inter.t - 2.0).abs() < 1e-4);
        assert!((inter.normal - (-glam::Vec3A::Z)).length() < 1e-4);
    }

    #[test]
    fn inside_hit_uses_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::X);
        let mut inter = Intersection::default();
        assert!(sphere.intersect(&ray, &mut inter));
        assert!((inter.t - 1.0).abs() < 1e-4);
    }

    #[test]
    fn closer_record_is_not_overwritten() {
        let sphere = unit_sphere();
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, -3.0), glam::Vec3A::Z);
        let mut inter = Intersection::default();
        inter.t = 1.0;
        assert!(!sphere.intersect(&ray, &mut inter));
        assert_eq!(inter.t, 1.0);
    }

    // Sampled directions all hit the sphere, and the reported density
    // integrates to ~1 over the subtended cone.
    #[test]
    fn cone_sampling_matches_density() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 0.0, 4.0), 1.0, MaterialId(0));
        let origin = glam::Vec3A::ZERO;
        let mut rng = Rng::from_seed(29);

        for _ in 0..500 {
            let dir = sphere.random(origin, &mut rng);
            assert!(sphere.pdf_value(origin, dir) > 0.0);
        }

        let n = 400_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let dir = rng.uniform_on_sphere();
            sum += sphere.pdf_value(origin, dir) as f64 * 4.0 * std::f64::consts::PI;
        }
        let integral = sum / n as f64;
        assert!(
            (integral - 1.0).abs() < 0.05,
            "sphere pdf integral = {}",
            integral
        );
    }
}
