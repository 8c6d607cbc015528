use std::collections::HashMap;

use crate::core::{
    bbox::Bbox, intersection::Intersection, loader::InputParams, ray::Ray, rng::Rng,
    scene::MaterialId,
};

use super::PrimitiveT;

/// Parallelogram spanned by two edge vectors from a corner point.
#[derive(Clone)]
pub struct Quad {
    q: glam::Vec3A,
    u: glam::Vec3A,
    v: glam::Vec3A,
    normal: glam::Vec3A,
    d: f32,
    w: glam::Vec3A,
    area: f32,
    material: MaterialId,
    bbox: Bbox,
}

impl Quad {
    pub fn new(q: glam::Vec3A, u: glam::Vec3A, v: glam::Vec3A, material: MaterialId) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.length_squared();
        let area = n.length();
        let bbox = Bbox::from_points(&[q, q + u, q + v, q + u + v]).padded(0.0001);
        Self {
            q,
            u,
            v,
            normal,
            d,
            w,
            area,
            material,
            bbox,
        }
    }

    pub fn load(
        params: &mut InputParams,
        materials: &HashMap<String, MaterialId>,
    ) -> anyhow::Result<Self> {
        let q = params.get_float3("corner")?;
        let u = params.get_float3("edge_u")?;
        let v = params.get_float3("edge_v")?;
        let material = super::resolve_material(params, materials)?;
        Ok(Quad::new(q.into(), u.into(), v.into(), material))
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-8 {
            return None;
        }
        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        let planar = ray.point_at(t) - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));
        if (0.0..=1.0).contains(&alpha) && (0.0..=1.0).contains(&beta) {
            Some((t, alpha, beta))
        } else {
            None
        }
    }
}

impl PrimitiveT for Quad {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection) -> bool {
        if let Some((t, alpha, beta)) = self.intersect_ray(ray) {
            if ray.t_min < t && t < inter.t {
                inter.t = t;
                inter.position = ray.point_at(t);
                inter.normal = self.normal;
                inter.texcoords = glam::Vec2::new(alpha, beta);
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
        if let Some((t, _, _)) = self.intersect_ray(&ray) {
            if t <= ray.t_min {
                return 0.0;
            }
            // area measure converted to solid angle at the origin
            let dist_sqr = t * t * direction.length_squared();
            let cosine = direction.dot(self.normal).abs() / direction.length();
            if cosine > 1e-8 {
                return dist_sqr / (cosine * self.area);
            }
        }
        0.0
    }

    fn random(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        let (r1, r2) = rng.uniform_2d();
        let point = self.q + r1 * self.u + r2 * self.v;
        (point - origin).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Quad {
        // [0,1]^2 in the xz plane, normal +y
        Quad::new(
            glam::Vec3A::ZERO,
            glam::Vec3A::Z,
            glam::Vec3A::X,
            MaterialId(0),
        )
    }

    #[test]
    fn hits_inside_misses_outside() {
        let quad = unit_quad();

        let inside = Ray::new(glam::Vec3A::new(0.5, 2.0, 0.5), -glam::Vec3A::Y);
        let mut inter = Intersection::default();
        assert!(quad.intersect(&inside, &mut inter));
        assert!((inter.t - 2.0).abs() < 1e-4);

        let outside = Ray::new(glam::Vec3A::new(1.5, 2.0, 0.5), -glam::Vec3A::Y);
        let mut inter = Intersection::default();
        assert!(!quad.intersect(&outside, &mut inter));

        let parallel = Ray::new(glam::Vec3A::new(0.5, 2.0, 0.5), glam::Vec3A::X);
        let mut inter = Intersection::default();
        assert!(!quad.intersect(&parallel, &mut inter));
    }

    #[test]
    fn sampled_directions_hit_with_positive_density() {
        let quad = unit_quad();
        let origin = glam::Vec3A::new(0.5, 3.0, 0.5);
        let mut rng = Rng::from_seed(31);
        for _ in 0..500 {
            let dir = quad.random(origin, &mut rng);
            assert!(quad.pdf_value(origin, dir) > 0.0);
        }
    }

    #[test]
    fn density_integrates_to_one() {
        let quad = Quad::new(
            glam::Vec3A::new(-1.0, 2.0, -1.0),
            glam::Vec3A::new(2.0, 0.0, 0.0),
            glam::Vec3A::new(0.0, 0.0, 2.0),
            MaterialId(0),
        );
        let origin = glam::Vec3A::ZERO;
        let mut rng = Rng::from_seed(37);

        let n = 400_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let dir = rng.uniform_on_sphere();
            sum += quad.pdf_value(origin, dir) as f64 * 4.0 * std::f64::consts::PI;
        }
        let integral = sum / n as f64;
        assert!(
            (integral - 1.0).abs() < 0.05,
            "quad pdf integral = {}",
            integral
        );
    }
}
