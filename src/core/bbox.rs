use crate::core::ray::Ray;

#[derive(Copy, Clone, Debug)]
pub struct Bbox {
    pub p_min: glam::Vec3A,
    pub p_max: glam::Vec3A,
}

impl Bbox {
    pub fn new(p_min: glam::Vec3A, p_max: glam::Vec3A) -> Self {
        Self { p_min, p_max }
    }

    pub fn from_points(points: &[glam::Vec3A]) -> Self {
        let mut p_min = points[0];
        let mut p_max = points[0];
        points.iter().skip(1).for_each(|p| {
            p_min = p_min.min(*p);
            p_max = p_max.max(*p);
        });
        Self { p_min, p_max }
    }

    pub fn empty() -> Self {
        Self {
            p_min: glam::Vec3A::splat(f32::MAX),
            p_max: glam::Vec3A::splat(f32::MIN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Smallest box containing both operands. Exact, the BVH relies on it.
    pub fn merge(mut self, another: Bbox) -> Self {
        self.p_min = self.p_min.min(another.p_min);
        self.p_max = self.p_max.max(another.p_max);
        self
    }

    pub fn axis_min(&self, axis: usize) -> f32 {
        match axis {
            0 => self.p_min.x,
            1 => self.p_min.y,
            _ => self.p_min.z,
        }
    }

    /// Grow any near-degenerate axis so flat primitives still get a usable slab.
    pub fn padded(mut self, delta: f32) -> Self {
        if self.p_max.x - self.p_min.x < delta {
            self.p_min.x -= delta;
            self.p_max.x += delta;
        }
        if self.p_max.y - self.p_min.y < delta {
            self.p_min.y -= delta;
            self.p_max.y += delta;
        }
        if self.p_max.z - self.p_min.z < delta {
            self.p_min.z -= delta;
            self.p_max.z += delta;
        }
        self
    }

    pub fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        if self.is_empty() {
            return false;
        }

        let x0 = (self.p_min.x - ray.origin.x) / ray.direction.x;
        let x1 = (self.p_max.x - ray.origin.x) / ray.direction.x;
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let y0 = (self.p_min.y - ray.origin.y) / ray.direction.y;
        let y1 = (self.p_max.y - ray.origin.y) / ray.direction.y;
        let (y0, y1) = (y0.min(y1), y0.max(y1));
        let z0 = (self.p_min.z - ray.origin.z) / ray.direction.z;
        let z1 = (self.p_max.z - ray.origin.z) / ray.direction.z;
        let (z0, z1) = (z0.min(z1), z0.max(z1));
        let t0 = x0.max(y0.max(z0));
        let t1 = x1.min(y1.min(z1));
        t0 <= t1 && t1 > ray.t_min && t0 < t_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_exact_union() {
        let a = Bbox::new(glam::Vec3A::new(-1.0, 0.0, 2.0), glam::Vec3A::new(1.0, 3.0, 4.0));
        let b = Bbox::new(glam::Vec3A::new(0.0, -2.0, 3.0), glam::Vec3A::new(5.0, 1.0, 3.5));
        let merged = a.merge(b);

        assert_eq!(merged.p_min, glam::Vec3A::new(-1.0, -2.0, 2.0));
        assert_eq!(merged.p_max, glam::Vec3A::new(5.0, 3.0, 4.0));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = Bbox::new(glam::Vec3A::ZERO, glam::Vec3A::ONE);
        let merged = Bbox::empty().merge(a);

        assert_eq!(merged.p_min, a.p_min);
        assert_eq!(merged.p_max, a.p_max);
    }

    #[test]
    fn slab_test_hits_and_misses() {
        let bbox = Bbox::new(glam::Vec3A::splat(-1.0), glam::Vec3A::splat(1.0));

        let toward = Ray::new(glam::Vec3A::new(0.0, 0.0, -5.0), glam::Vec3A::Z);
        assert!(bbox.intersect_test(&toward, f32::MAX));

        let away = Ray::new(glam::Vec3A::new(0.0, 0.0, -5.0), -glam::Vec3A::Z);
        assert!(!bbox.intersect_test(&away, f32::MAX));

        let offset = Ray::new(glam::Vec3A::new(5.0, 0.0, -5.0), glam::Vec3A::Z);
        assert!(!bbox.intersect_test(&offset, f32::MAX));

        // range-clipped: box lies beyond t_max
        assert!(!bbox.intersect_test(&toward, 1.0));
    }

    #[test]
    fn empty_box_is_never_hit() {
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::X);
        assert!(!Bbox::empty().intersect_test(&ray, f32::MAX));
    }
}
