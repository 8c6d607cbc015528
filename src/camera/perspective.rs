use crate::core::{loader::InputParams, ray::Ray};

use super::CameraT;

/// Thin-lens perspective camera. A zero aperture degenerates to a pinhole.
pub struct PerspectiveCamera {
    eye: glam::Vec3A,
    forward: glam::Vec3A,
    up: glam::Vec3A,
    right: glam::Vec3A,
    half_width: f32,
    half_height: f32,
    lens_radius: f32,
    focus_dist: f32,
}

impl PerspectiveCamera {
    pub fn new(
        eye: glam::Vec3A,
        look_at: glam::Vec3A,
        up: glam::Vec3A,
        fov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let forward = (look_at - eye).normalize();
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        let half_height = (fov * 0.5).tan();
        let half_width = half_height * aspect;
        Self {
            eye,
            forward,
            up,
            right,
            half_width,
            half_height,
            lens_radius: aperture * 0.5,
            focus_dist,
        }
    }

    pub fn load(params: &mut InputParams, aspect: f32) -> anyhow::Result<Self> {
        let eye = params.get_float3("eye")?;
        let look_at = params.get_float3("look_at")?;
        let up = params.get_float3_or("up", [0.0, 1.0, 0.0]);
        let fov_deg = params.get_float("fov")?;
        let fov = fov_deg * std::f32::consts::PI / 180.0;
        let aperture = params.get_float_or("aperture", 0.0);
        let focus_dist = params.get_float_or("focus_dist", 1.0);

        Ok(Self::new(
            eye.into(),
            look_at.into(),
            up.into(),
            fov,
            aspect,
            aperture,
            focus_dist,
        ))
    }
}

impl CameraT for PerspectiveCamera {
    fn generate_ray(&self, point: (f32, f32), lens: (f32, f32)) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let radius = self.lens_radius * lens.0.sqrt();
            let phi = lens.1 * 2.0 * std::f32::consts::PI;
            self.right * (radius * phi.cos()) + self.up * (radius * phi.sin())
        } else {
            glam::Vec3A::ZERO
        };

        let target = self.eye
            + self.focus_dist
                * (self.forward
                    + self.right * ((point.0 - 0.5) * 2.0 * self.half_width)
                    + self.up * ((point.1 - 0.5) * 2.0 * self.half_height));
        let origin = self.eye + offset;
        Ray::new(origin, (target - origin).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_screen_looks_forward() {
        let camera = PerspectiveCamera::new(
            glam::Vec3A::ZERO,
            -glam::Vec3A::Z,
            glam::Vec3A::Y,
            std::f32::consts::FRAC_PI_2,
            1.0,
            0.0,
            1.0,
        );
        let ray = camera.generate_ray((0.5, 0.5), (0.0, 0.0));
        assert!((ray.direction - (-glam::Vec3A::Z)).length() < 1e-5);
        assert_eq!(ray.origin, glam::Vec3A::ZERO);
    }

    #[test]
    fn lens_samples_spread_the_origin_but_share_focus() {
        let camera = PerspectiveCamera::new(
            glam::Vec3A::ZERO,
            -glam::Vec3A::Z,
            glam::Vec3A::Y,
            std::f32::consts::FRAC_PI_2,
            1.0,
            0.5,
            3.0,
        );
        let a = camera.generate_ray((0.5, 0.5), (1.0, 0.0));
        let b = camera.generate_ray((0.5, 0.5), (1.0, 0.5));
        assert!((a.origin - b.origin).length() > 1e-3);

        // both rays converge on the focal point
        let focus = glam::Vec3A::new(0.0, 0.0, -3.0);
        let ta = (focus.z - a.origin.z) / a.direction.z;
        let tb = (focus.z - b.origin.z) / b.direction.z;
        assert!((a.point_at(ta) - focus).length() < 1e-3);
        assert!((b.point_at(tb) - focus).length() < 1e-3);
    }
}
