use std::sync::Mutex;

use crate::core::{
    color::Color,
    film::{color_to_rgb8, Film},
    intersection::Intersection,
    loader::InputParams,
    ray::Ray,
    rng::Rng,
    scene::Scene,
};
use crate::camera::CameraT;
use crate::material::{MaterialT, Scatter};
use crate::pdf::{MixturePdf, Pdf, PdfT, ShapePdf};
use crate::primitive::PrimitiveT;

use super::{util, OutputConfig, RendererT};

pub struct PathTracer {
    spp: u32,
    max_depth: u32,
    rr_depth: u32,
    seed: u64,
}

impl PathTracer {
    pub fn new(spp: u32, max_depth: u32, rr_depth: u32, seed: u64) -> Self {
        Self {
            spp,
            max_depth,
            rr_depth,
            seed,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let spp = params.get_int("spp")? as u32;
        let max_depth = params.get_int_or("max_depth", 16) as u32;
        let rr_depth = params.get_int_or("rr_depth", 3) as u32;
        let seed = params.get_int_or("seed", 0) as u64;
        Ok(Self::new(spp, max_depth, rr_depth, seed))
    }

    /// One-sample radiance estimate. Emission is added before the recursion;
    /// the attenuation weight multiplies only the continuation term.
    fn radiance(&self, scene: &Scene, ray: &Ray, depth: u32, rng: &mut Rng) -> Color {
        if depth >= self.max_depth {
            return Color::BLACK;
        }

        let mut inter = Intersection::default();
        if !scene.aggregate().intersect(ray, &mut inter) {
            return scene.background();
        }

        let material = scene.material(inter.material.unwrap());
        let emitted = material.emitted(ray, &inter);

        let scatter = match material.scatter(ray, &inter, rng) {
            Some(scatter) => scatter,
            None => return emitted,
        };

        match scatter {
            Scatter::Specular {
                ray: specular_ray,
                attenuation,
            } => match self.continue_path(attenuation, depth, rng) {
                Some(throughput) => {
                    emitted + throughput * self.radiance(scene, &specular_ray, depth + 1, rng)
                }
                None => emitted,
            },
            Scatter::Diffuse { attenuation, pdf } => {
                // 50/50 between the material's own lobe and the designated
                // lights; the evaluated density is always the mixture's mean
                let pdf: Pdf<'_> = if scene.lights().is_empty() {
                    pdf
                } else {
                    MixturePdf::new(pdf, ShapePdf::new(inter.position, scene.lights()).into())
                        .into()
                };

                let direction = pdf.generate(rng);
                let density = pdf.value(direction);
                if density <= 0.0 || !density.is_finite() {
                    return emitted;
                }

                let scattering_pdf = material.scattering_pdf(ray, &inter, direction);
                let coefficient = attenuation * (scattering_pdf / density);
                if !coefficient.is_finite() {
                    return emitted;
                }

                let next = Ray::new(inter.position, direction);
                match self.continue_path(coefficient, depth, rng) {
                    Some(throughput) => {
                        emitted + throughput * self.radiance(scene, &next, depth + 1, rng)
                    }
                    None => emitted,
                }
            }
        }
    }

    /// Russian roulette beyond `rr_depth`: survive with a luminance-derived
    /// probability and boost the throughput to compensate.
    fn continue_path(&self, coefficient: Color, depth: u32, rng: &mut Rng) -> Option<Color> {
        if depth < self.rr_depth {
            return Some(coefficient);
        }
        let survival = coefficient.luminance().clamp(0.05, 0.95);
        if rng.uniform_1d() > survival {
            None
        } else {
            Some(coefficient / survival)
        }
    }

    fn render_pixel(&self, scene: &Scene, col: u32, row: u32, width: u32, height: u32) -> Color {
        let mut rng = Rng::from_seed(pixel_seed(self.seed, col, row, width));
        let width_inv = 1.0 / width as f32;
        let height_inv = 1.0 / height as f32;

        let mut sum = Color::BLACK;
        for _ in 0..self.spp {
            let (offset_x, offset_y) = rng.uniform_2d();
            let s = (col as f32 + offset_x) * width_inv;
            let t = ((height - row - 1) as f32 + offset_y) * height_inv;
            let ray = scene.camera().generate_ray((s, t), rng.uniform_2d());
            let color = self.radiance(scene, &ray, 0, &mut rng);
            if color.is_finite() {
                sum += color;
            }
        }
        sum / self.spp as f32
    }
}

impl RendererT for PathTracer {
    fn render(&self, scene: &Scene, config: &OutputConfig) -> anyhow::Result<()> {
        let film = Mutex::new(Film::new(config.width, config.height));
        let width = config.width;
        let height = config.height;

        let progress_bar = util::render_progress_bar(width, height);

        let num_workers = num_cpus::get() as u32 * 2;
        let ranges = util::create_image_ranges(num_workers, height);

        crossbeam::scope(|scope| {
            for t in 0..num_workers as usize {
                let film = &film;
                let progress_bar = progress_bar.clone();
                let path_tracer = self;
                let util::ImageRange { from, to } = ranges[t];

                scope.spawn(move |_| {
                    for row in from..to {
                        for col in 0..width {
                            let color = path_tracer.render_pixel(scene, col, row, width, height);
                            let (r, g, b) = color_to_rgb8(color);
                            // disjoint rows per worker, so the lock is only
                            // ever held for this one write
                            film.lock().unwrap().set_pixel(row, col, r, g, b);
                            progress_bar.inc(1);
                        }
                    }
                });
            }
        })
        .unwrap();
        progress_bar.finish();

        let film = film.into_inner().unwrap();
        film.save(&config.output_filename)
    }
}

/// Stream key for a pixel: reproducible for a fixed scene and seed no matter
/// how rows are partitioned across workers.
fn pixel_seed(base: u64, col: u32, row: u32, width: u32) -> u64 {
    let index = row as u64 * width as u64 + col as u64;
    base.wrapping_add((index + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::core::scene::MaterialId;
    use crate::material::{DiffuseLight, Lambertian, Material};
    use crate::primitive::{Bvh, Primitive, PrimitiveList, Quad, Sphere};
    use crate::texture::SolidTexture;

    fn camera_at(eye: glam::Vec3A, look_at: glam::Vec3A) -> PerspectiveCamera {
        PerspectiveCamera::new(
            eye,
            look_at,
            glam::Vec3A::Y,
            std::f32::consts::FRAC_PI_2,
            1.0,
            0.0,
            1.0,
        )
    }

    // Gray sphere under a uniform white background: one diffuse bounce must
    // average to the albedo.
    #[test]
    fn single_bounce_matches_albedo() {
        let materials: Vec<Material> =
            vec![Lambertian::new(SolidTexture::new(Color::gray(0.5)).into()).into()];
        let mut rng = Rng::from_seed(41);
        let aggregate = Bvh::build(
            vec![Sphere::new(glam::Vec3A::ZERO, 1.0, MaterialId(0)).into()],
            &mut rng,
        );
        let scene = Scene::new(
            materials,
            aggregate,
            PrimitiveList::new(),
            Color::WHITE,
            camera_at(glam::Vec3A::new(0.0, 0.0, 3.0), glam::Vec3A::ZERO).into(),
        );

        // rr_depth past max_depth disables roulette
        let tracer = PathTracer::new(1, 2, 8, 0);
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, 3.0), -glam::Vec3A::Z);

        let n = 20_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let color = tracer.radiance(&scene, &ray, 0, &mut rng);
            sum += color.r as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "single bounce mean = {}", mean);
    }

    #[test]
    fn depth_cutoff_returns_black() {
        let materials: Vec<Material> =
            vec![Lambertian::new(SolidTexture::new(Color::gray(0.5)).into()).into()];
        let mut rng = Rng::from_seed(43);
        let aggregate = Bvh::build(
            vec![Sphere::new(glam::Vec3A::ZERO, 1.0, MaterialId(0)).into()],
            &mut rng,
        );
        let scene = Scene::new(
            materials,
            aggregate,
            PrimitiveList::new(),
            Color::WHITE,
            camera_at(glam::Vec3A::new(0.0, 0.0, 3.0), glam::Vec3A::ZERO).into(),
        );

        let tracer = PathTracer::new(1, 0, 8, 0);
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, 3.0), -glam::Vec3A::Z);
        assert_eq!(tracer.radiance(&scene, &ray, 0, &mut rng), Color::BLACK);
    }

    // Light sampling changes the variance of the estimator, never its
    // expectation: the mixture estimate and the pure-cosine estimate of the
    // same direct-lighting scene must agree.
    #[test]
    fn mixture_sampling_is_unbiased() {
        fn direct_light_estimate(designate_lights: bool) -> f64 {
            let materials: Vec<Material> = vec![
                Lambertian::new(SolidTexture::new(Color::gray(0.7)).into()).into(),
                DiffuseLight::new(SolidTexture::new(Color::new(3.0, 3.0, 3.0)).into()).into(),
            ];
            let floor: Primitive = Quad::new(
                glam::Vec3A::new(-5.0, 0.0, -5.0),
                glam::Vec3A::new(10.0, 0.0, 0.0),
                glam::Vec3A::new(0.0, 0.0, 10.0),
                MaterialId(0),
            )
            .into();
            // emissive panel overhead, facing down
            let panel: Primitive = Quad::new(
                glam::Vec3A::new(-1.0, 1.0, -1.0),
                glam::Vec3A::new(2.0, 0.0, 0.0),
                glam::Vec3A::new(0.0, 0.0, 2.0),
                MaterialId(1),
            )
            .into();

            let mut rng = Rng::from_seed(47);
            let aggregate = Bvh::build(vec![floor, panel.clone()], &mut rng);
            let mut lights = PrimitiveList::new();
            if designate_lights {
                lights.push(panel);
            }
            let scene = Scene::new(
                materials,
                aggregate,
                lights,
                Color::BLACK,
                camera_at(glam::Vec3A::new(0.0, 0.5, 3.0), glam::Vec3A::ZERO).into(),
            );

            let tracer = PathTracer::new(1, 2, 8, 0);
            // receiver below the panel, looking straight down at the floor
            let ray = Ray::new(glam::Vec3A::new(0.0, 0.5, 0.0), -glam::Vec3A::Y);
            let n = 60_000;
            let mut sum = 0.0f64;
            for _ in 0..n {
                sum += tracer.radiance(&scene, &ray, 0, &mut rng).r as f64;
            }
            sum / n as f64
        }

        let with_lights = direct_light_estimate(true);
        let without_lights = direct_light_estimate(false);
        assert!(with_lights > 0.1 && without_lights > 0.1);
        let relative = (with_lights - without_lights).abs() / without_lights;
        assert!(
            relative < 0.03,
            "estimates diverge: {} vs {}",
            with_lights,
            without_lights
        );
    }

    #[test]
    fn pixel_streams_are_reproducible() {
        let materials: Vec<Material> =
            vec![Lambertian::new(SolidTexture::new(Color::gray(0.5)).into()).into()];
        let mut rng = Rng::from_seed(53);
        let aggregate = Bvh::build(
            vec![Sphere::new(glam::Vec3A::ZERO, 1.0, MaterialId(0)).into()],
            &mut rng,
        );
        let scene = Scene::new(
            materials,
            aggregate,
            PrimitiveList::new(),
            Color::WHITE,
            camera_at(glam::Vec3A::new(0.0, 0.0, 3.0), glam::Vec3A::ZERO).into(),
        );

        let tracer = PathTracer::new(16, 4, 8, 7);
        let a = tracer.render_pixel(&scene, 3, 5, 8, 8);
        let b = tracer.render_pixel(&scene, 3, 5, 8, 8);
        assert_eq!(a, b);

        // different pixels decorrelate their streams
        let c = tracer.render_pixel(&scene, 4, 5, 8, 8);
        assert_ne!(a, c);
    }
}
