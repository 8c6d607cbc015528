mod perspective;

pub use perspective::*;

use crate::core::{loader::InputParams, ray::Ray};

#[enum_dispatch::enum_dispatch(Camera)]
pub trait CameraT: Send + Sync {
    /// `point` is the normalized screen position in [0,1]^2; `lens` carries
    /// two independent uniform draws for aperture sampling.
    fn generate_ray(&self, point: (f32, f32), lens: (f32, f32)) -> Ray;
}

#[enum_dispatch::enum_dispatch]
pub enum Camera {
    PerspectiveCamera,
}

pub fn create_camera_from_params(params: &mut InputParams, aspect: f32) -> anyhow::Result<Camera> {
    params.set_name("camera".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("camera-{}", ty).into());

    let res = match ty.as_str() {
        "perspective" => PerspectiveCamera::load(params, aspect)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    Ok(res)
}
