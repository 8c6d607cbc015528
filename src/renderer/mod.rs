mod pt;
mod util;

pub use pt::*;

use std::path::PathBuf;

use crate::core::{loader::InputParams, scene::Scene};

pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub output_filename: PathBuf,
}

#[enum_dispatch::enum_dispatch(Renderer)]
pub trait RendererT: Send + Sync {
    fn render(&self, scene: &Scene, config: &OutputConfig) -> anyhow::Result<()>;
}

#[enum_dispatch::enum_dispatch]
pub enum Renderer {
    PathTracer,
}

pub fn create_renderer_from_params(params: &mut InputParams) -> anyhow::Result<Renderer> {
    params.set_name("renderer".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("renderer-{}", ty).into());

    let res = match ty.as_str() {
        "pt" => PathTracer::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    Ok(res)
}
