mod checker;
mod solid;

pub use checker::*;
pub use solid::*;

use crate::core::{color::Color, intersection::Intersection, loader::InputParams};

#[enum_dispatch::enum_dispatch(Texture)]
pub trait TextureT: Send + Sync {
    fn color_at(&self, inter: &Intersection) -> Color;
}

#[enum_dispatch::enum_dispatch]
#[derive(Clone)]
pub enum Texture {
    SolidTexture,
    CheckerTexture,
}

pub fn create_texture_from_params(params: &mut InputParams) -> anyhow::Result<Texture> {
    params.set_name("texture".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("texture-{}", ty).into());

    let res = match ty.as_str() {
        "solid" => SolidTexture::load(params)?.into(),
        "checker" => CheckerTexture::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    Ok(res)
}
