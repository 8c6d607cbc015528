use crate::core::{color::Color, intersection::Intersection, loader::InputParams};

use super::TextureT;

#[derive(Clone)]
pub struct SolidTexture {
    color: Color,
}

impl SolidTexture {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let color = params.get_float3("color")?;
        Ok(Self::new(color.into()))
    }
}

impl TextureT for SolidTexture {
    fn color_at(&self, _inter: &Intersection) -> Color {
        self.color
    }
}
