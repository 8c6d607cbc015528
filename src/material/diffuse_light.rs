use std::collections::HashMap;

use crate::core::{color::Color, intersection::Intersection, loader::InputParams, ray::Ray};
use crate::texture::{Texture, TextureT};

use super::MaterialT;

/// Emits from its front face and never scatters, so paths terminate at the
/// emitter.
pub struct DiffuseLight {
    emit: Texture,
}

impl DiffuseLight {
    pub fn new(emit: Texture) -> Self {
        Self { emit }
    }

    pub fn load(
        params: &mut InputParams,
        textures: &HashMap<String, Texture>,
    ) -> anyhow::Result<Self> {
        let emit = super::resolve_texture(params, "emit", textures)?;
        Ok(Self::new(emit))
    }
}

impl MaterialT for DiffuseLight {
    fn emitted(&self, ray: &Ray, inter: &Intersection) -> Color {
        if inter.is_front_face(ray) {
            self.emit.color_at(inter)
        } else {
            Color::BLACK
        }
    }
}
