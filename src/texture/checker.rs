use crate::core::{color::Color, intersection::Intersection, loader::InputParams};

use super::TextureT;

/// World-space checkerboard, alternating by the parity of the hit point's
/// lattice cell.
#[derive(Clone)]
pub struct CheckerTexture {
    inv_scale: f32,
    even: Color,
    odd: Color,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Color, odd: Color) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let scale = params.get_float_or("scale", 1.0);
        let even = params.get_float3("even")?;
        let odd = params.get_float3("odd")?;
        Ok(Self::new(scale, even.into(), odd.into()))
    }
}

impl TextureT for CheckerTexture {
    fn color_at(&self, inter: &Intersection) -> Color {
        let p = inter.position * self.inv_scale;
        let cell = p.x.floor() as i64 + p.y.floor() as i64 + p.z.floor() as i64;
        if cell % 2 == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternates_between_cells() {
        let tex = CheckerTexture::new(1.0, Color::WHITE, Color::BLACK);

        let mut inter = Intersection::default();
        inter.position = glam::Vec3A::new(0.5, 0.5, 0.5);
        assert_eq!(tex.color_at(&inter), Color::WHITE);

        inter.position = glam::Vec3A::new(1.5, 0.5, 0.5);
        assert_eq!(tex.color_at(&inter), Color::BLACK);
    }
}
