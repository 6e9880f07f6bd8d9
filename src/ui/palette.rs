//! The two on-screen game colors.
//!
//! The engine only knows [`ColorTag`]s; the palette decides what they look
//! like. Colors are drawn as bright HSV values, redrawing the second one
//! until the pair differs.

use crate::core::game_state::ColorTag;
use rand::Rng;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    primary: Color,
    secondary: Color,
}

impl Palette {
    pub fn new(primary: Color, secondary: Color) -> Self {
        Self { primary, secondary }
    }

    /// Two random bright colors that are guaranteed to differ.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let primary = random_bright_color(rng);
        let mut secondary = random_bright_color(rng);
        while secondary == primary {
            secondary = random_bright_color(rng);
        }
        Self { primary, secondary }
    }

    pub fn color(&self, tag: ColorTag) -> Color {
        match tag {
            ColorTag::Primary => self.primary,
            ColorTag::Secondary => self.secondary,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Color::Rgb(255, 80, 80), Color::Rgb(80, 160, 255))
    }
}

/// Random hue with saturation and value in the upper half.
fn random_bright_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let hue = rng.gen_range(0.0..360.0);
    let saturation = rng.gen_range(0.5..1.0);
    let value = rng.gen_range(0.5..1.0);
    let (r, g, b) = hsv_to_rgb(hue, saturation, value);
    Color::Rgb(r, g, b)
}

/// HSV (hue in degrees, saturation and value in 0..=1) to 8-bit RGB.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let hue = hue.rem_euclid(360.0);
    let chroma = value * saturation;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match (hue / 60.0) as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let to_byte = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
