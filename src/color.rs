// Simple color struct, created from an unsigned 32 representing RRGGBBAA,
// plus the palette particles draw their starting colors from

use crate::error::{Error, Result};
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_u32(0xffffffff);
    pub const BLACK: Color = Color::from_u32(0x000000ff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn to_u32(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    // Canvas fill/stroke styles take css color strings
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

// Half of the default palette is black, so most particles start dark
// and the bright ones spread their color around by colliding
pub const DEFAULT_PALETTE: [u32; 10] = [
    0xffffffff, // white
    0xffcc00ff, // solar flare yellow
    0xff9933ff, // martian orange
    0xff6699ff, // nebula pink
    0xcc99ffff, // cosmic lavender
    0x000000ff,
    0x000000ff,
    0x000000ff,
    0x000000ff,
    0x000000ff,
];

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Palette> {
        if colors.is_empty() {
            return Err(Error::InvalidParam("palette must not be empty".into()));
        }
        Ok(Palette { colors })
    }

    pub fn from_u32s(colors: &[u32]) -> Result<Palette> {
        Palette::new(colors.iter().map(|&c| Color::from_u32(c)).collect())
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.colors[rng.gen_range(0, self.colors.len())]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: DEFAULT_PALETTE.iter().map(|&c| Color::from_u32(c)).collect(),
        }
    }
}
