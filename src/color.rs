// Simple color struct, created from an unsigned 32 representing 00RRGGBB.
// Alpha is supplied per draw call since particles and links share one hue.

use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = (num >> 0) as u8;

        Color { r, g, b }
    }

    // CSS color string understood by fillStyle / strokeStyle
    pub fn to_rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        // light violet used by the whole background
        Color::from_u32(0xaf9bff)
    }
}
