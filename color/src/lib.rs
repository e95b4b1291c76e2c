use serde::{Deserialize, Serialize};

/// RGBA color with components in 0.0..=1.0.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    #[serde(default = "opaque")]
    a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    // matplotlib's default scatter color
    pub const TAB_BLUE: Self = Self { r: 0.122, g: 0.467, b: 0.706, a: 1.0 };

    pub fn alpha(&self) -> f64 {
        self.a.clamp(0.0, 1.0) as f64
    }

    /// 8-bit RGB channels, alpha dropped.
    pub fn rgb8(&self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}
