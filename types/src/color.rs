//! Linear RGBA color used for element tinting.

use serde::{Deserialize, Serialize};

/// Floating-point RGBA color, components nominally in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert from an 8-bit `[r, g, b, a]` array, the format used in TOML configs.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self::new(
            rgba[0] as f32 / 255.0,
            rgba[1] as f32 / 255.0,
            rgba[2] as f32 / 255.0,
            rgba[3] as f32 / 255.0,
        )
    }

    /// Convert to an 8-bit `[r, g, b, a]` array, clamping out-of-range components.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Interpolate RGB towards `other` by `t`; alpha is taken from `self`.
    pub fn lerp_rgb(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a,
        )
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_conversion() {
        let c = Rgba::from_rgba8([255, 0, 51, 255]);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.to_rgba8(), [255, 0, 51, 255]);
        assert_eq!(Rgba::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_lerp_rgb_keeps_alpha() {
        let red = Rgba::new(1.0, 0.0, 0.0, 0.5);
        let mixed = Rgba::WHITE.with_alpha(0.5).lerp_rgb(red, 0.5);
        assert_eq!(mixed, Rgba::new(1.0, 0.5, 0.5, 0.5));
        assert_eq!(Rgba::WHITE.lerp_rgb(red, 1.0).to_array(), [1.0, 0.0, 0.0, 1.0]);
    }
}
