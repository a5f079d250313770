// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RGBA colors for layer paint.

/// A color with straight (non-premultiplied) alpha, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Opaque purple, the default fill.
    pub const PURPLE: Self = Self::new(0.5, 0.0, 0.5, 1.0);

    /// Opaque system blue, the default background.
    pub const SYSTEM_BLUE: Self = Self::from_rgba8(0, 122, 255, 255);

    /// Creates a color from float components.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit components.
    #[inline]
    #[must_use]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Component-wise linear interpolation; `t` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "interpolation factor is clamped to 0.0..=1.0"
        )]
        let t = t.clamp(0.0, 1.0) as f32;
        Self {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    /// Returns whether the color is fully transparent.
    #[inline]
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let c = Color::TRANSPARENT.lerp(Color::PURPLE, 0.0);
        assert_eq!(c, Color::TRANSPARENT);
        let c = Color::TRANSPARENT.lerp(Color::PURPLE, 1.0);
        assert_eq!(c, Color::PURPLE);
        let c = Color::TRANSPARENT.lerp(Color::PURPLE, 0.5);
        assert!((c.a - 0.5).abs() < 1e-6, "alpha halfway, got {}", c.a);
        assert!((c.r - 0.25).abs() < 1e-6, "red halfway, got {}", c.r);
    }

    #[test]
    fn lerp_clamps_factor() {
        assert_eq!(Color::BLACK.lerp(Color::PURPLE, 3.0), Color::PURPLE);
        assert_eq!(Color::BLACK.lerp(Color::PURPLE, -1.0), Color::BLACK);
    }

    #[test]
    fn rgba8_conversion() {
        let c = Color::from_rgba8(255, 0, 51, 255);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6, "51/255 = 0.2");
        assert!(!c.is_transparent());
        assert!(Color::TRANSPARENT.is_transparent());
    }
}
