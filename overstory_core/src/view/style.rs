// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cosmetic view properties: colors, shadows, corner rounding.
//!
//! These are deliberately minimal value types. Presenters translate them to
//! whatever the native tree uses (`CALayer` fields, CSS properties, paint
//! commands); nothing here performs rendering.

use kurbo::Vec2;

/// Corner radius applied by [`round_corners`](super::ViewStore::round_corners).
pub const DEFAULT_CORNER_RADIUS: f64 = 5.0;

/// An sRGB color with straight (non-premultiplied) alpha.
///
/// Components are in `[0, 1]`. Out-of-range values are clamped when converting
/// to bytes, not on construction.
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
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Two-thirds white, the conventional border filler color.
    pub const LIGHT_GRAY: Self = Self::rgba(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 1.0);

    /// Creates a color from components.
    #[inline]
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from components.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Returns this color with its alpha scaled by `factor`.
    #[inline]
    #[must_use]
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    /// Converts to packed RGBA bytes, clamping each component to `[0, 1]`.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "clamped to [0, 255.5) before the cast"
        )]
        fn byte(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
        }
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }
}

/// Drop-shadow parameters for a view.
///
/// Matches the common layer model: the shadow is cast by the view's bounds,
/// offset by `offset`, blurred by `blur_radius`, and composited at `opacity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: Color,
    /// Offset from the view, in local units.
    pub offset: Vec2,
    /// Gaussian blur radius.
    pub blur_radius: f64,
    /// Shadow opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Shadow {
    /// A tight shadow in the given color: zero offset, blur radius 2, full
    /// opacity. These are the defaults
    /// [`add_shadow`](super::ViewStore::add_shadow) applies.
    #[must_use]
    pub const fn with_color(color: Color) -> Self {
        Self {
            color,
            offset: Vec2::ZERO,
            blur_radius: 2.0,
            opacity: 1.0,
        }
    }
}
