//! Color handling for swimlane renderers
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, adding the linear ramps the heatmap renderer needs to
//! shade cells by value.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use swimlane_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Linearly interpolates between `self` and `other` in sRGB.
    ///
    /// `t` is clamped to `0.0..=1.0`; `0.0` yields `self` and `1.0` yields `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use swimlane_core::color::Color;
    ///
    /// let low = Color::new("#ffffcc").unwrap();
    /// let high = Color::new("#bd0026").unwrap();
    /// assert_eq!(low.lerp(high, 1.0).to_hex(), "#bd0026");
    /// ```
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let from = self.color.to_alpha_color::<Srgb>();
        let to = other.color.to_alpha_color::<Srgb>();

        let mut components = [0.0f32; 4];
        for (i, component) in components.iter_mut().enumerate() {
            *component = from.components[i] + (to.components[i] - from.components[i]) * t;
        }

        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::new(components)),
        }
    }

    /// Returns the color as a `#rrggbb` hex string, dropping alpha.
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }

    /// Returns `true` when light text reads better than dark text on this color.
    ///
    /// Uses the Rec. 601 luma approximation.
    pub fn is_dark(self) -> bool {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        let luma = 0.299 * f32::from(rgba.r) + 0.587 * f32::from(rgba.g) + 0.114 * f32::from(rgba.b);
        luma < 140.0
    }

    /// Returns the alpha (transparency) component, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}
