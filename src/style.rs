//! Export style configuration.
//!
//! A [`StyleConfig`] captures every visual parameter applied uniformly to an
//! export batch. It serializes to the same camelCase JSON the editor stores:
//!
//! ```json
//! {
//!   "strokeWidth": 2.0,
//!   "foregroundColor": "#ffffff",
//!   "backgroundColor": "#7c3aed",
//!   "backgroundShape": "rounded",
//!   "padding": 20.0,
//!   "effect": "shadow",
//!   "iconSize": 144
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Output edge length used when a style does not specify one.
pub const DEFAULT_ICON_SIZE: u32 = 144;

// ============================================================================
// Enums
// ============================================================================

/// Shape the background is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum BackgroundShape {
    Circle,
    #[default]
    Rounded,
    Square,
}

impl BackgroundShape {
    /// Corner radius in pixels for a canvas of `size` pixels.
    ///
    /// A circle uses half the size, which the compositor draws as a full
    /// ellipse rather than a rounded rectangle.
    pub fn corner_radius(self, size: f32) -> f32 {
        match self {
            Self::Circle => size / 2.0,
            Self::Rounded => size * 0.1,
            Self::Square => 0.0,
        }
    }
}

/// Visual effect drawn beneath the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    Shadow,
    Glow,
    None,
}

// ============================================================================
// Color
// ============================================================================

/// A non-premultiplied 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa`, a named color,
    /// or `transparent`.
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        let trimmed = value.trim();
        let invalid = || StyleError::InvalidColor(value.to_string());

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid());
            }
            let (rgb, alpha) = match hex.len() {
                3 | 6 => (hex, 255),
                8 => {
                    let alpha = u8::from_str_radix(&hex[6..], 16).map_err(|_| invalid())?;
                    (&hex[..6], alpha)
                }
                _ => return Err(invalid()),
            };
            let parsed = Srgb::<u8>::from_str(rgb).map_err(|_| invalid())?;
            return Ok(Self::rgba(parsed.red, parsed.green, parsed.blue, alpha));
        }

        palette::named::from_str(&trimmed.to_ascii_lowercase())
            .map(|named| Self::rgb(named.red, named.green, named.blue))
            .ok_or_else(invalid)
    }

    /// Returns this color with its alpha scaled by `opacity` (0.0-1.0).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let alpha = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

// ============================================================================
// StyleConfig
// ============================================================================

/// Visual parameters applied uniformly to every icon in an export.
///
/// Immutable for the duration of an export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    /// Stroke width applied to outline icons. Ignored for filled icons.
    pub stroke_width: f32,

    /// Icon color, any CSS color accepted by [`Color::parse`].
    pub foreground_color: String,

    /// Background fill color.
    pub background_color: String,

    pub background_shape: BackgroundShape,

    /// Margin on each side, as a percentage of the output size (0-100).
    pub padding: f32,

    pub effect: Effect,

    /// Output edge length in pixels.
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
}

fn default_icon_size() -> u32 {
    DEFAULT_ICON_SIZE
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            foreground_color: "#ffffff".into(),
            background_color: "#7c3aed".into(),
            background_shape: BackgroundShape::Rounded,
            padding: 20.0,
            effect: Effect::Shadow,
            icon_size: DEFAULT_ICON_SIZE,
        }
    }
}

impl StyleConfig {
    pub fn with_foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground_color = color.into();
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_shape(mut self, shape: BackgroundShape) -> Self {
        self.background_shape = shape;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_icon_size(mut self, size: u32) -> Self {
        self.icon_size = size;
        self
    }

    /// Checks every invariant an export relies on.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.icon_size == 0 {
            return Err(StyleError::ZeroSize);
        }
        if !(0.0..100.0).contains(&self.padding) {
            return Err(StyleError::Padding(self.padding));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(StyleError::StrokeWidth(self.stroke_width));
        }
        self.foreground()?;
        self.background()?;
        Ok(())
    }

    pub fn foreground(&self) -> Result<Color, StyleError> {
        Color::parse(&self.foreground_color)
    }

    pub fn background(&self) -> Result<Color, StyleError> {
        Color::parse(&self.background_color)
    }

    /// Serializes the style to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the style to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a style from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Color::parse("#7c3aed").unwrap(), Color::rgb(0x7c, 0x3a, 0xed));
        assert_eq!(Color::parse("#fff").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(
            Color::parse("#00000080").unwrap(),
            Color::rgba(0, 0, 0, 0x80)
        );
    }

    #[test]
    fn parses_named_and_transparent_colors() {
        assert_eq!(Color::parse("Red").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("transparent").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn rejects_garbage_colors() {
        assert!(Color::parse("#12").is_err());
        assert!(Color::parse("#gggggg").is_err());
        assert!(Color::parse("not-a-color").is_err());
    }

    #[test]
    fn color_display_is_hex() {
        assert_eq!(Color::rgb(255, 0, 16).to_string(), "#ff0010");
        assert_eq!(Color::BLACK.with_opacity(0.3).to_string(), "#0000004d");
    }

    #[test]
    fn corner_radius_per_shape() {
        assert_eq!(BackgroundShape::Circle.corner_radius(144.0), 72.0);
        assert!((BackgroundShape::Rounded.corner_radius(144.0) - 14.4).abs() < 1e-4);
        assert_eq!(BackgroundShape::Square.corner_radius(144.0), 0.0);
    }

    #[test]
    fn default_style_is_valid() {
        assert!(StyleConfig::default().validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let base = StyleConfig::default();
        assert_eq!(
            base.clone().with_padding(100.0).validate(),
            Err(StyleError::Padding(100.0))
        );
        assert_eq!(
            base.clone().with_padding(-1.0).validate(),
            Err(StyleError::Padding(-1.0))
        );
        assert_eq!(
            base.clone().with_icon_size(0).validate(),
            Err(StyleError::ZeroSize)
        );
        assert_eq!(
            base.clone().with_stroke_width(0.0).validate(),
            Err(StyleError::StrokeWidth(0.0))
        );
        assert!(matches!(
            base.with_background("nope").validate(),
            Err(StyleError::InvalidColor(_))
        ));
    }

    #[test]
    fn json_uses_camel_case_and_lowercase_enums() {
        let json = StyleConfig::default().to_json_pretty().unwrap();
        assert!(json.contains("\"strokeWidth\""));
        assert!(json.contains("\"backgroundShape\": \"rounded\""));
        assert!(json.contains("\"effect\": \"shadow\""));
    }

    #[test]
    fn icon_size_defaults_when_missing() {
        let json = r##"{
            "strokeWidth": 1.5,
            "foregroundColor": "#000",
            "backgroundColor": "#fff",
            "backgroundShape": "circle",
            "padding": 10,
            "effect": "none"
        }"##;
        let style = StyleConfig::from_json(json).unwrap();
        assert_eq!(style.icon_size, DEFAULT_ICON_SIZE);
        assert_eq!(style.background_shape, BackgroundShape::Circle);
        assert_eq!(style.effect, Effect::None);
    }
}
