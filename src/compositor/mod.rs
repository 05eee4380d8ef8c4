//! Raster composition of styled icons.
//!
//! [`Compositor`] turns raw icon markup into a fixed-size PNG. The layers are
//! drawn in a fixed order because the effect depends on it:
//!
//! ```text
//! ┌────────────────────┐
//! │ Background         │ ◄── clipped to circle / rounded / square
//! ├────────────────────┤
//! │ Shadow or glow     │ ◄── active for the icon draw only
//! ├────────────────────┤
//! │ Normalized icon    │ ◄── centered in the padded box
//! └────────────────────┘
//! ```
//!
//! Each render uses its own [`Surface`], so one compositor can be reused
//! for a whole batch without state carrying over between icons.

pub mod raster;
pub mod surface;

pub use surface::{Shadow, Surface};

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::{RenderError, StyleError};
use crate::icon::{IconId, RenderedIcon};
use crate::library::DrawingConvention;
use crate::normalize::normalize_svg;
use crate::style::{Color, StyleConfig};

// ============================================================================
// Layout
// ============================================================================

/// Pixel geometry of one output icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Output edge length.
    pub size: u32,
    /// Margin on each side.
    pub padding_px: f32,
    /// Edge length of the box the icon is drawn into.
    pub icon_box: f32,
    pub corner_radius: f32,
}

impl Layout {
    pub fn new(style: &StyleConfig) -> Self {
        let size = style.icon_size as f32;
        let padding_px = size * style.padding / 100.0;
        Self {
            size: style.icon_size,
            padding_px,
            icon_box: size - 2.0 * padding_px,
            corner_radius: style.background_shape.corner_radius(size),
        }
    }

    /// The icon box in whole pixels: `(offset, edge)`.
    pub fn icon_box_px(&self) -> (i32, u32) {
        (
            self.padding_px.round() as i32,
            self.icon_box.max(0.0).round() as u32,
        )
    }
}

// ============================================================================
// Compositor
// ============================================================================

/// Renders icons in one [`StyleConfig`].
#[derive(Debug, Clone)]
pub struct Compositor {
    style: StyleConfig,
    background: Color,
    layout: Layout,
}

impl Compositor {
    /// Validates `style` and prepares a compositor for it.
    pub fn new(style: StyleConfig) -> Result<Self, StyleError> {
        style.validate()?;
        let background = style.background()?;
        let layout = Layout::new(&style);
        Ok(Self {
            style,
            background,
            layout,
        })
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Composes one icon into an RGBA image of exactly `size` × `size`.
    ///
    /// Fails with [`RenderError::RasterLoad`] naming `id` when the markup,
    /// normalized or not, cannot be loaded. When the padding leaves no room
    /// for the icon, only the background is drawn and the markup is not read.
    pub fn render_image(
        &self,
        id: &IconId,
        markup: &str,
        convention: Option<DrawingConvention>,
    ) -> Result<RgbaImage, RenderError> {
        let layout = self.layout;
        let canvas_error = |size| RenderError::Canvas {
            icon: id.to_string(),
            size,
        };

        let mut surface = Surface::new(layout.size);
        surface
            .fill_background(self.style.background_shape, self.background)
            .ok_or_else(|| canvas_error(layout.size))?;

        let (offset, edge) = layout.icon_box_px();
        if edge == 0 {
            log::debug!("no room for `{id}` at {}% padding", self.style.padding);
            return Ok(surface.into_image());
        }

        let normalized = normalize_svg(markup, &self.style, layout.icon_box, convention);
        let tree = raster::load_svg(&normalized).map_err(|err| RenderError::RasterLoad {
            icon: id.to_string(),
            reason: err.to_string(),
        })?;
        let icon = raster::render_tree(&tree, edge).ok_or_else(|| canvas_error(edge))?;

        let shadow = Shadow::for_effect(self.style.effect, self.background);
        surface.with_shadow(shadow, |s| s.draw_image(&icon, offset, offset));

        Ok(surface.into_image())
    }

    /// Composes one icon and encodes it as PNG.
    pub fn render(
        &self,
        id: &IconId,
        markup: &str,
        convention: Option<DrawingConvention>,
    ) -> Result<RenderedIcon, RenderError> {
        let image = self.render_image(id, markup, convention)?;

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|source| RenderError::Encoding {
                icon: id.to_string(),
                source,
            })?;

        Ok(RenderedIcon::new(id.clone(), png))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BackgroundShape, Effect};

    const SOLID: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="#000"/></svg>"##;

    const OUTLINE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M3 12h18"/></svg>"#;

    fn flat_style() -> StyleConfig {
        StyleConfig::default()
            .with_foreground("#ff0000")
            .with_background("#0000ff")
            .with_shape(BackgroundShape::Square)
            .with_effect(Effect::None)
    }

    fn id() -> IconId {
        IconId::new("mdi", "square")
    }

    #[test]
    fn layout_matches_padding_math() {
        let layout = Layout::new(&StyleConfig::default().with_padding(20.0));
        assert!((layout.padding_px - 28.8).abs() < 1e-4);
        assert!((layout.icon_box - 86.4).abs() < 1e-4);
        assert_eq!(layout.icon_box_px(), (29, 86));
    }

    #[test]
    fn output_is_always_the_requested_size() {
        for padding in [0.0, 20.0, 39.0] {
            for shape in [BackgroundShape::Circle, BackgroundShape::Rounded, BackgroundShape::Square] {
                let style = StyleConfig::default().with_padding(padding).with_shape(shape);
                let compositor = Compositor::new(style).unwrap();
                let rendered = compositor.render(&id(), SOLID, None).unwrap();
                let decoded = image::load_from_memory(&rendered.png).unwrap();
                assert_eq!((decoded.width(), decoded.height()), (144, 144));
            }
        }
    }

    #[test]
    fn custom_sizes_are_honored() {
        let compositor = Compositor::new(StyleConfig::default().with_icon_size(72)).unwrap();
        let img = compositor.render_image(&id(), SOLID, None).unwrap();
        assert_eq!(img.dimensions(), (72, 72));
    }

    #[test]
    fn icon_is_painted_in_foreground_inside_padding() {
        let compositor = Compositor::new(flat_style()).unwrap();
        let img = compositor
            .render_image(&id(), SOLID, Some(DrawingConvention::Fill))
            .unwrap();
        assert_eq!(img.get_pixel(72, 72).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(10, 72).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(72, 140).0, [0, 0, 255, 255]);
    }

    #[test]
    fn outline_icons_are_stroked_not_filled() {
        let compositor = Compositor::new(flat_style().with_padding(0.0)).unwrap();
        let img = compositor
            .render_image(&id(), OUTLINE, Some(DrawingConvention::Stroke))
            .unwrap();
        // The horizontal stroke crosses the middle; the area above stays background.
        assert_eq!(img.get_pixel(72, 72).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(72, 30).0, [0, 0, 255, 255]);
    }

    #[test]
    fn shadow_effect_changes_pixels_below_icon() {
        let plain = Compositor::new(flat_style()).unwrap();
        let shadowed = Compositor::new(flat_style().with_effect(Effect::Shadow)).unwrap();

        let a = plain.render_image(&id(), SOLID, None).unwrap();
        let b = shadowed.render_image(&id(), SOLID, None).unwrap();

        // Row just under the 86px icon box starting at 29.
        assert_eq!(a.get_pixel(72, 118).0, [0, 0, 255, 255]);
        assert!(b.get_pixel(72, 118)[2] < 255);
    }

    #[test]
    fn collapsed_icon_box_draws_background_only() {
        for padding in [50.0, 60.0, 99.0] {
            let compositor = Compositor::new(flat_style().with_padding(padding)).unwrap();
            let img = compositor
                .render_image(&id(), SOLID, Some(DrawingConvention::Fill))
                .unwrap();
            assert_eq!(img.dimensions(), (144, 144));
            assert!(img.pixels().all(|p| p.0 == [0, 0, 255, 255]), "padding {padding}");

            let png = compositor.render(&id(), SOLID, None).unwrap().png;
            let decoded = image::load_from_memory(&png).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (144, 144));
        }
    }

    #[test]
    fn glow_spills_background_color_past_the_icon_box() {
        // Half-transparent background so the glow's added coverage shows.
        let style = flat_style().with_background("#0000ff80");
        let plain = Compositor::new(style.clone()).unwrap();
        let glowing = Compositor::new(style.with_effect(Effect::Glow)).unwrap();

        let a = plain.render_image(&id(), SOLID, None).unwrap();
        let b = glowing.render_image(&id(), SOLID, None).unwrap();

        // Three pixels past each side of the 86px box at 29.
        for (x, y) in [(72, 118), (72, 25), (25, 72), (118, 72)] {
            assert_eq!(a.get_pixel(x, y).0, [0, 0, 255, 128]);
            let glow = b.get_pixel(x, y);
            assert!(glow[3] > 128, "no glow at ({x}, {y})");
            assert_eq!((glow[0], glow[1]), (0, 0));
            assert!(glow[2] >= 250);
        }
        // Far corners stay untouched.
        assert_eq!(b.get_pixel(0, 0).0, [0, 0, 255, 128]);
        // The icon itself still sits on top.
        assert_eq!(b.get_pixel(72, 72).0, [255, 0, 0, 255]);
    }

    #[test]
    fn reused_compositor_renders_identically() {
        let compositor = Compositor::new(StyleConfig::default()).unwrap();
        let first = compositor.render_image(&id(), SOLID, None).unwrap();
        let second = compositor.render_image(&id(), SOLID, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unloadable_markup_names_the_icon() {
        let compositor = Compositor::new(StyleConfig::default()).unwrap();
        let err = compositor
            .render(&IconId::new("lucide", "broken"), "<svg><g></svg>", None)
            .unwrap_err();
        match err {
            RenderError::RasterLoad { icon, .. } => assert_eq!(icon, "lucide:broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_styles_are_rejected_up_front() {
        assert!(Compositor::new(StyleConfig::default().with_padding(100.0)).is_err());
        assert!(Compositor::new(StyleConfig::default().with_background("???")).is_err());
    }
}
