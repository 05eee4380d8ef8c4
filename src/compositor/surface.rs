//! Drawing surface with canvas-like background and shadow semantics.

use image::{imageops, Rgba, RgbaImage};
use resvg::tiny_skia::{FillRule, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Transform};

use super::raster::{composite_over, pixmap_to_rgba_image};
use crate::style::{BackgroundShape, Color, Effect};

// ============================================================================
// Shadow
// ============================================================================

/// A blurred, offset copy of the next drawn image, painted beneath it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    /// Blur radius in canvas units; the Gaussian sigma is half of it.
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Shadow {
    /// Shadow settings for an export effect. Glow reuses the background
    /// color with no offset; `Effect::None` yields no shadow.
    pub fn for_effect(effect: Effect, background: Color) -> Option<Self> {
        match effect {
            Effect::Shadow => Some(Self {
                color: Color::BLACK.with_opacity(0.3),
                blur: 16.0,
                offset_x: 0.0,
                offset_y: 8.0,
            }),
            Effect::Glow => Some(Self {
                color: background,
                blur: 20.0,
                offset_x: 0.0,
                offset_y: 0.0,
            }),
            Effect::None => None,
        }
    }

    /// Builds the shadow layer for `image` drawn at `(x, y)` on a canvas of
    /// `width` × `height`.
    fn cast(&self, image: &RgbaImage, width: u32, height: u32, x: i32, y: i32) -> RgbaImage {
        let Color { r, g, b, a } = self.color;
        let mut layer = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0]));

        let origin_x = x + self.offset_x.round() as i32;
        let origin_y = y + self.offset_y.round() as i32;
        for (sx, sy, pixel) in image.enumerate_pixels() {
            let dx = origin_x + sx as i32;
            let dy = origin_y + sy as i32;
            if dx < 0 || dy < 0 || dx >= width as i32 || dy >= height as i32 {
                continue;
            }
            let alpha = pixel[3] as u32 * a as u32 / 255;
            layer.get_pixel_mut(dx as u32, dy as u32)[3] = alpha as u8;
        }

        if self.blur > 0.0 {
            layer = imageops::blur(&layer, self.blur / 2.0);
        }
        layer
    }
}

// ============================================================================
// Surface
// ============================================================================

/// A square RGBA drawing surface.
///
/// Shadow state only exists inside [`Surface::with_shadow`], so it can never
/// leak from one draw into the next.
pub struct Surface {
    canvas: RgbaImage,
    shadow: Option<Shadow>,
}

impl Surface {
    /// Creates a fully transparent `size` × `size` surface.
    pub fn new(size: u32) -> Self {
        Self {
            canvas: RgbaImage::new(size, size),
            shadow: None,
        }
    }

    pub fn size(&self) -> u32 {
        self.canvas.width()
    }

    /// The shadow applied to draws, if any.
    pub fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }

    /// Fills the surface with `color`, clipped to `shape`.
    ///
    /// The clip only applies to this fill. Returns `None` when no raster of
    /// the surface's size can be allocated, leaving the surface untouched.
    pub fn fill_background(&mut self, shape: BackgroundShape, color: Color) -> Option<()> {
        let size = self.size();
        let mut pixmap = Pixmap::new(size, size)?;
        let rect = Rect::from_xywh(0.0, 0.0, size as f32, size as f32)?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;

        let clip = match clip_path(shape, size as f32) {
            Some(path) => {
                let mut mask = Mask::new(size, size)?;
                mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
                Some(mask)
            }
            None => None,
        };
        pixmap.fill_rect(rect, &paint, Transform::identity(), clip.as_ref());

        composite_over(&mut self.canvas, &pixmap_to_rgba_image(&pixmap), 0, 0);
        Some(())
    }

    /// Runs `draw` with `shadow` active, then clears it.
    pub fn with_shadow<R>(&mut self, shadow: Option<Shadow>, draw: impl FnOnce(&mut Self) -> R) -> R {
        self.shadow = shadow;
        let result = draw(self);
        self.shadow = None;
        result
    }

    /// Draws `image` with its top-left corner at `(x, y)`, preceded by the
    /// active shadow.
    pub fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        if let Some(shadow) = self.shadow {
            let (width, height) = self.canvas.dimensions();
            let layer = shadow.cast(image, width, height, x, y);
            composite_over(&mut self.canvas, &layer, 0, 0);
        }
        composite_over(&mut self.canvas, image, x, y);
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }
}

/// Outline of the background shape, or `None` when no clipping is needed.
fn clip_path(shape: BackgroundShape, size: f32) -> Option<Path> {
    let radius = shape.corner_radius(size);
    match shape {
        BackgroundShape::Square => None,
        BackgroundShape::Circle => PathBuilder::from_circle(size / 2.0, size / 2.0, radius),
        BackgroundShape::Rounded => {
            let mut pb = PathBuilder::new();
            pb.move_to(radius, 0.0);
            pb.line_to(size - radius, 0.0);
            pb.quad_to(size, 0.0, size, radius);
            pb.line_to(size, size - radius);
            pb.quad_to(size, size, size - radius, size);
            pb.line_to(radius, size);
            pb.quad_to(0.0, size, 0.0, size - radius);
            pb.line_to(0.0, radius);
            pb.quad_to(0.0, 0.0, radius, 0.0);
            pb.close();
            pb.finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn circle_background_leaves_corners_transparent() {
        let mut surface = Surface::new(64);
        surface.fill_background(BackgroundShape::Circle, BLUE).unwrap();
        let img = surface.into_image();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(32, 32).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(32, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn rounded_background_clips_only_the_corners() {
        let mut surface = Surface::new(100);
        surface.fill_background(BackgroundShape::Rounded, BLUE).unwrap();
        let img = surface.into_image();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(50, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(0, 50).0, [0, 0, 255, 255]);
    }

    #[test]
    fn square_background_covers_everything() {
        let mut surface = Surface::new(16);
        surface.fill_background(BackgroundShape::Square, BLUE).unwrap();
        let img = surface.into_image();
        assert!(img.pixels().all(|p| p.0 == [0, 0, 255, 255]));
    }

    #[test]
    fn empty_surface_reports_failed_background() {
        let mut surface = Surface::new(0);
        assert!(surface.fill_background(BackgroundShape::Square, BLUE).is_none());
        assert_eq!(surface.into_image().dimensions(), (0, 0));
    }

    #[test]
    fn shadow_is_scoped_to_one_draw() {
        let mut surface = Surface::new(8);
        let shadow = Shadow::for_effect(Effect::Shadow, BLUE);
        let seen = surface.with_shadow(shadow, |s| s.shadow().copied());
        assert_eq!(seen, shadow);
        assert!(surface.shadow().is_none());
    }

    #[test]
    fn effects_map_to_canvas_shadows() {
        let shadow = Shadow::for_effect(Effect::Shadow, BLUE).unwrap();
        assert_eq!(shadow.color, Color::rgba(0, 0, 0, 77));
        assert_eq!((shadow.offset_x, shadow.offset_y), (0.0, 8.0));

        let glow = Shadow::for_effect(Effect::Glow, BLUE).unwrap();
        assert_eq!(glow.color, BLUE);
        assert_eq!((glow.offset_x, glow.offset_y), (0.0, 0.0));

        assert!(Shadow::for_effect(Effect::None, BLUE).is_none());
    }

    #[test]
    fn shadow_darkens_below_the_drawn_image() {
        let icon = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        let draw = |shadow: Option<Shadow>| {
            let mut surface = Surface::new(64);
            surface.fill_background(BackgroundShape::Square, BLUE).unwrap();
            surface.with_shadow(shadow, |s| s.draw_image(&icon, 22, 22));
            surface.into_image()
        };

        let plain = draw(None);
        let shadowed = draw(Shadow::for_effect(Effect::Shadow, BLUE));

        // Just below the icon: untouched background without a shadow.
        assert_eq!(plain.get_pixel(32, 45).0, [0, 0, 255, 255]);
        assert!(shadowed.get_pixel(32, 45)[2] < 255);
        // The icon itself is drawn over its shadow.
        assert_eq!(shadowed.get_pixel(32, 32).0, [255, 255, 255, 255]);
    }
}
