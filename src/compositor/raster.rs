//! SVG rasterization and pixel compositing using resvg/usvg.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

// ============================================================================
// SVG Rendering
// ============================================================================

/// Parses SVG markup into a render tree.
pub fn load_svg(svg_data: &str) -> Result<Tree, resvg::usvg::Error> {
    Tree::from_str(svg_data, &Options::default())
}

/// Renders a tree into a `box_size` × `box_size` image.
///
/// The drawing is scaled to fit the box while preserving aspect ratio and
/// centered along the shorter axis. Returns `None` for a zero-sized box.
pub fn render_tree(tree: &Tree, box_size: u32) -> Option<RgbaImage> {
    let mut pixmap = Pixmap::new(box_size, box_size)?;

    let svg_size = tree.size();
    let target = box_size as f32;
    let scale = target / svg_size.width().max(svg_size.height());
    let dx = (target - svg_size.width() * scale) / 2.0;
    let dy = (target - svg_size.height() * scale) / 2.0;

    let transform = Transform::from_row(scale, 0.0, 0.0, scale, dx, dy);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap (premultiplied) to an image::RgbaImage.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    img
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination). Pixels falling
/// outside the destination are dropped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel_mut(dx as u32, dy as u32);
        *dst_pixel = alpha_blend(*src_pixel, *dst_pixel);
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    if src[3] == 0 {
        return dst;
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="#ff0000"/></svg>"##;

    const WIDE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect width="200" height="100" fill="#00ff00"/></svg>"##;

    #[test]
    fn render_fills_the_box() {
        let tree = load_svg(SQUARE_SVG).unwrap();
        let img = render_tree(&tree, 50).unwrap();
        assert_eq!(img.dimensions(), (50, 50));
        assert_eq!(img.get_pixel(25, 25).0, [255, 0, 0, 255]);
    }

    #[test]
    fn wide_drawings_are_centered_vertically() {
        let tree = load_svg(WIDE_SVG).unwrap();
        let img = render_tree(&tree, 40).unwrap();
        assert_eq!(img.dimensions(), (40, 40));
        assert_eq!(img.get_pixel(20, 2)[3], 0, "band above the drawing is empty");
        assert_eq!(img.get_pixel(20, 20).0, [0, 255, 0, 255]);
    }

    #[test]
    fn zero_box_renders_nothing() {
        let tree = load_svg(SQUARE_SVG).unwrap();
        assert!(render_tree(&tree, 0).is_none());
    }

    #[test]
    fn malformed_svg_fails_to_load() {
        assert!(load_svg("<svg><g></svg>").is_err());
        assert!(load_svg("not svg at all").is_err());
    }

    #[test]
    fn composite_simple() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src, 3, 3);

        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn composite_clips_to_destination() {
        let mut dest = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));

        composite_over(&mut dest, &src, -2, 2);

        assert_eq!(dest.get_pixel(1, 3).0, [255, 255, 255, 255]);
        assert_eq!(dest.get_pixel(3, 3).0, [0, 0, 0, 255]);
        assert_eq!(dest.get_pixel(1, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn composite_with_transparency() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]));

        composite_over(&mut dest, &src, 0, 0);

        let pixel = dest.get_pixel(0, 0);
        assert!(pixel[0] > 0, "Should have some red");
        assert!(pixel[2] > 0, "Should have some blue");
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn composite_onto_transparent_keeps_source() {
        let mut dest = RgbaImage::new(2, 2);
        let src = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 128]));

        composite_over(&mut dest, &src, 0, 0);

        assert_eq!(dest.get_pixel(1, 1).0, [10, 20, 30, 128]);
    }
}
