/// Rasterizer: executes paint commands against an RGBA buffer and encodes PNG

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use log::debug;

use crate::error::{Error, Result};
use crate::rendering::layout::{
    ellipse_contains, rounded_rect_contains, segment_distance, Point, Rect,
};
use crate::rendering::paint::{PaintCommand, Rgba, Style};
use crate::rendering::text::Font;

/// Allocate a transparent `size` x `size` buffer and run `commands` on it in order.
///
/// `Text` commands are skipped when `font` is `None`.
pub fn rasterize(size: u32, commands: &[PaintCommand], font: Option<&Font>) -> Result<RgbaImage> {
    if size == 0 {
        return Err(Error::RenderError("canvas size must be non-zero".into()));
    }
    let mut img = RgbaImage::new(size, size);
    debug!("rasterizing {} commands at {}px", commands.len(), size);

    for cmd in commands {
        match cmd {
            PaintCommand::Clear { rgba } => {
                for px in img.pixels_mut() {
                    px.0 = [rgba.0, rgba.1, rgba.2, rgba.3];
                }
            }
            PaintCommand::VerticalGradient { top, bottom } => fill_gradient(&mut img, *top, *bottom),
            PaintCommand::Line { from, to, width, rgba } => {
                draw_line(&mut img, *from, *to, *width, *rgba)
            }
            PaintCommand::RoundedRect { rect, radius, style, rgba } => {
                fill_shape(&mut img, rect, *style, *rgba, |rc, inset, x, y| {
                    rounded_rect_contains(rc, radius.saturating_sub(inset) as f32, x, y)
                })
            }
            PaintCommand::Ellipse { rect, style, rgba } => {
                fill_shape(&mut img, rect, *style, *rgba, |rc, _, x, y| {
                    ellipse_contains(rc, x, y)
                })
            }
            PaintCommand::RoundedMask { radius } => apply_rounded_mask(&mut img, *radius),
            PaintCommand::Text { x, y, size, text, rgba } => match font {
                Some(font) => draw_text(&mut img, font, *x, *y, *size, text, *rgba),
                None => debug!("no font available, skipping label {:?}", text),
            },
        }
    }

    Ok(img)
}

/// Encode a buffer as an RGBA8 PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

/// Composite `src` over `dst` with `coverage` (0..=255) scaling the source alpha.
/// Integer arithmetic keeps the result identical across platforms.
pub fn blend(dst: &mut image::Rgba<u8>, src: Rgba, coverage: u8) {
    let sa = (src.3 as u32 * coverage as u32 + 127) / 255;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        dst.0 = [src.0, src.1, src.2, 255];
        return;
    }

    let inv = 255 - sa;
    let da = dst.0[3] as u32 * inv;
    let out = sa * 255 + da;
    let mix = |s: u8, d: u8| ((s as u32 * sa * 255 + d as u32 * da + out / 2) / out) as u8;
    dst.0 = [
        mix(src.0, dst.0[0]),
        mix(src.1, dst.0[1]),
        mix(src.2, dst.0[2]),
        ((out + 127) / 255) as u8,
    ];
}

fn lerp_channel(a: u8, b: u8, ratio: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * ratio) as u8
}

fn fill_gradient(img: &mut RgbaImage, top: Rgba, bottom: Rgba) {
    let h = img.height();
    for y in 0..h {
        let ratio = y as f64 / h as f64;
        let c = (
            lerp_channel(top.0, bottom.0, ratio),
            lerp_channel(top.1, bottom.1, ratio),
            lerp_channel(top.2, bottom.2, ratio),
            lerp_channel(top.3, bottom.3, ratio),
        );
        for x in 0..img.width() {
            blend(img.get_pixel_mut(x, y), c, 255);
        }
    }
}

fn draw_line(img: &mut RgbaImage, from: Point, to: Point, width: f32, rgba: Rgba) {
    if width <= 0.0 {
        return;
    }
    let half = width / 2.0;
    let x0 = (from.x.min(to.x) - half).floor() as i32;
    let y0 = (from.y.min(to.y) - half).floor() as i32;
    let x1 = (from.x.max(to.x) + half).ceil() as i32;
    let y1 = (from.y.max(to.y) + half).ceil() as i32;
    let bounds = Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32);
    let Some((cx0, cy0, cx1, cy1)) = bounds.clip(img.width(), img.height()) else {
        return;
    };

    for y in cy0..cy1 {
        for x in cx0..cx1 {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if segment_distance(from, to, p) <= half {
                blend(img.get_pixel_mut(x, y), rgba, 255);
            }
        }
    }
}

/// Fill or stroke a closed shape. `contains` is called with the rect to
/// test against and how far it is inset from the outer edge (0 for the
/// outer shape, the stroke width for a stroke's inner cut-out).
fn fill_shape<F>(img: &mut RgbaImage, rect: &Rect, style: Style, rgba: Rgba, contains: F)
where
    F: Fn(&Rect, u32, f32, f32) -> bool,
{
    let Some((x0, y0, x1, y1)) = rect.clip(img.width(), img.height()) else {
        return;
    };
    let inner = match style {
        Style::Fill => None,
        Style::Stroke(0) => return,
        Style::Stroke(w) => Some((rect.inset(w), w)),
    };

    for y in y0..y1 {
        for x in x0..x1 {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if !contains(rect, 0, px, py) {
                continue;
            }
            if let Some((inner, w)) = &inner {
                if contains(inner, *w, px, py) {
                    continue;
                }
            }
            blend(img.get_pixel_mut(x, y), rgba, 255);
        }
    }
}

fn apply_rounded_mask(img: &mut RgbaImage, radius: u32) {
    let canvas = Rect::new(0, 0, img.width(), img.height());
    let r = radius as f32;
    for (x, y, px) in img.enumerate_pixels_mut() {
        if !rounded_rect_contains(&canvas, r, x as f32 + 0.5, y as f32 + 0.5) {
            px.0 = [0, 0, 0, 0];
        }
    }
}

fn draw_text(img: &mut RgbaImage, font: &Font, x: i32, y: i32, size: u32, text: &str, rgba: Rgba) {
    if size == 0 {
        return;
    }
    let (w, h) = (img.width() as i64, img.height() as i64);
    let (x, y) = (x as i64, y as i64);
    let lh = font.line_height() as i64;
    let s = size as i64;

    for placed in font.layout(text) {
        let g = placed.glyph;
        let tx0 = (x + font.to_px_floor(placed.x, size)).max(0);
        let ty0 = (y + font.to_px_floor(placed.y, size)).max(0);
        let tx1 = (x + font.to_px_ceil(placed.x + g.width as i64, size)).min(w);
        let ty1 = (y + font.to_px_ceil(placed.y + g.height as i64, size)).min(h);

        // Texel under a pixel centre: floor(((p - origin + 0.5) * lh - units * size) / size)
        let texel = |p: i64, origin: i64, units: i64| {
            ((2 * (p - origin) + 1) * lh - 2 * units * s).div_euclid(2 * s)
        };
        for ty in ty0..ty1 {
            let v = texel(ty, y, placed.y);
            if v < 0 || v >= g.height as i64 {
                continue;
            }
            for tx in tx0..tx1 {
                let u = texel(tx, x, placed.x);
                if u < 0 || u >= g.width as i64 {
                    continue;
                }
                let cov = font.coverage(g.x + u as u32, g.y + v as u32);
                if cov > 0 {
                    blend(img.get_pixel_mut(tx as u32, ty as u32), rgba, cov);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::paint::{BLACK, WHITE};

    #[test]
    fn rasterize_allocates_transparent_square() {
        let img = rasterize(16, &[], None).unwrap();
        assert_eq!(img.dimensions(), (16, 16));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn rasterize_rejects_zero_size() {
        assert!(matches!(rasterize(0, &[], None), Err(Error::RenderError(_))));
    }

    #[test]
    fn gradient_matches_row_formula() {
        let cmds = [PaintCommand::VerticalGradient {
            top: (66, 133, 244, 255),
            bottom: (52, 168, 83, 255),
        }];
        let img = rasterize(192, &cmds, None).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [66, 133, 244, 255]);
        // ratio 96/192 = 0.5 -> 59, 150.5, 163.5 truncated
        assert_eq!(img.get_pixel(100, 96).0, [59, 150, 163, 255]);
    }

    #[test]
    fn rounded_mask_clears_corners_only() {
        let cmds = [
            PaintCommand::Clear { rgba: BLACK },
            PaintCommand::RoundedMask { radius: 8 },
        ];
        let img = rasterize(64, &cmds, None).unwrap();
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(63, 63).0[3], 0);
        assert_eq!(img.get_pixel(32, 32).0[3], 255);
        assert_eq!(img.get_pixel(32, 0).0[3], 255);
    }

    #[test]
    fn stroke_leaves_interior_untouched() {
        let cmds = [PaintCommand::RoundedRect {
            rect: Rect::new(4, 4, 20, 20),
            radius: 0,
            style: Style::Stroke(2),
            rgba: WHITE,
        }];
        let img = rasterize(32, &cmds, None).unwrap();
        assert_eq!(img.get_pixel(4, 10).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(5, 10).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(6, 10).0[3], 0);
        assert_eq!(img.get_pixel(14, 14).0[3], 0);
    }

    #[test]
    fn ellipse_fill_covers_centre() {
        let cmds = [PaintCommand::Ellipse {
            rect: Rect::new(0, 0, 10, 10),
            style: Style::Fill,
            rgba: WHITE,
        }];
        let img = rasterize(10, &cmds, None).unwrap();
        assert_eq!(img.get_pixel(5, 5).0[3], 255);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn line_is_clipped_to_canvas() {
        let cmds = [PaintCommand::Line {
            from: Point::new(-10.0, 4.5),
            to: Point::new(40.0, 4.5),
            width: 1.0,
            rgba: WHITE,
        }];
        let img = rasterize(8, &cmds, None).unwrap();
        assert!((0..8).all(|x| img.get_pixel(x, 4).0[3] == 255));
        assert!((0..8).all(|x| img.get_pixel(x, 6).0[3] == 0));
    }

    #[test]
    fn text_without_font_is_skipped() {
        let cmds = [PaintCommand::Text {
            x: 0,
            y: 0,
            size: 7,
            text: "P".into(),
            rgba: WHITE,
        }];
        let img = rasterize(8, &cmds, None).unwrap();
        assert!(img.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn text_draws_builtin_glyph_pixels() {
        let font = Font::builtin();
        let cmds = [PaintCommand::Text {
            x: 1,
            y: 0,
            size: 7,
            text: "P".into(),
            rgba: WHITE,
        }];
        let img = rasterize(8, &cmds, Some(&font)).unwrap();
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(5, 0).0[3], 0);
        assert_eq!(img.get_pixel(5, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn blend_translucent_over_opaque_stays_opaque() {
        let mut px = image::Rgba([0, 0, 0, 255]);
        blend(&mut px, (255, 255, 255, 230), 255);
        assert_eq!(px.0[3], 255);
        assert_eq!(px.0[0], 230);
    }

    #[test]
    fn encode_png_writes_signature() {
        let img = rasterize(4, &[PaintCommand::Clear { rgba: WHITE }], None).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }
}
