//! Bitmap fonts for icon labels.
//!
//! A [`Font`] is a set of glyph rectangles into a single-channel coverage
//! atlas. The built-in font is a 5x7 pixel face compiled into the binary; a
//! custom font can be loaded from a JSON descriptor plus a PNG atlas.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use image::{GrayImage, Luma};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Metrics for a single character in the font atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Top-left pixel X of the glyph region in the atlas.
    pub x: u32,
    /// Top-left pixel Y of the glyph region in the atlas.
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the glyph's top-left corner, in font units.
    pub x_offset: i32,
    pub y_offset: i32,
    /// How far to advance the pen after this glyph, in font units.
    pub x_advance: u32,
}

/// A glyph positioned relative to the text origin, in font units.
///
/// Pixel positions are derived with [`Font::to_px_floor`] and
/// [`Font::to_px_ceil`] so drawing and [`Font::measure`] agree exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph<'a> {
    pub glyph: &'a Glyph,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone)]
pub struct Font {
    name: String,
    glyphs: HashMap<char, Glyph>,
    line_height: u32,
    atlas: GrayImage,
}

const BUILTIN_W: u32 = 5;
const BUILTIN_H: u32 = 7;
const BUILTIN_ADVANCE: u32 = 6;

// Rows top to bottom; bit 4 is the leftmost column.
const BUILTIN_GLYPHS: &[(char, [u8; 7])] = &[
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('M', [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11]),
    ('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('X', [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04]),
    ('Z', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('-', [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
    ('!', [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04]),
];

impl Font {
    /// The 5x7 face compiled into the crate. Always available.
    pub fn builtin() -> Self {
        let count = BUILTIN_GLYPHS.len() as u32;
        let mut atlas = GrayImage::new(BUILTIN_W * count, BUILTIN_H);
        let mut glyphs = HashMap::with_capacity(BUILTIN_GLYPHS.len());

        for (i, (ch, rows)) in BUILTIN_GLYPHS.iter().enumerate() {
            let x0 = i as u32 * BUILTIN_W;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..BUILTIN_W {
                    if bits & (1 << (BUILTIN_W - 1 - col)) != 0 {
                        atlas.put_pixel(x0 + col, row as u32, Luma([255]));
                    }
                }
            }
            glyphs.insert(
                *ch,
                Glyph {
                    x: x0,
                    y: 0,
                    width: BUILTIN_W,
                    height: BUILTIN_H,
                    x_offset: 0,
                    y_offset: 0,
                    x_advance: BUILTIN_ADVANCE,
                },
            );
        }

        Self {
            name: "builtin-5x7".to_string(),
            glyphs,
            line_height: BUILTIN_H,
            atlas,
        }
    }

    /// Build a font from a JSON descriptor and an already-decoded coverage atlas.
    ///
    /// Glyph rectangles must lie inside the atlas and `line_height` must be
    /// non-zero. Code points that are not valid `char`s are skipped.
    pub fn from_json(name: &str, json: &str, atlas: GrayImage) -> Result<Self> {
        let raw: RawFont = serde_json::from_str(json)
            .map_err(|e| Error::FontError(format!("{}: malformed descriptor: {}", name, e)))?;

        if raw.line_height == 0 {
            return Err(Error::FontError(format!("{}: line_height must be non-zero", name)));
        }
        if (raw.texture_width, raw.texture_height) != atlas.dimensions() {
            return Err(Error::FontError(format!(
                "{}: descriptor expects a {}x{} atlas, found {}x{}",
                name,
                raw.texture_width,
                raw.texture_height,
                atlas.width(),
                atlas.height()
            )));
        }

        let mut glyphs = HashMap::with_capacity(raw.glyphs.len());
        for g in raw.glyphs {
            let Some(ch) = char::from_u32(g.id) else {
                continue;
            };
            let outside = |start: u32, len: u32, limit: u32| {
                start.checked_add(len).map_or(true, |end| end > limit)
            };
            if outside(g.x, g.width, atlas.width()) || outside(g.y, g.height, atlas.height()) {
                return Err(Error::FontError(format!(
                    "{}: glyph {:?} lies outside the atlas",
                    name, ch
                )));
            }
            glyphs.insert(
                ch,
                Glyph {
                    x: g.x,
                    y: g.y,
                    width: g.width,
                    height: g.height,
                    x_offset: g.x_offset,
                    y_offset: g.y_offset,
                    x_advance: g.x_advance,
                },
            );
        }

        Ok(Self {
            name: name.to_string(),
            glyphs,
            line_height: raw.line_height,
            atlas,
        })
    }

    /// Load a descriptor from disk. The atlas named by its `page` field is
    /// resolved relative to the descriptor's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let name = path.display().to_string();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::FontError(format!("{}: {}", name, e)))?;

        #[derive(Deserialize)]
        struct Page {
            page: String,
        }
        let page: Page = serde_json::from_str(&json)
            .map_err(|e| Error::FontError(format!("{}: malformed descriptor: {}", name, e)))?;

        let atlas_path = path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&page.page);
        let img = image::open(&atlas_path)
            .map_err(|e| Error::FontError(format!("{}: {}", atlas_path.display(), e)))?;

        let atlas = if img.color().has_alpha() {
            let la = img.to_luma_alpha8();
            GrayImage::from_fn(la.width(), la.height(), |x, y| Luma([la.get_pixel(x, y)[1]]))
        } else {
            img.to_luma8()
        };

        Self::from_json(&name, &json, atlas)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    /// Look up a glyph, falling back to the ASCII upper-case form.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
    }

    /// True when at least one visible character of `text` can be drawn.
    pub fn covers_any(&self, text: &str) -> bool {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .any(|c| self.glyph(c).is_some())
    }

    /// Coverage (0..=255) of an atlas pixel, 0 outside the atlas.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        self.atlas.get_pixel_checked(x, y).map_or(0, |p| p[0])
    }

    /// Font units to pixels at a line height of `size`, rounded down.
    pub fn to_px_floor(&self, units: i64, size: u32) -> i64 {
        (units * size as i64).div_euclid(self.line_height as i64)
    }

    /// Font units to pixels at a line height of `size`, rounded up.
    pub fn to_px_ceil(&self, units: i64, size: u32) -> i64 {
        let lh = self.line_height as i64;
        (units * size as i64 + lh - 1).div_euclid(lh)
    }

    /// Position every drawable glyph of `text`. Characters without a glyph
    /// are skipped and do not advance.
    pub fn layout(&self, text: &str) -> Vec<PlacedGlyph<'_>> {
        let mut pen = 0i64;
        let mut placed = Vec::new();

        for ch in text.chars() {
            let Some(glyph) = self.glyph(ch) else {
                continue;
            };
            placed.push(PlacedGlyph {
                glyph,
                x: pen + glyph.x_offset as i64,
                y: glyph.y_offset as i64,
            });
            pen += glyph.x_advance as i64;
        }
        placed
    }

    /// Ink box `(width, height)` of `text` measured from the origin, rounded
    /// up to whole pixels.
    pub fn measure(&self, text: &str, size: u32) -> (u32, u32) {
        let (mut right, mut bottom) = (0i64, 0i64);
        for p in self.layout(text) {
            right = right.max(p.x + p.glyph.width as i64);
            bottom = bottom.max(p.y + p.glyph.height as i64);
        }
        let to_px = |units: i64| self.to_px_ceil(units, size).clamp(0, u32::MAX as i64) as u32;
        (to_px(right), to_px(bottom))
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::builtin()
    }
}

// Character IDs are Unicode code points in JSON.

#[derive(Deserialize)]
struct RawGlyph {
    id: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    #[serde(default)]
    x_offset: i32,
    #[serde(default)]
    y_offset: i32,
    x_advance: u32,
}

#[derive(Deserialize)]
struct RawFont {
    line_height: u32,
    texture_width: u32,
    texture_height: u32,
    glyphs: Vec<RawGlyph>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_glyph_json() -> &'static str {
        r#"{
            "line_height": 10,
            "texture_width": 8,
            "texture_height": 10,
            "page": "atlas.png",
            "glyphs": [
                { "id": 65, "x": 0, "y": 0, "width": 4, "height": 10, "x_advance": 5 },
                { "id": 66, "x": 4, "y": 0, "width": 4, "height": 8,
                  "x_offset": 0, "y_offset": 2, "x_advance": 5 }
            ]
        }"#
    }

    #[test]
    fn builtin_has_uppercase_and_digits() {
        let f = Font::builtin();
        assert!(f.glyph('P').is_some());
        assert!(f.glyph('7').is_some());
        assert_eq!(f.glyph('p'), f.glyph('P'));
        assert!(f.glyph('@').is_none());
    }

    #[test]
    fn builtin_p_bitmap_matches_rows() {
        let f = Font::builtin();
        let g = f.glyph('P').unwrap().clone();
        // top row 11110
        assert_eq!(f.coverage(g.x, g.y), 255);
        assert_eq!(f.coverage(g.x + 4, g.y), 0);
        // bottom row 10000
        assert_eq!(f.coverage(g.x, g.y + 6), 255);
        assert_eq!(f.coverage(g.x + 1, g.y + 6), 0);
    }

    #[test]
    fn measure_scales_to_line_height() {
        let f = Font::builtin();
        assert_eq!(f.measure("P", 7), (5, 7));
        assert_eq!(f.measure("PWA", 14), (34, 14));
        assert_eq!(f.measure("", 14), (0, 0));
    }

    #[test]
    fn layout_skips_missing_glyphs() {
        let f = Font::builtin();
        let placed = f.layout("A@B");
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[1].x, 6);
        assert!(!f.covers_any("@@ "));
        assert!(f.covers_any("@A"));
    }

    #[test]
    fn from_json_parses_glyphs_and_offsets() {
        let f = Font::from_json("t", two_glyph_json(), GrayImage::new(8, 10)).unwrap();
        assert_eq!(f.line_height(), 10);
        let b = f.glyph('B').unwrap();
        assert_eq!(b.y_offset, 2);
        assert_eq!(f.measure("AB", 20), (18, 20));
    }

    #[test]
    fn from_json_rejects_atlas_mismatch() {
        let err = Font::from_json("t", two_glyph_json(), GrayImage::new(4, 4)).unwrap_err();
        assert!(matches!(err, Error::FontError(_)));
    }

    #[test]
    fn from_json_rejects_zero_line_height() {
        let json = r#"{"line_height":0,"texture_width":1,"texture_height":1,"glyphs":[]}"#;
        assert!(Font::from_json("t", json, GrayImage::new(1, 1)).is_err());
    }

    #[test]
    fn from_json_rejects_glyph_rect_that_wraps_past_u32() {
        let json = r#"{
            "line_height": 6, "texture_width": 4, "texture_height": 6,
            "glyphs": [{ "id": 80, "x": 4294967295, "y": 0, "width": 1, "height": 6, "x_advance": 5 }]
        }"#;
        let err = Font::from_json("t", json, GrayImage::new(4, 6)).unwrap_err();
        assert!(matches!(err, Error::FontError(_)));
    }

    #[test]
    fn coverage_outside_atlas_is_zero() {
        let f = Font::builtin();
        assert_eq!(f.coverage(u32::MAX, 0), 0);
        assert_eq!(f.coverage(0, 7), 0);
    }

    #[test]
    fn measured_box_matches_pixel_rounding() {
        // 1000-unit line height makes the float and integer paths diverge.
        let json = r#"{
            "line_height": 1000, "texture_width": 8, "texture_height": 10,
            "glyphs": [{ "id": 65, "x": 0, "y": 0, "width": 4, "height": 10,
                         "x_offset": 333, "x_advance": 5 }]
        }"#;
        let f = Font::from_json("t", json, GrayImage::new(8, 10)).unwrap();
        let p = &f.layout("A")[0];
        let (w, _) = f.measure("A", 999);
        assert_eq!(f.to_px_floor(p.x, 999), 332);
        assert_eq!(f.to_px_ceil(p.x + 4, 999) as u32, w);
        assert_eq!(w, 337);
    }

    #[test]
    fn load_missing_descriptor_is_font_error() {
        let err = Font::load(Path::new("/nonexistent/font.json")).unwrap_err();
        assert!(matches!(err, Error::FontError(_)));
    }
}
