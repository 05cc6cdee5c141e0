/// Paint command set executed in order by the rasterizer

use crate::rendering::layout::{Point, Rect};

/// Straight (non-premultiplied) RGBA colour.
pub type Rgba = (u8, u8, u8, u8);

pub const WHITE: Rgba = (255, 255, 255, 255);
pub const BLACK: Rgba = (0, 0, 0, 255);

/// How a closed shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Fill,
    /// Outline of the given width, drawn inward from the shape's edge.
    Stroke(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Overwrite every pixel.
    Clear { rgba: Rgba },
    /// Row-by-row blend from `top` at row 0 toward `bottom` at the last row.
    VerticalGradient { top: Rgba, bottom: Rgba },
    Line {
        from: Point,
        to: Point,
        width: f32,
        rgba: Rgba,
    },
    RoundedRect {
        rect: Rect,
        radius: u32,
        style: Style,
        rgba: Rgba,
    },
    Ellipse {
        rect: Rect,
        style: Style,
        rgba: Rgba,
    },
    /// Make everything outside the rounded canvas outline fully transparent.
    RoundedMask { radius: u32 },
    /// Draw `text` with its top-left at `(x, y)` and a line height of `size` pixels.
    Text {
        x: i32,
        y: i32,
        size: u32,
        text: String,
        rgba: Rgba,
    },
}

impl PaintCommand {
    /// Short name used in debug logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PaintCommand::Clear { .. } => "clear",
            PaintCommand::VerticalGradient { .. } => "gradient",
            PaintCommand::Line { .. } => "line",
            PaintCommand::RoundedRect { .. } => "rounded_rect",
            PaintCommand::Ellipse { .. } => "ellipse",
            PaintCommand::RoundedMask { .. } => "rounded_mask",
            PaintCommand::Text { .. } => "text",
        }
    }
}
