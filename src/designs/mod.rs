//! Icon designs.
//!
//! A design turns an edge length into the ordered list of paint commands
//! that draw it. Designs never touch pixels themselves; the rasterizer in
//! [`crate::rendering::raster`] does that.

pub mod gradient;
pub mod productivity;

use std::fmt;

use log::debug;

use crate::rendering::layout::centered;
use crate::rendering::paint::{PaintCommand, Rgba};
use crate::rendering::text::Font;

pub use gradient::GradientDesign;
pub use productivity::ProductivityDesign;

/// Which design to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IconStyle {
    /// Blue-to-green gradient square with a "P" and a "PWA" label
    #[default]
    Gradient,
    /// Black-and-white clipboard checklist
    Productivity,
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconStyle::Gradient => f.write_str("gradient"),
            IconStyle::Productivity => f.write_str("productivity"),
        }
    }
}

/// Core trait for icon designs
pub trait IconDesign {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Paint commands for a `size` x `size` icon. Labels are only emitted
    /// when `font` is present and can draw them.
    fn paint(&self, size: u32, font: Option<&Font>) -> Vec<PaintCommand>;
}

/// Create the design for a style
pub fn design_for(style: IconStyle) -> Box<dyn IconDesign> {
    match style {
        IconStyle::Gradient => Box::new(GradientDesign),
        IconStyle::Productivity => Box::new(ProductivityDesign),
    }
}

/// Horizontally centred text command, or `None` when the font has no glyph
/// for any character of `text`.
pub(crate) fn centered_label(
    font: &Font,
    canvas: u32,
    text: &str,
    size: u32,
    y: impl FnOnce(u32) -> i32,
    rgba: Rgba,
) -> Option<PaintCommand> {
    if !font.covers_any(text) {
        debug!("font {} cannot draw {:?}, omitting label", font.name(), text);
        return None;
    }
    let (w, h) = font.measure(text, size);
    Some(PaintCommand::Text {
        x: centered(canvas, w),
        y: y(h),
        size,
        text: text.to_string(),
        rgba,
    })
}
