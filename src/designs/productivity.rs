/// Black-and-white productivity icon: a clipboard holding a three-item checklist

use crate::designs::{centered_label, IconDesign};
use crate::rendering::layout::{Point, Rect};
use crate::rendering::paint::{PaintCommand, Style, BLACK, WHITE};
use crate::rendering::text::Font;

pub struct ProductivityDesign;

/// Grid metrics derived from the edge length. Everything is laid out on a
/// 16x16 grid of `unit` sized cells.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Grid {
    size: u32,
    unit: u32,
    stroke: u32,
}

impl Grid {
    fn new(size: u32) -> Self {
        Self {
            size,
            unit: size / 16,
            stroke: (size / 64).max(1),
        }
    }

    fn at(&self, cells: u32) -> i32 {
        (cells * self.unit) as i32
    }
}

impl ProductivityDesign {
    fn frame(g: &Grid) -> Vec<PaintCommand> {
        let corner = g.size / 8;
        let inset = g.unit / 2;
        vec![
            PaintCommand::Clear { rgba: BLACK },
            PaintCommand::RoundedMask { radius: corner },
            PaintCommand::RoundedRect {
                rect: Rect::canvas(g.size).inset(inset),
                radius: corner.saturating_sub(inset),
                style: Style::Stroke(g.stroke),
                rgba: WHITE,
            },
        ]
    }

    fn clipboard(g: &Grid) -> Vec<PaintCommand> {
        vec![
            PaintCommand::RoundedRect {
                rect: Rect::new(g.at(4), g.at(3), 8 * g.unit, 10 * g.unit),
                radius: g.unit / 2,
                style: Style::Stroke(g.stroke),
                rgba: WHITE,
            },
            PaintCommand::RoundedRect {
                rect: Rect::new(g.at(6), g.at(2), 4 * g.unit, 2 * g.unit),
                radius: g.unit / 2,
                style: Style::Fill,
                rgba: WHITE,
            },
        ]
    }

    /// One checklist row: a circle, an optional check mark inside it, and a
    /// text line to its right.
    fn row(g: &Grid, top: i32, checked: bool) -> Vec<PaintCommand> {
        let d = g.unit + g.unit / 2;
        let left = g.at(5);
        let width = g.stroke as f32;
        let mid_y = top as f32 + d as f32 / 2.0;

        let mut cmds = vec![PaintCommand::Ellipse {
            rect: Rect::new(left, top, d, d),
            style: Style::Stroke(g.stroke),
            rgba: WHITE,
        }];

        if checked {
            let p = |fx: f32, fy: f32| {
                Point::new(left as f32 + fx * d as f32, top as f32 + fy * d as f32)
            };
            let knee = p(0.42, 0.72);
            cmds.push(PaintCommand::Line { from: p(0.22, 0.5), to: knee, width, rgba: WHITE });
            cmds.push(PaintCommand::Line { from: knee, to: p(0.8, 0.28), width, rgba: WHITE });
        }

        cmds.push(PaintCommand::Line {
            from: Point::new(g.at(7) as f32, mid_y),
            to: Point::new(g.at(11) as f32, mid_y),
            width,
            rgba: WHITE,
        });
        cmds
    }
}

impl IconDesign for ProductivityDesign {
    fn name(&self) -> &'static str {
        "productivity"
    }

    fn paint(&self, size: u32, font: Option<&Font>) -> Vec<PaintCommand> {
        let g = Grid::new(size);
        let mut cmds = Self::frame(&g);
        cmds.extend(Self::clipboard(&g));

        let rows = [
            (g.at(6), true),
            (g.at(8) + (g.unit / 2) as i32, true),
            (g.at(11), false),
        ];
        for (top, checked) in rows {
            cmds.extend(Self::row(&g, top, checked));
        }

        if let Some(font) = font {
            // Label sits in the band between the clipboard and the border.
            let band_top = g.at(13);
            let band = (3 * g.unit) as i32;
            let stroke = g.stroke as i32;
            cmds.extend(centered_label(
                font,
                size,
                "TASKS",
                size / 12,
                |h| band_top + (band - h as i32).div_euclid(2) - stroke,
                WHITE,
            ));
        }

        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_scales_with_size() {
        assert_eq!(Grid::new(192), Grid { size: 192, unit: 12, stroke: 3 });
        assert_eq!(Grid::new(512), Grid { size: 512, unit: 32, stroke: 8 });
        assert_eq!(Grid::new(32).stroke, 1);
    }

    #[test]
    fn only_black_and_white_are_used() {
        let font = Font::builtin();
        for cmd in ProductivityDesign.paint(192, Some(&font)) {
            let rgba = match cmd {
                PaintCommand::Clear { rgba }
                | PaintCommand::Line { rgba, .. }
                | PaintCommand::RoundedRect { rgba, .. }
                | PaintCommand::Ellipse { rgba, .. }
                | PaintCommand::Text { rgba, .. } => rgba,
                PaintCommand::RoundedMask { .. } => continue,
                PaintCommand::VerticalGradient { .. } => panic!("gradient in mono icon"),
            };
            assert!(rgba == WHITE || rgba == BLACK, "unexpected colour {:?}", rgba);
        }
    }

    #[test]
    fn two_rows_are_checked() {
        let cmds = ProductivityDesign.paint(192, None);
        let circles = cmds.iter().filter(|c| c.kind() == "ellipse").count();
        let lines = cmds.iter().filter(|c| c.kind() == "line").count();
        assert_eq!(circles, 3);
        // three row lines plus two strokes per check mark
        assert_eq!(lines, 3 + 2 * 2);
        assert!(cmds.iter().all(|c| c.kind() != "text"));
    }

    #[test]
    fn label_fits_between_clipboard_and_border() {
        let font = Font::builtin();
        let cmds = ProductivityDesign.paint(192, Some(&font));
        let Some(PaintCommand::Text { y, size, text, .. }) = cmds.last() else {
            panic!("missing label");
        };
        assert_eq!(text, "TASKS");
        assert_eq!(*size, 16);
        assert!(*y >= 156);
        assert!(*y + 16 <= 186);
    }
}
