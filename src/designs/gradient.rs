/// Blue-to-green gradient icon with a large "P" and a small "PWA" label

use crate::designs::{centered_label, IconDesign};
use crate::rendering::layout::centered;
use crate::rendering::paint::{PaintCommand, Rgba, WHITE};
use crate::rendering::text::Font;

pub const TOP: Rgba = (66, 133, 244, 255);
pub const BOTTOM: Rgba = (52, 168, 83, 255);
const LABEL: Rgba = (255, 255, 255, 230);

pub struct GradientDesign;

impl IconDesign for GradientDesign {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn paint(&self, size: u32, font: Option<&Font>) -> Vec<PaintCommand> {
        let mut cmds = vec![
            PaintCommand::VerticalGradient { top: TOP, bottom: BOTTOM },
            PaintCommand::RoundedMask { radius: size / 8 },
        ];

        let Some(font) = font else {
            return cmds;
        };

        // Monogram sits an eighth of the canvas above centre.
        let lift = (size / 8) as i32;
        cmds.extend(centered_label(
            font,
            size,
            "P",
            size / 3,
            |h| centered(size, h) - lift,
            WHITE,
        ));

        let bottom_gap = (size / 6) as i32;
        cmds.extend(centered_label(
            font,
            size,
            "PWA",
            size / 8,
            |h| size as i32 - h as i32 - bottom_gap,
            LABEL,
        ));

        cmds
    }
}
