//! Drives a design through rasterization and writes the PNG files.

use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::designs::{design_for, IconDesign};
use crate::error::{Error, Result};
use crate::rendering::text::Font;
use crate::rendering::{render_png, IconImage};
use crate::{IconConfig, MAX_SIZE, MIN_SIZE};

/// A file written by [`IconGenerator::write`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
    /// Hex sha256 of the file contents
    pub digest: String,
}

impl GeneratedIcon {
    pub fn file_name(&self) -> String {
        icon_file_name(self.size)
    }
}

/// Fixed output name for an icon of edge length `size`.
pub fn icon_file_name(size: u32) -> String {
    format!("icon-{0}x{0}.png", size)
}

pub struct IconGenerator {
    config: IconConfig,
    design: Box<dyn IconDesign>,
    font: Option<Font>,
}

impl IconGenerator {
    /// Validate `config` and resolve the label font once for all sizes.
    pub fn new(config: IconConfig) -> Result<Self> {
        config.validate()?;
        let design = design_for(config.style);
        let font = resolve_font(&config);
        debug!(
            "generator ready: design={} font={}",
            design.name(),
            font.as_ref().map(|f| f.name()).unwrap_or("none")
        );
        Ok(Self { config, design, font })
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// Font used for labels, `None` when text is disabled.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Draw and encode one icon in memory. `size` must lie in
    /// `MIN_SIZE..=MAX_SIZE`, the same range [`IconConfig::validate`] enforces.
    pub fn render(&self, size: u32) -> Result<IconImage> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(Error::ConfigError(format!(
                "size {} is outside {}..={}",
                size, MIN_SIZE, MAX_SIZE
            )));
        }
        let commands = self.design.paint(size, self.font.as_ref());
        render_png(size, &commands, self.font.as_ref())
    }

    pub fn output_path(&self, size: u32) -> PathBuf {
        self.config.out_dir.join(icon_file_name(size))
    }

    /// Render one icon and write it into the output directory, creating the
    /// directory if needed.
    pub fn write(&self, size: u32) -> Result<GeneratedIcon> {
        let icon = self.render(size)?;
        fs::create_dir_all(&self.config.out_dir)?;
        let path = self.output_path(size);
        fs::write(&path, &icon.png_data)?;

        let digest = icon.digest_hex();
        info!(
            "wrote {} ({} bytes, sha256 {})",
            path.display(),
            icon.png_data.len(),
            digest
        );
        Ok(GeneratedIcon { size, path, digest })
    }

    /// Write every configured size in order.
    pub fn generate_all(&self) -> Result<Vec<GeneratedIcon>> {
        self.config.sizes.iter().map(|&s| self.write(s)).collect()
    }
}

/// Configured font, or the built-in one when it cannot be loaded. A broken
/// font only degrades the labels, it never fails generation.
fn resolve_font(config: &IconConfig) -> Option<Font> {
    if !config.draw_text {
        return None;
    }
    match &config.font {
        Some(path) => match Font::load(path) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("{}; falling back to built-in font", e);
                Some(Font::builtin())
            }
        },
        None => Some(Font::builtin()),
    }
}
