//! PWA placeholder icon generator
//!
//! Procedurally draws square PNG icons for a web app manifest. Each design
//! is a short list of paint commands (gradients, lines, rounded rectangles,
//! ellipses, text) executed against an RGBA buffer, which is then encoded
//! as PNG.
//!
//! # Example
//!
//! ```no_run
//! use pwa_icons::{IconConfig, IconStyle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IconConfig {
//!     style: IconStyle::Productivity,
//!     out_dir: "public".into(),
//!     ..Default::default()
//! };
//!
//! for icon in pwa_icons::generate_icons(config)? {
//!     println!("{} -> {}", icon.file_name(), icon.path.display());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

pub mod designs;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod rendering;

pub use designs::{IconDesign, IconStyle};
pub use error::{Error, Result};
pub use generator::{icon_file_name, GeneratedIcon, IconGenerator};
pub use rendering::IconImage;

/// Sizes written when none are configured
pub const DEFAULT_SIZES: [u32; 2] = [192, 512];

/// Smallest accepted edge length
pub const MIN_SIZE: u32 = 16;

/// Largest accepted edge length
pub const MAX_SIZE: u32 = 4096;

/// Configuration for a generation run
///
/// The defaults reproduce the stock behaviour: the gradient design at 192
/// and 512 pixels, written to the current directory, with labels drawn in
/// the built-in font.
///
/// # Examples
///
/// ```
/// let cfg = pwa_icons::IconConfig::default();
/// assert_eq!(cfg.sizes, vec![192, 512]);
/// ```
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// Which design to draw
    pub style: IconStyle,
    /// Edge lengths in pixels, written in this order
    pub sizes: Vec<u32>,
    /// Directory the PNG files are written into
    pub out_dir: PathBuf,
    /// Optional bitmap font descriptor (JSON + PNG atlas) for labels
    pub font: Option<PathBuf>,
    /// Whether to draw text labels at all
    pub draw_text: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            style: IconStyle::default(),
            sizes: DEFAULT_SIZES.to_vec(),
            out_dir: PathBuf::from("."),
            font: None,
            draw_text: true,
        }
    }
}

impl IconConfig {
    /// Default configuration drawing `style`.
    pub fn with_style(style: IconStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Check sizes are present, in range and unique.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::ConfigError("at least one size is required".into()));
        }
        let mut seen = HashSet::new();
        for &size in &self.sizes {
            if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
                return Err(Error::ConfigError(format!(
                    "size {} is outside {}..={}",
                    size, MIN_SIZE, MAX_SIZE
                )));
            }
            if !seen.insert(size) {
                return Err(Error::ConfigError(format!("size {} is listed twice", size)));
            }
        }
        Ok(())
    }
}

/// Generate every configured icon and return what was written.
pub fn generate_icons(config: IconConfig) -> Result<Vec<GeneratedIcon>> {
    IconGenerator::new(config)?.generate_all()
}
