use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pwa_icons::{manifest, IconConfig, IconGenerator, IconStyle, DEFAULT_SIZES};

/// Command line arguments for the icon generator
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate placeholder PNG icons for a PWA manifest")]
struct Args {
    /// Icon design to draw
    #[arg(short, long, value_enum, default_value_t = IconStyle::Gradient)]
    style: IconStyle,

    /// Directory to write the PNG files into
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Edge lengths in pixels, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES)]
    sizes: Vec<u32>,

    /// Bitmap font descriptor (JSON with a PNG atlas) for the labels
    #[arg(long)]
    font: Option<PathBuf>,

    /// Skip text labels
    #[arg(long)]
    no_text: bool,

    /// Print a web manifest `icons` snippet after generating
    #[arg(long)]
    print_manifest: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> IconConfig {
        IconConfig {
            style: self.style,
            sizes: self.sizes.clone(),
            out_dir: self.out_dir.clone(),
            font: self.font.clone(),
            draw_text: !self.no_text,
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    println!("Generating PWA icons...");

    let generator = IconGenerator::new(args.config()).context("invalid icon configuration")?;
    let mut written = Vec::with_capacity(args.sizes.len());
    for &size in &generator.config().sizes {
        let icon = generator
            .write(size)
            .with_context(|| format!("failed to write {}", generator.output_path(size).display()))?;
        println!("Created {} ({}x{})", icon.file_name(), size, size);
        written.push(icon);
    }

    println!("Icons generated successfully!");
    println!("Note: Icons are basic placeholders. Replace with your own design for production.");

    if args.print_manifest {
        println!("{}", manifest::to_json(&written)?);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(&args) {
        eprintln!("Icon generation failed: {:#}", e);
        std::process::exit(1);
    }
}
