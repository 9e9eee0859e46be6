//! mkrtf CLI - RTF document generation tool

mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mkrtf::{probe_image, Alignment, Block, Document, ImageBlock};

use manifest::Manifest;

#[derive(Parser)]
#[command(name = "mkrtf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Generate RTF documents with embedded images", long_about = None)]
struct Cli {
    /// Output RTF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Image files to embed
    #[arg(value_name = "IMAGES")]
    images: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed images into a new RTF document
    Embed {
        /// Output RTF file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Image files to embed
        #[arg(value_name = "IMAGES", required = true)]
        images: Vec<PathBuf>,

        /// Center the images
        #[arg(long)]
        center: bool,

        /// Scale each image to this width in points
        #[arg(long, value_name = "PT")]
        width: Option<f32>,

        /// Start each image after the first on a new page
        #[arg(long)]
        page_break: bool,

        /// Document title
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },

    /// Compile a JSON manifest into an RTF document
    Build {
        /// Manifest file
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Output file (manifest name with .rtf if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show image file information
    Info {
        /// Image file
        #[arg(value_name = "IMAGE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Embed {
            output,
            images,
            center,
            width,
            page_break,
            title,
        }) => cmd_embed(&output, &images, center, width, page_break, title.as_deref()),
        Some(Commands::Build { manifest, output }) => cmd_build(&manifest, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: embed if an output and images are provided
            if let Some(output) = cli.output {
                if cli.images.is_empty() {
                    Err("no image files given".into())
                } else {
                    cmd_embed(&output, &cli.images, false, None, false, None)
                }
            } else {
                println!("{}", "Usage: mkrtf <OUTPUT> <IMAGES>...".yellow());
                println!("       mkrtf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_embed(
    output: &Path,
    images: &[PathBuf],
    center: bool,
    width: Option<f32>,
    page_break: bool,
    title: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut doc = Document::new();
    if let Some(title) = title {
        doc.metadata.title = Some(title.to_string());
    }

    for path in images {
        pb.set_message(path.display().to_string());
        let data = fs::read(path)?;

        let mut image = ImageBlock::from_bytes(data)?;
        if center {
            image.set_alignment(Alignment::Center);
        }
        if let Some(pt) = width {
            image.set_width(pt);
        }
        if page_break && doc.block_count() > 0 {
            image.set_start_new_page(true);
        }
        image.set_start_new_paragraph(true);

        doc.add_image(image);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    doc.save(output)?;
    println!(
        "{} {} ({} images)",
        "Saved to".green(),
        output.display(),
        images.len()
    );

    Ok(())
}

fn cmd_build(path: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = Manifest::load(path)?;
    let doc = manifest.build()?;

    let output = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| path.with_extension("rtf"));

    doc.save(&output)?;
    println!(
        "{} {} ({} blocks)",
        "Saved to".green(),
        output.display(),
        doc.block_count()
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let info = probe_image(input)?;

    println!("{}", "Image Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), info.format);
    println!(
        "{}: {} x {} px",
        "Pixels".bold(),
        info.pixel_width,
        info.pixel_height
    );
    println!(
        "{}: {} x {} dpi",
        "Resolution".bold(),
        info.horizontal_dpi,
        info.vertical_dpi
    );
    println!(
        "{}: {:.1} x {:.1} pt",
        "Size".bold(),
        info.width_pt(),
        info.height_pt()
    );

    if info.format.is_embeddable() {
        println!("{}: Yes", "Embeddable".bold());
    } else {
        println!(
            "{}: {}",
            "Embeddable".bold(),
            "No (convert to PNG, JPEG, or GIF)".yellow()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mkrtf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("RTF document generation tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/mkrtf".dimmed());
    println!("License: MIT");
}
