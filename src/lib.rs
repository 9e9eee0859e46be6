//! # mkrtf
//!
//! Programmatic RTF document generation with embedded images.
//!
//! This library renders an in-memory document model — paragraphs and
//! raster images with alignment, margins, and page control — into RTF
//! markup, block by block.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mkrtf::{Document, ImageBlock, Paragraph};
//!
//! fn main() -> mkrtf::Result<()> {
//!     let mut doc = Document::new();
//!     doc.add_paragraph(Paragraph::with_text("Quarterly results"));
//!
//!     let chart = std::fs::read("chart.png")?;
//!     doc.add_image(ImageBlock::from_bytes(chart)?);
//!
//!     doc.save("report.rtf")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Block model**: paragraphs and images behind one rendering contract
//! - **Embedded images**: JPEG, PNG, and GIF payloads hex-encoded in place
//! - **Physical sizing**: pixel dimensions and DPI mapped to points, with
//!   aspect-locked resizing
//! - **Document metadata**: title, author, company, creation time
//! - **Pluggable decoding**: swap in a custom [`ImageDecoder`] for tests
//!   or additional codecs

pub mod decode;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use decode::{ImageDecoder, ImageInfo, RasterDecoder};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, CharFormat, Direction, Document, ImageBlock, ImageFormat, ImageSize,
    Margins, Metadata, Paragraph,
};
pub use render::{escape_text, pt_to_twip};

use std::path::Path;

/// Embed a single image file into a complete RTF document.
///
/// Reads the file, detects its format from the bytes, and renders a
/// document containing just that image.
///
/// # Example
///
/// ```no_run
/// use mkrtf::embed_image;
///
/// let rtf = embed_image("chart.png").unwrap();
/// std::fs::write("chart.rtf", rtf).unwrap();
/// ```
pub fn embed_image<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = std::fs::read(path)?;
    let mut doc = Document::new();
    doc.add_image(ImageBlock::from_bytes(data)?);
    doc.render()
}

/// Render plain text as a complete RTF document, one paragraph per line.
///
/// # Example
///
/// ```
/// use mkrtf::text_to_rtf;
///
/// let rtf = text_to_rtf("line one\nline two").unwrap();
/// assert!(rtf.starts_with("{\\rtf1"));
/// ```
pub fn text_to_rtf(text: &str) -> Result<String> {
    let mut doc = Document::new();
    for line in text.lines() {
        doc.add_paragraph(Paragraph::with_text(line));
    }
    doc.render()
}

/// Probe an image file for pixel geometry, resolution, and format.
///
/// # Example
///
/// ```no_run
/// use mkrtf::probe_image;
///
/// let info = probe_image("photo.jpg").unwrap();
/// println!("{}x{} px", info.pixel_width, info.pixel_height);
/// ```
pub fn probe_image<P: AsRef<Path>>(path: P) -> Result<ImageInfo> {
    let data = std::fs::read(path)?;
    RasterDecoder.probe(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_embed_image_missing_file() {
        let result = embed_image("no/such/image.png");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_embed_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        std::fs::write(&path, png_bytes(1, 1)).unwrap();

        let rtf = embed_image(&path).unwrap();
        assert!(rtf.starts_with("{\\rtf1"));
        assert!(rtf.contains(r"\pngblip"));
        assert!(rtf.ends_with("}\n"));
    }

    #[test]
    fn test_text_to_rtf_paragraph_per_line() {
        let rtf = text_to_rtf("one\ntwo").unwrap();
        assert_eq!(rtf.matches("\\par\n").count(), 2);
        assert!(rtf.contains("one"));
        assert!(rtf.contains("two"));
    }

    #[test]
    fn test_probe_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.png");
        std::fs::write(&path, png_bytes(3, 2)).unwrap();

        let info = probe_image(&path).unwrap();
        assert_eq!((info.pixel_width, info.pixel_height), (3, 2));
        assert_eq!(info.format, ImageFormat::Png);
    }
}
