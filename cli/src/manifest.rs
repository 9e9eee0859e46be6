//! JSON document manifests consumed by the build command.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use mkrtf::{
    Alignment, Block, CharFormat, Document, ImageBlock, ImageFormat, Metadata, Paragraph,
};

/// A document description compiled into RTF.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub blocks: Vec<ManifestBlock>,
}

/// One block entry in a manifest.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ManifestBlock {
    Paragraph {
        text: String,

        #[serde(default)]
        align: Option<Alignment>,

        #[serde(default)]
        bold: bool,

        #[serde(default)]
        font_size: Option<f32>,
    },

    Image {
        path: PathBuf,

        /// Forces the embedded format instead of detecting it; the image
        /// is re-encoded on this path.
        #[serde(default)]
        format: Option<ImageFormat>,

        #[serde(default)]
        align: Option<Alignment>,

        /// Width in points; height follows the aspect ratio.
        #[serde(default)]
        width: Option<f32>,

        #[serde(default)]
        page_break: bool,
    },
}

impl Manifest {
    /// Read a manifest from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&text)?;
        Ok(manifest)
    }

    /// Compile the manifest into a document.
    pub fn build(&self) -> Result<Document, Box<dyn std::error::Error>> {
        let metadata = Metadata {
            title: self.title.clone(),
            author: self.author.clone(),
            company: self.company.clone(),
            created: None,
        };
        let mut doc = Document::new().with_metadata(metadata);

        for block in &self.blocks {
            match block {
                ManifestBlock::Paragraph {
                    text,
                    align,
                    bold,
                    font_size,
                } => {
                    let mut paragraph = Paragraph::with_text(text.clone());
                    if *bold || font_size.is_some() {
                        paragraph.set_char_format(CharFormat {
                            bold: *bold,
                            font_size: *font_size,
                            ..Default::default()
                        });
                    }
                    if let Some(align) = align {
                        paragraph.set_alignment(*align);
                    }
                    doc.add_paragraph(paragraph);
                }
                ManifestBlock::Image {
                    path,
                    format,
                    align,
                    width,
                    page_break,
                } => {
                    let mut image = match format {
                        Some(format) => ImageBlock::from_file(path, *format)?,
                        None => ImageBlock::from_bytes(fs::read(path)?)?,
                    };
                    if let Some(align) = align {
                        image.set_alignment(*align);
                    }
                    if let Some(pt) = width {
                        image.set_width(*pt);
                    }
                    image.set_start_new_page(*page_break);
                    image.set_start_new_paragraph(true);
                    doc.add_image(image);
                }
            }
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "Release notes",
        "author": "QA",
        "blocks": [
            { "type": "paragraph", "text": "Overview", "bold": true, "font_size": 14 },
            { "type": "paragraph", "text": "Details follow.", "align": "left" },
            { "type": "image", "path": "chart.png", "format": "png", "width": 200, "page_break": true }
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest: Manifest = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(manifest.title.as_deref(), Some("Release notes"));
        assert_eq!(manifest.author.as_deref(), Some("QA"));
        assert!(manifest.company.is_none());
        assert_eq!(manifest.blocks.len(), 3);

        match &manifest.blocks[0] {
            ManifestBlock::Paragraph {
                text,
                bold,
                font_size,
                ..
            } => {
                assert_eq!(text, "Overview");
                assert!(*bold);
                assert_eq!(*font_size, Some(14.0));
            }
            other => panic!("expected paragraph, got {:?}", other),
        }

        match &manifest.blocks[2] {
            ManifestBlock::Image {
                path,
                format,
                width,
                page_break,
                ..
            } => {
                assert_eq!(path, &PathBuf::from("chart.png"));
                assert_eq!(*format, Some(ImageFormat::Png));
                assert_eq!(*width, Some(200.0));
                assert!(*page_break);
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_build_paragraph_document() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "title": "Note",
                "blocks": [
                    { "type": "paragraph", "text": "alpha" },
                    { "type": "paragraph", "text": "beta", "align": "center" }
                ]
            }"#,
        )
        .unwrap();

        let doc = manifest.build().unwrap();
        assert_eq!(doc.block_count(), 2);

        let rtf = doc.render().unwrap();
        assert!(rtf.contains(r"{\title Note}"));
        assert!(rtf.contains("alpha"));
        assert!(rtf.contains(r"\qc"));
    }

    #[test]
    fn test_build_missing_image_fails() {
        let manifest: Manifest = serde_json::from_str(
            r#"{ "blocks": [ { "type": "image", "path": "no/such/file.png" } ] }"#,
        )
        .unwrap();

        assert!(manifest.build().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Manifest::load(&path).is_err());
    }

    #[test]
    fn test_unknown_block_type_fails() {
        let result: Result<Manifest, _> =
            serde_json::from_str(r#"{ "blocks": [ { "type": "table" } ] }"#);
        assert!(result.is_err());
    }
}
