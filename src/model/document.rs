//! Document composition and metadata.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::escape_text;

use super::block::Block;
use super::image::ImageBlock;
use super::paragraph::Paragraph;

/// Opening declarations and font table emitted before any block.
const PREAMBLE: &str =
    "{\\rtf1\\ansi\\ansicpg1252\\uc1\\deff0{\\fonttbl{\\f0\\froman\\fcharset0 Times New Roman;}}\n";

/// An RTF document: metadata plus an ordered sequence of blocks.
///
/// Each block renders independently; the document concatenates the
/// results between the RTF preamble and the closing delimiter.
pub struct Document {
    /// Document metadata rendered into the info group
    pub metadata: Metadata,

    blocks: Vec<Box<dyn Block>>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            blocks: Vec::new(),
        }
    }

    /// Set the document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Append a block to the document.
    pub fn add_block(&mut self, block: Box<dyn Block>) {
        self.blocks.push(block);
    }

    /// Append a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Box::new(paragraph));
    }

    /// Append an image block to the document.
    pub fn add_image(&mut self, image: ImageBlock) {
        self.blocks.push(Box::new(image));
    }

    /// The blocks in document order.
    pub fn blocks(&self) -> &[Box<dyn Block>] {
        &self.blocks
    }

    /// The number of blocks in the document.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the full document to RTF markup.
    pub fn render(&self) -> Result<String> {
        log::debug!("Rendering document with {} blocks", self.blocks.len());
        let mut out = String::from(PREAMBLE);
        out.push_str(&self.metadata.to_info_group());
        for block in &self.blocks {
            out.push_str(&block.render()?);
        }
        out.push_str("}\n");
        Ok(out)
    }

    /// Render the document and write it to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let markup = self.render()?;
        fs::write(path, markup)?;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Author's company
    pub company: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.company.is_none()
            && self.created.is_none()
    }

    /// Render the info group, or an empty string when no field is set.
    pub fn to_info_group(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = String::from(r"{\info");
        for (value, tag) in [
            (&self.title, r"{\title "),
            (&self.author, r"{\author "),
            (&self.company, r"{\company "),
        ] {
            if let Some(text) = value {
                out.push_str(tag);
                out.push_str(&escape_text(text));
                out.push('}');
            }
        }
        if let Some(ref created) = self.created {
            out.push_str(&format!(
                "{{\\creatim\\yr{}\\mo{}\\dy{}\\hr{}\\min{}}}",
                created.year(),
                created.month(),
                created.day(),
                created.hour(),
                created.minute()
            ));
        }
        out.push_str("}\n");
        out
    }
}
