//! Paragraph blocks and character formatting.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::render::escape_text;

use super::block::{Alignment, Block, Margins};

/// Character formatting applied to a paragraph's text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharFormat {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Font size in points
    pub font_size: Option<f32>,
}

impl CharFormat {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.underline || self.font_size.is_some()
    }

    /// Write the control words for the active styling.
    ///
    /// The font size control word takes half-points, truncated.
    pub fn write_directives(&self, out: &mut String) {
        if self.bold {
            out.push_str(r"\b");
        }
        if self.italic {
            out.push_str(r"\i");
        }
        if self.underline {
            out.push_str(r"\ul");
        }
        if let Some(size) = self.font_size {
            out.push_str(r"\fs");
            out.push_str(&((size * 2.0) as i32).to_string());
        }
    }
}

/// A block of text ending in a paragraph mark.
#[derive(Debug, Clone)]
pub struct Paragraph {
    text: String,
    char_format: Option<CharFormat>,
    alignment: Alignment,
    margins: Margins,
    start_new_page: bool,
    block_head: String,
    block_tail: String,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            char_format: None,
            alignment: Alignment::None,
            margins: Margins::new(),
            start_new_page: false,
            block_head: String::from(r"{\pard"),
            block_tail: String::from("}"),
        }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.append(text);
        p
    }

    /// Append text to the paragraph.
    pub fn append(&mut self, text: impl Into<String>) {
        self.text.push_str(&text.into());
    }

    /// The paragraph's text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Apply character formatting to the paragraph's text.
    pub fn set_char_format(&mut self, format: CharFormat) {
        self.char_format = Some(format);
    }

    /// Check if the paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Block for Paragraph {
    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    fn margins(&self) -> &Margins {
        &self.margins
    }

    fn margins_mut(&mut self) -> &mut Margins {
        &mut self.margins
    }

    fn start_new_page(&self) -> bool {
        self.start_new_page
    }

    fn set_start_new_page(&mut self, start_new_page: bool) {
        self.start_new_page = start_new_page;
    }

    fn default_char_format(&self) -> Option<&CharFormat> {
        self.char_format.as_ref()
    }

    fn set_block_head(&mut self, head: String) {
        self.block_head = head;
    }

    fn set_block_tail(&mut self, tail: String) {
        self.block_tail = tail;
    }

    fn render(&self) -> Result<String> {
        let mut out = String::with_capacity(self.text.len() + 32);
        out.push_str(&self.block_head);
        if self.start_new_page {
            out.push_str(r"\pagebb");
        }
        self.margins.write_directives(&mut out);
        out.push_str(self.alignment.control_word());
        if let Some(ref format) = self.char_format {
            format.write_directives(&mut out);
        }
        out.push('\n');
        out.push_str(&escape_text(&self.text));
        out.push_str("\\par\n");
        out.push_str(&self.block_tail);
        out.push('\n');
        Ok(out)
    }
}
