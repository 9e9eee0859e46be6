//! Image blocks embedding raster payloads in picture groups.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decode::{ImageDecoder, ImageInfo, RasterDecoder};
use crate::error::{Error, Result};
use crate::render::{encode_payload, pt_to_twip};

use super::block::{Alignment, Block, Margins};

/// Raster container formats the decoding layer recognizes.
///
/// Only PNG, JPEG, and GIF payloads can be embedded in a picture group;
/// the remaining variants exist so detection can name what it found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG/JFIF
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Windows bitmap
    Bmp,
    /// Tagged Image File Format
    Tiff,
    /// WebP
    WebP,
}

impl ImageFormat {
    /// Whether the format belongs to the embeddable set.
    pub fn is_embeddable(&self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif)
    }

    /// The picture-group type tag for the format, if one exists.
    ///
    /// The dialect has no GIF tag; GIF content is wrapped exactly as PNG
    /// content.
    pub fn picture_tag(&self) -> Option<&'static str> {
        match self {
            ImageFormat::Jpeg => Some(r"\jpegblip"),
            ImageFormat::Png | ImageFormat::Gif => Some(r"\pngblip"),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

/// Physical image size in points, with coupled resizing.
///
/// While `keep_aspect_ratio` is on, setting one dimension rescales the
/// other by the ratio captured before the change. A zero or negative
/// pre-change dimension suppresses the rescale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    width: f32,
    height: f32,
    keep_aspect_ratio: bool,
}

impl ImageSize {
    /// Create a size with aspect-ratio preservation on.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            keep_aspect_ratio: true,
        }
    }

    /// Width in points.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height in points.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether setting one dimension rescales the other.
    pub fn keep_aspect_ratio(&self) -> bool {
        self.keep_aspect_ratio
    }

    /// Switch aspect-ratio preservation on or off.
    pub fn set_keep_aspect_ratio(&mut self, keep_aspect_ratio: bool) {
        self.keep_aspect_ratio = keep_aspect_ratio;
    }

    /// Set the width in points, rescaling the height while the aspect
    /// ratio is locked.
    pub fn set_width(&mut self, pt: f32) {
        if self.keep_aspect_ratio && self.width > 0.0 {
            let ratio = self.height / self.width;
            self.height = pt * ratio;
        }
        self.width = pt;
    }

    /// Set the height in points, rescaling the width while the aspect
    /// ratio is locked.
    pub fn set_height(&mut self, pt: f32) {
        if self.keep_aspect_ratio && self.height > 0.0 {
            let ratio = self.width / self.height;
            self.width = pt * ratio;
        }
        self.height = pt;
    }
}

/// A block embedding one raster image as a hex-encoded picture group.
///
/// The payload is fixed at construction; position, margins, and physical
/// size stay adjustable until render.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    format: ImageFormat,
    payload: Vec<u8>,
    size: ImageSize,
    start_new_paragraph: bool,
    alignment: Alignment,
    margins: Margins,
    start_new_page: bool,
    block_head: String,
    block_tail: String,
}

impl ImageBlock {
    /// Build an image block from a file on disk using the stock decoder.
    ///
    /// The caller names the payload format; it is not auto-detected on
    /// this path. The file's pixels are decoded and re-encoded into their
    /// native container, so the embedded bytes can differ from the bytes
    /// on disk.
    pub fn from_file<P: AsRef<Path>>(path: P, format: ImageFormat) -> Result<Self> {
        Self::from_file_with_decoder(path, format, &RasterDecoder)
    }

    /// Build an image block from a file on disk with a custom decoder.
    pub fn from_file_with_decoder<P: AsRef<Path>>(
        path: P,
        format: ImageFormat,
        decoder: &dyn ImageDecoder,
    ) -> Result<Self> {
        let data = fs::read(path)?;
        let info = decoder.probe(&data)?;
        let payload = decoder.reencode(&data)?;
        Ok(Self::assemble(payload, format, &info, Alignment::None))
    }

    /// Build an image block from raw bytes using the stock decoder.
    ///
    /// The bytes embed verbatim, preserving the original compression
    /// exactly. The format is detected from the bytes; a detected format
    /// outside the embeddable set fails construction.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_bytes_with_decoder(data, &RasterDecoder)
    }

    /// Build an image block from raw bytes with a custom decoder.
    pub fn from_bytes_with_decoder(
        data: impl Into<Vec<u8>>,
        decoder: &dyn ImageDecoder,
    ) -> Result<Self> {
        let payload = data.into();
        let info = decoder.probe(&payload)?;
        if !info.format.is_embeddable() {
            return Err(Error::UnsupportedFormat(info.format.to_string()));
        }
        Ok(Self::assemble(payload, info.format, &info, Alignment::Left))
    }

    fn assemble(
        payload: Vec<u8>,
        format: ImageFormat,
        info: &ImageInfo,
        alignment: Alignment,
    ) -> Self {
        Self {
            format,
            payload,
            size: ImageSize::new(info.width_pt(), info.height_pt()),
            start_new_paragraph: false,
            alignment,
            margins: Margins::new(),
            start_new_page: false,
            block_head: String::from(r"{\pard"),
            block_tail: String::from("}"),
        }
    }

    /// The payload's container format.
    pub fn image_format(&self) -> ImageFormat {
        self.format
    }

    /// The embedded payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The physical size in points.
    pub fn size(&self) -> &ImageSize {
        &self.size
    }

    /// Width in points.
    pub fn width(&self) -> f32 {
        self.size.width()
    }

    /// Set the width in points; rescales the height while the aspect
    /// ratio is locked.
    pub fn set_width(&mut self, pt: f32) {
        self.size.set_width(pt);
    }

    /// Height in points.
    pub fn height(&self) -> f32 {
        self.size.height()
    }

    /// Set the height in points; rescales the width while the aspect
    /// ratio is locked.
    pub fn set_height(&mut self, pt: f32) {
        self.size.set_height(pt);
    }

    /// Whether resizing preserves the aspect ratio.
    pub fn keep_aspect_ratio(&self) -> bool {
        self.size.keep_aspect_ratio()
    }

    /// Switch aspect-ratio preservation on or off.
    pub fn set_keep_aspect_ratio(&mut self, keep_aspect_ratio: bool) {
        self.size.set_keep_aspect_ratio(keep_aspect_ratio);
    }

    /// Whether a paragraph-end directive follows the image.
    pub fn start_new_paragraph(&self) -> bool {
        self.start_new_paragraph
    }

    /// Emit or omit a paragraph-end directive after the image.
    pub fn set_start_new_paragraph(&mut self, start_new_paragraph: bool) {
        self.start_new_paragraph = start_new_paragraph;
    }
}

impl Block for ImageBlock {
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

    fn set_block_head(&mut self, head: String) {
        self.block_head = head;
    }

    fn set_block_tail(&mut self, tail: String) {
        self.block_tail = tail;
    }

    fn render(&self) -> Result<String> {
        let tag = self
            .format
            .picture_tag()
            .ok_or_else(|| Error::UnsupportedImageType(self.format.to_string()))?;

        let mut out = String::with_capacity(self.payload.len() * 2 + 64);
        out.push_str(&self.block_head);
        if self.start_new_page {
            out.push_str(r"\pagebb");
        }
        self.margins.write_directives(&mut out);
        out.push_str(self.alignment.control_word());
        out.push('\n');

        out.push_str(r"{\*\shppict{\pict");
        out.push_str(tag);
        if self.size.height() > 0.0 {
            out.push_str(r"\pichgoal");
            out.push_str(&pt_to_twip(self.size.height()).to_string());
        }
        if self.size.width() > 0.0 {
            out.push_str(r"\picwgoal");
            out.push_str(&pt_to_twip(self.size.width()).to_string());
        }
        out.push('\n');
        out.push_str(&encode_payload(&self.payload));
        out.push('\n');
        out.push_str("}}\n");
        if self.start_new_paragraph {
            out.push_str(r"\par");
        }
        out.push_str(&self.block_tail);
        out.push('\n');
        Ok(out)
    }
}
