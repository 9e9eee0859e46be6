//! Image decoding abstraction layer.
//!
//! Provides a trait-based interface for probing and re-encoding raster
//! images, isolating the concrete codec (the `image` crate) from block
//! construction logic.

use std::io::Cursor;

use image::GenericImageView;

use crate::error::{Error, Result};
use crate::model::ImageFormat;

/// Resolution assumed when a container carries no density metadata.
const DEFAULT_DPI: f32 = 96.0;

/// Pixel geometry and format recovered from an image source.
#[derive(Debug, Clone, Copy)]
pub struct ImageInfo {
    /// Width in pixels.
    pub pixel_width: u32,
    /// Height in pixels.
    pub pixel_height: u32,
    /// Horizontal resolution in dots per inch.
    pub horizontal_dpi: f32,
    /// Vertical resolution in dots per inch.
    pub vertical_dpi: f32,
    /// The container format the bytes are encoded in.
    pub format: ImageFormat,
}

impl ImageInfo {
    /// Physical width in points at the recovered resolution.
    pub fn width_pt(&self) -> f32 {
        self.pixel_width as f32 / self.horizontal_dpi * 72.0
    }

    /// Physical height in points at the recovered resolution.
    pub fn height_pt(&self) -> f32 {
        self.pixel_height as f32 / self.vertical_dpi * 72.0
    }
}

/// Abstract interface for raster image decoding.
///
/// Implementations recover pixel geometry, resolution, and container
/// format from raw bytes, and re-encode decoded pixels back into their
/// native container — without exposing any concrete codec types.
pub trait ImageDecoder: Send + Sync {
    /// Probe raw bytes for pixel geometry, resolution, and format.
    ///
    /// Fails when the bytes do not decode as an image.
    fn probe(&self, data: &[u8]) -> Result<ImageInfo>;

    /// Decode the bytes and re-encode the pixels into the source's native
    /// container format.
    ///
    /// The result can differ from the input bytes; only the decoded
    /// pixels survive the round trip.
    fn reencode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// RasterDecoder — concrete implementation backed by the image crate
// ---------------------------------------------------------------------------

/// Concrete [`ImageDecoder`] backed by the `image` codec crate.
///
/// The codec exposes no resolution metadata, so density is read from the
/// container headers directly (JFIF APP0 for JPEG, pHYs for PNG) with a
/// 96 DPI fallback; GIF has no density declaration at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn probe(&self, data: &[u8]) -> Result<ImageInfo> {
        let format = convert_format(image::guess_format(data)?)?;
        let decoded = image::load_from_memory(data)?;
        let (pixel_width, pixel_height) = decoded.dimensions();
        let (horizontal_dpi, vertical_dpi) = density(data, format);
        log::debug!(
            "Probed {} image: {}x{} px at {}x{} dpi",
            format,
            pixel_width,
            pixel_height,
            horizontal_dpi,
            vertical_dpi
        );
        Ok(ImageInfo {
            pixel_width,
            pixel_height,
            horizontal_dpi,
            vertical_dpi,
            format,
        })
    }

    fn reencode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let format = image::guess_format(data)?;
        let decoded = image::load_from_memory(data)?;
        let mut out = Cursor::new(Vec::new());
        decoded.write_to(&mut out, format)?;
        Ok(out.into_inner())
    }
}

/// Convert the codec's format tag to [`ImageFormat`].
fn convert_format(format: image::ImageFormat) -> Result<ImageFormat> {
    match format {
        image::ImageFormat::Png => Ok(ImageFormat::Png),
        image::ImageFormat::Jpeg => Ok(ImageFormat::Jpeg),
        image::ImageFormat::Gif => Ok(ImageFormat::Gif),
        image::ImageFormat::Bmp => Ok(ImageFormat::Bmp),
        image::ImageFormat::Tiff => Ok(ImageFormat::Tiff),
        image::ImageFormat::WebP => Ok(ImageFormat::WebP),
        other => Err(Error::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Read the container's density metadata, falling back to 96 DPI.
fn density(data: &[u8], format: ImageFormat) -> (f32, f32) {
    let declared = match format {
        ImageFormat::Jpeg => jfif_density(data),
        ImageFormat::Png => phys_density(data),
        _ => None,
    };
    declared.unwrap_or((DEFAULT_DPI, DEFAULT_DPI))
}

/// Scan JPEG segments for a JFIF APP0 density declaration.
fn jfif_density(data: &[u8]) -> Option<(f32, f32)> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut i = 2;
    while i + 4 <= data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        match marker {
            // standalone markers carry no length field
            0x01 | 0xD0..=0xD7 => {
                i += 2;
                continue;
            }
            // entropy-coded data begins; no APP0 past this point
            0xDA | 0xD9 => return None,
            _ => {}
        }
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if len < 2 || i + 2 + len > data.len() {
            return None;
        }
        if marker == 0xE0 && len >= 16 && data[i + 4..i + 9] == *b"JFIF\0" {
            let units = data[i + 11];
            let x = u16::from_be_bytes([data[i + 12], data[i + 13]]) as f32;
            let y = u16::from_be_bytes([data[i + 14], data[i + 15]]) as f32;
            if x <= 0.0 || y <= 0.0 {
                return None;
            }
            return match units {
                1 => Some((x, y)),
                2 => Some((x * 2.54, y * 2.54)),
                _ => None,
            };
        }
        i += 2 + len;
    }
    None
}

/// Scan PNG chunks for a pHYs density declaration.
fn phys_density(data: &[u8]) -> Option<(f32, f32)> {
    const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    if data.len() < 8 || data[..8] != SIGNATURE {
        return None;
    }
    let mut i = 8;
    while i + 8 <= data.len() {
        let len = u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]) as usize;
        let kind = &data[i + 4..i + 8];
        // pHYs must precede the image data
        if kind == b"IDAT" || kind == b"IEND" {
            return None;
        }
        if kind == b"pHYs" {
            if len != 9 || i + 17 > data.len() {
                return None;
            }
            let x = u32::from_be_bytes([data[i + 8], data[i + 9], data[i + 10], data[i + 11]]);
            let y = u32::from_be_bytes([data[i + 12], data[i + 13], data[i + 14], data[i + 15]]);
            let unit = data[i + 16];
            if unit != 1 || x == 0 || y == 0 {
                return None;
            }
            // pixels per metre to dots per inch
            return Some((x as f32 * 0.0254, y as f32 * 0.0254));
        }
        i += 12 + len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_probe_png() {
        let data = encode(2, 3, image::ImageFormat::Png);
        let info = RasterDecoder.probe(&data).unwrap();
        assert_eq!(info.pixel_width, 2);
        assert_eq!(info.pixel_height, 3);
        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!(info.horizontal_dpi, DEFAULT_DPI);
        assert_eq!(info.vertical_dpi, DEFAULT_DPI);
    }

    #[test]
    fn test_probe_detects_bmp() {
        let data = encode(1, 1, image::ImageFormat::Bmp);
        let info = RasterDecoder.probe(&data).unwrap();
        assert_eq!(info.format, ImageFormat::Bmp);
    }

    #[test]
    fn test_probe_rejects_garbage() {
        let err = RasterDecoder.probe(b"not an image").unwrap_err();
        assert!(matches!(err, Error::ImageDecode(_)));
    }

    #[test]
    fn test_reencode_keeps_format_and_pixels() {
        let data = encode(4, 2, image::ImageFormat::Png);
        let out = RasterDecoder.reencode(&data).unwrap();
        assert_eq!(
            image::guess_format(&out).unwrap(),
            image::ImageFormat::Png
        );
        let info = RasterDecoder.probe(&out).unwrap();
        assert_eq!((info.pixel_width, info.pixel_height), (4, 2));
    }

    #[test]
    fn test_info_point_size() {
        let info = ImageInfo {
            pixel_width: 192,
            pixel_height: 96,
            horizontal_dpi: 96.0,
            vertical_dpi: 96.0,
            format: ImageFormat::Png,
        };
        assert_eq!(info.width_pt(), 144.0);
        assert_eq!(info.height_pt(), 72.0);
    }

    #[test]
    fn test_jfif_density_dpi_units() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&[0x01, 0x02, 0x01, 0x01, 0x2C, 0x01, 0x2C, 0x00, 0x00]);
        assert_eq!(jfif_density(&data), Some((300.0, 300.0)));
    }

    #[test]
    fn test_jfif_density_per_cm_units() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&[0x01, 0x02, 0x02, 0x00, 0x76, 0x00, 0x76, 0x00, 0x00]);
        let (x, y) = jfif_density(&data).unwrap();
        assert!((x - 299.72).abs() < 0.01);
        assert!((y - 299.72).abs() < 0.01);
    }

    #[test]
    fn test_jfif_density_aspect_only_is_ignored() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&[0x01, 0x02, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(jfif_density(&data), None);
    }

    #[test]
    fn test_jfif_density_skips_leading_segments() {
        // APP1 Exif segment first, JFIF APP0 after it
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x08];
        data.extend_from_slice(b"Exif\0\0");
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&[0x01, 0x02, 0x01, 0x00, 0x48, 0x00, 0x48, 0x00, 0x00]);
        assert_eq!(jfif_density(&data), Some((72.0, 72.0)));
    }

    #[test]
    fn test_phys_density() {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        // IHDR with a zeroed payload; the scanner only walks chunk frames
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&[0x00; 17]);
        // pHYs: 11811 px/m (300 dpi) both axes, metre unit
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x09]);
        data.extend_from_slice(b"pHYs");
        data.extend_from_slice(&[0x00, 0x00, 0x2E, 0x23, 0x00, 0x00, 0x2E, 0x23, 0x01]);
        data.extend_from_slice(&[0x00; 4]);

        let (x, y) = phys_density(&data).unwrap();
        assert!((x - 300.0).abs() < 0.01);
        assert!((y - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_phys_density_absent() {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&[0x00; 17]);
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(b"IDAT");
        data.extend_from_slice(&[0x00; 4]);
        assert_eq!(phys_density(&data), None);
    }

    #[test]
    fn test_convert_format_unsupported() {
        let err = convert_format(image::ImageFormat::Ico).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
