//! Raster-to-raster conversion backed by the `image` crate.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use super::converter::GraphicConverter;
use crate::common::error::{Error, Result};

/// Re-encodes raster images into another raster format
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterConverter;

impl RasterConverter {
    /// Create a converter backed by the `image` crate codecs
    pub fn new() -> Self {
        Self
    }
}

fn raster_format(mime: &str) -> Option<ImageFormat> {
    match ImageFormat::from_mime_type(mime)? {
        format @ (ImageFormat::Png
        | ImageFormat::Jpeg
        | ImageFormat::Gif
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::WebP) => Some(format),
        _ => None,
    }
}

impl GraphicConverter for RasterConverter {
    fn supports_conversion(&self, source_mime: &str, target_mime: &str) -> bool {
        raster_format(source_mime).is_some() && raster_format(target_mime).is_some()
    }

    fn convert(&self, source: &[u8], source_mime: &str, target_mime: &str) -> Result<Vec<u8>> {
        let source_format = raster_format(source_mime)
            .ok_or_else(|| Error::Conversion(format!("unsupported source format {source_mime}")))?;
        let target_format = raster_format(target_mime)
            .ok_or_else(|| Error::Conversion(format!("unsupported target format {target_mime}")))?;

        let image = image::load_from_memory_with_format(source, source_format)?;
        // JPEG has no alpha channel
        let image = match target_format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => image,
        };

        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, target_format)?;
        Ok(buffer.into_inner())
    }
}
