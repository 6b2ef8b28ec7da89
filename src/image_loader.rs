use std::io::Cursor;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, GenericImageView, ImageFormat};

/// Decoded RGBA pixels ready to become a texture.
#[derive(Debug)]
pub struct DecodedImage {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read image: {:?}", path))?;
    let format = image::guess_format(&bytes).ok();

    // Animated GIF logos show their first frame.
    if format == Some(ImageFormat::Gif) {
        let decoder = GifDecoder::new(Cursor::new(bytes))
            .with_context(|| format!("Failed to decode GIF: {:?}", path))?;
        let frame = decoder
            .into_frames()
            .next()
            .ok_or_else(|| anyhow!("GIF has no frames: {:?}", path))?
            .context("Failed to decode GIF frame")?;
        return Ok(DynamicImage::ImageRgba8(frame.into_buffer()));
    }

    match format {
        Some(fmt) => image::load_from_memory_with_format(&bytes, fmt)
            .with_context(|| format!("Failed to decode image: {:?}", path)),
        None => image::load_from_memory(&bytes)
            .with_context(|| format!("Failed to decode image: {:?}", path)),
    }
}

/// Decodes `path` and scales it down to fit within `max_edge`.
pub fn decode_scaled(path: &Path, max_edge: u32) -> Result<DecodedImage> {
    let img = open_image(path)?;
    let img = if img.width() > max_edge || img.height() > max_edge {
        img.thumbnail(max_edge, max_edge)
    } else {
        img
    };
    let (width, height) = img.dimensions();
    Ok(DecodedImage {
        rgba: img.to_rgba8().into_raw(),
        width: width.max(1),
        height: height.max(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn test_decode_scaled_shrinks_large_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");
        let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(400, 200, Rgba([10, 20, 30, 255]));
        buffer.save(&path).unwrap();

        let decoded = decode_scaled(&path, 100).unwrap();
        assert_eq!((decoded.width, decoded.height), (100, 50));
        assert_eq!(decoded.rgba.len(), 100 * 50 * 4);
    }

    #[test]
    fn test_decode_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(decode_scaled(&dir.path().join("missing.png"), 64).is_err());
    }
}
