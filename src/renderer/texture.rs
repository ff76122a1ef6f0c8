//! Texture loading and sampling
//!
//! Decodes an image file (PNG/JPEG/BMP) into an RGB surface with a per-pixel
//! accessor. Nearest-neighbor lookup only - no filtering, no mipmaps.

use std::fmt;
use std::path::Path;

/// A decoded, read-only pixel surface.
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pixels: Vec<u8>, // RGB, 3 bytes per pixel
}

/// Error type for texture loading.
#[derive(Debug)]
pub enum TextureError {
    /// File missing or unreadable.
    Io(String),
    /// The decoder rejected the data.
    Decode(String),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io(msg) => write!(f, "I/O error: {}", msg),
            TextureError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for TextureError {}

impl Texture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => {
                TextureError::Io(format!("failed to read {}: {}", path.display(), io))
            }
            other => TextureError::Decode(format!("failed to decode {}: {}", path.display(), other)),
        })?;
        Ok(Self::from_image(img))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| TextureError::Decode(format!("failed to decode image: {}", e)))?;
        Ok(Self::from_image(img))
    }

    fn from_image(img: image::DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        Self {
            width,
            height,
            pixels: rgb.into_raw(),
        }
    }

    /// 8-bit RGB at (x, y). Coordinates are clamped to the pixel rectangle,
    /// so the ceil-based lookup in the rasterizer can never run off the edge.
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = (y * self.width + x) * 3;
        (self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a small RGB image to PNG bytes.
    fn png_bytes(pixels: &[(u8, u8, u8)], width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            let (r, g, b) = pixels[(y * width + x) as usize];
            image::Rgb([r, g, b])
        });
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_and_read_pixels() {
        let bytes = png_bytes(
            &[
                (255, 0, 0),
                (0, 255, 0),
                (0, 0, 255),
                (10, 20, 30),
            ],
            2,
            2,
        );
        let tex = Texture::from_bytes(&bytes).unwrap();
        assert_eq!(tex.width, 2);
        assert_eq!(tex.height, 2);
        assert_eq!(tex.get_pixel(0, 0), (255, 0, 0));
        assert_eq!(tex.get_pixel(1, 0), (0, 255, 0));
        assert_eq!(tex.get_pixel(0, 1), (0, 0, 255));
        assert_eq!(tex.get_pixel(1, 1), (10, 20, 30));
    }

    #[test]
    fn test_get_pixel_clamps_to_surface() {
        let bytes = png_bytes(&[(1, 2, 3), (4, 5, 6), (7, 8, 9), (10, 11, 12)], 2, 2);
        let tex = Texture::from_bytes(&bytes).unwrap();
        assert_eq!(tex.get_pixel(9, 9), (10, 11, 12));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(
            Texture::from_bytes(b"not an image"),
            Err(TextureError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Texture::from_file("does/not/exist.png"),
            Err(TextureError::Io(_))
        ));
    }
}
