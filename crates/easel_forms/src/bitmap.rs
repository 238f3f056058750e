use crate::control::Size;
use crate::errors::DecodeError;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// A decoded image owned by a single control.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pixels: RgbaImage,
    placeholder: bool,
}

impl Bitmap {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            placeholder: false,
        }
    }

    /// The built-in "image not found" glyph: a white tile with a red border
    /// and a red cross.
    pub fn placeholder() -> Self {
        const SIDE: u32 = 16;
        let red = Rgba([0xd0, 0x20, 0x20, 0xff]);
        let white = Rgba([0xff, 0xff, 0xff, 0xff]);
        let pixels = RgbaImage::from_fn(SIDE, SIDE, |x, y| {
            let edge = x == 0 || y == 0 || x == SIDE - 1 || y == SIDE - 1;
            let cross = x == y || x + y == SIDE - 1;
            if edge || cross { red } else { white }
        });
        Self {
            pixels,
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn size(&self) -> Size {
        let (width, height) = self.pixels.dimensions();
        Size::new(
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Decode the image file at `path`.
pub fn decode(path: impl AsRef<Path>) -> Result<Bitmap, DecodeError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(DecodeError::EmptyPath);
    }
    let image = image::open(path)?;
    Ok(Bitmap::from_rgba(image.into_rgba8()))
}

/// Decode `path`, substituting the placeholder on any failure.
pub fn decode_or_placeholder(path: impl AsRef<Path>) -> Bitmap {
    decode(path).unwrap_or_else(|_| Bitmap::placeholder())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_shape() {
        let placeholder = Bitmap::placeholder();
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.size(), Size::new(16, 16));
        assert_eq!(placeholder.pixels().get_pixel(0, 0), &Rgba([0xd0, 0x20, 0x20, 0xff]));
        assert_eq!(placeholder.pixels().get_pixel(3, 1), &Rgba([0xff, 0xff, 0xff, 0xff]));
    }

    #[test]
    fn test_decode_missing_file_is_error() {
        let result = decode("/definitely/not/here/missing.png");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_empty_path() {
        assert!(matches!(decode(""), Err(DecodeError::EmptyPath)));
    }

    #[test]
    fn test_decode_or_placeholder_absorbs_failure() {
        let bitmap = decode_or_placeholder("/definitely/not/here/missing.png");
        assert!(bitmap.is_placeholder());
    }

    #[test]
    fn test_decode_corrupt_file() {
        let path = std::env::temp_dir().join(format!("easel_corrupt_{}.png", std::process::id()));
        std::fs::write(&path, b"not really a png").expect("write temp file");
        assert!(decode(&path).is_err());
        assert!(decode_or_placeholder(&path).is_placeholder());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_decode_real_png() {
        let path = std::env::temp_dir().join(format!("easel_decode_{}.png", std::process::id()));
        RgbaImage::from_pixel(3, 5, Rgba([1, 2, 3, 255]))
            .save(&path)
            .expect("write temp png");
        let bitmap = decode(&path).expect("decode png");
        assert!(!bitmap.is_placeholder());
        assert_eq!(bitmap.size(), Size::new(3, 5));
        let _ = std::fs::remove_file(&path);
    }
}
