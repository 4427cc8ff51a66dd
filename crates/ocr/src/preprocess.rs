use std::io::Cursor;
use std::path::Path;

use image::DynamicImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Image file not found: {0}")]
    NotFound(String),
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Load an image file, normalize its color mode, and return PNG bytes ready
/// for OCR.
///
/// Normalization is color-mode only: anything that is not already 3-channel
/// RGB (grayscale, RGBA, 16-bit) is converted to RGB8. No deskewing or
/// contrast work happens here.
pub fn load_for_ocr(path: &Path) -> Result<Vec<u8>, PreprocessError> {
    if !path.exists() {
        return Err(PreprocessError::NotFound(path.display().to_string()));
    }

    let img = image::open(path)?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "image opened"
    );

    encode_as_png(normalize_color_mode(img))
}

fn normalize_color_mode(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, img: DynamicImage) -> std::path::PathBuf {
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_for_ocr(Path::new("/no/such/receipt.png")).unwrap_err();
        assert!(matches!(err, PreprocessError::NotFound(_)));
    }

    #[test]
    fn grayscale_is_converted_to_rgb() {
        let gray: GrayImage = ImageBuffer::from_fn(4, 4, |_, _| Luma([128u8]));
        let converted = normalize_color_mode(DynamicImage::ImageLuma8(gray));
        assert!(matches!(converted, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn rgba_is_converted_to_rgb() {
        let rgba: RgbaImage = ImageBuffer::from_fn(4, 4, |_, _| Rgba([10u8, 20, 30, 255]));
        let converted = normalize_color_mode(DynamicImage::ImageRgba8(rgba));
        assert!(matches!(converted, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn rgb_passes_through_unchanged() {
        let rgb = DynamicImage::ImageRgb8(ImageBuffer::from_fn(4, 4, |_, _| {
            image::Rgb([1u8, 2, 3])
        }));
        let converted = normalize_color_mode(rgb.clone());
        assert_eq!(converted.to_rgb8(), rgb.to_rgb8());
    }

    #[test]
    fn load_produces_png_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let gray: GrayImage = ImageBuffer::from_fn(4, 4, |_, _| Luma([200u8]));
        let path = write_png(dir.path(), "r.png", DynamicImage::ImageLuma8(gray));

        let bytes = load_for_ocr(&path).unwrap();
        // PNG magic bytes: 0x89 0x50 0x4E 0x47
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(load_for_ocr(&path), Err(PreprocessError::Load(_))));
    }
}
