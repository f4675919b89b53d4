//! # Image Processing Module
//!
//! Questo modulo gestisce la conversione in-process dei formati raster comuni
//! tramite il crate `image`.
//!
//! ## Pipeline di conversione
//!
//! 1. **Decode**: `image::open` rileva il formato e decodifica il file
//! 2. **Normalizzazione colore**: i modi con canale alpha diventano RGBA8,
//!    tutto il resto diventa RGB8 (le palette vengono espanse dal decoder e
//!    ricadono nella stessa regola)
//! 3. **Encode PNG**: compressione massima (`CompressionType::Best`) con
//!    filtro adattivo
//! 4. **Scrittura**: sul path temporaneo passato dal chiamante, mai sul nome
//!    finale
//!
//! Ogni errore di decode/encode è un errore per-file: il chiamante lo
//! intercetta e prosegue con il file successivo.

use crate::error::ConvertError;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// In-process converter for the formats the `image` crate decodes directly.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Convert `source` to an optimized PNG written at `tmp_out`.
    ///
    /// Color modes carrying an alpha channel are normalized to RGBA8 so
    /// transparency survives the round trip; everything else (grayscale,
    /// high-bit-depth, CMYK-ish decodes) is flattened to RGB8.
    pub async fn convert_to_png(source: &Path, tmp_out: &Path) -> Result<(), ConvertError> {
        let start = Instant::now();
        let img = image::open(source)?;

        let mut encoded = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut encoded, CompressionType::Best, FilterType::Adaptive);

        if img.color().has_alpha() {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            encoder.write_image(rgba.as_raw(), width, height, ColorType::Rgba8)?;
        } else {
            let rgb = img.into_rgb8();
            let (width, height) = rgb.dimensions();
            encoder.write_image(rgb.as_raw(), width, height, ColorType::Rgb8)?;
        }

        tokio::fs::write(tmp_out, encoded).await?;
        debug!(
            "Encoded {} -> {} in {:?}",
            source.display(),
            tmp_out.display(),
            start.elapsed()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_convert_bmp_to_png() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("icon.bmp");
        let tmp_out = temp_dir.path().join("icon.png.tmp");

        let img = RgbImage::from_pixel(4, 4, Rgb([200, 10, 10]));
        img.save(&src).unwrap();

        ImageProcessor::convert_to_png(&src, &tmp_out).await.unwrap();

        // `image::open` infers the format from the extension, which a
        // `.png.tmp` path defeats — guess from content instead.
        let decoded = image::io::Reader::open(&tmp_out)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!(decoded.to_rgb8().get_pixel(0, 0), &Rgb([200, 10, 10]));
    }

    #[tokio::test]
    async fn test_alpha_is_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("overlay.png");
        let tmp_out = temp_dir.path().join("overlay.tmp.png");

        let img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 128]));
        img.save(&src).unwrap();

        ImageProcessor::convert_to_png(&src, &tmp_out).await.unwrap();

        let decoded = image::open(&tmp_out).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.to_rgba8().get_pixel(1, 1), &Rgba([0, 0, 255, 128]));
    }

    #[tokio::test]
    async fn test_grayscale_becomes_rgb() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("gray.png");
        let tmp_out = temp_dir.path().join("gray.tmp.png");

        let img = image::GrayImage::from_pixel(2, 2, image::Luma([77]));
        img.save(&src).unwrap();

        ImageProcessor::convert_to_png(&src, &tmp_out).await.unwrap();

        let decoded = image::open(&tmp_out).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        assert_eq!(decoded.to_rgb8().get_pixel(0, 0), &Rgb([77, 77, 77]));
    }

    #[tokio::test]
    async fn test_corrupt_input_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("broken.jpg");
        let tmp_out = temp_dir.path().join("broken.png.tmp");
        std::fs::write(&src, b"this is not a jpeg").unwrap();

        let result = ImageProcessor::convert_to_png(&src, &tmp_out).await;
        assert!(result.is_err());
        assert!(!tmp_out.exists());
    }
}
