//! # Converter Orchestrator Module
//!
//! Orchestratore principale: scan, classificazione, dispatch, replace,
//! report. L'elaborazione è strettamente sequenziale, un file alla volta in
//! ordine alfabetico; l'unico stato condiviso tra i file sono i due
//! contatori del riepilogo e il flag immutabile di disponibilità di
//! ImageMagick.
//!
//! ## Macchina a stati per-file:
//! ```text
//! discovered -> classified -> { skipped-unsupported
//!                             | skipped-missing-tool
//!                             | converting -> { succeeded | failed } }
//! ```
//! Ogni file visita esattamente uno stato terminale per run; nessun errore
//! per-file supera il confine del singolo file.

use crate::{
    config::Config,
    error::ConvertError,
    file_manager::{FileKind, FileManager},
    image_processor::ImageProcessor,
    magick_processor::MagickTool,
    report::{self, RunSummary},
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sequential batch converter for a single directory
pub struct Converter {
    config: Config,
    magick: MagickTool,
}

impl Converter {
    /// Create a converter, probing for ImageMagick once. The availability
    /// result is immutable for the lifetime of the run.
    pub async fn new(config: Config) -> Self {
        let magick = MagickTool::probe().await;
        Self { config, magick }
    }

    #[cfg(test)]
    fn with_tool(config: Config, magick: MagickTool) -> Self {
        Self { config, magick }
    }

    /// Process every regular file in the target directory and print the
    /// final summary. Per-file failures are reported and contained; the
    /// returned summary carries the detected/converted counters.
    pub async fn run(&self) -> Result<RunSummary> {
        info!("Converting images in: {}", self.config.directory.display());

        if !self.magick.is_available() {
            report::notice_missing_magick();
        }

        let mut summary = RunSummary::new();

        for file in FileManager::list_files(&self.config.directory) {
            let kind = FileManager::classify(&file);
            if kind == FileKind::Unsupported {
                report::skip_unsupported(&file);
                continue;
            }

            summary.add_detected();

            if kind == FileKind::External && !self.magick.is_available() {
                report::skip_missing_tool(&file);
                continue;
            }

            match self.convert_one(&file, kind).await {
                Ok(output) => {
                    report::ok(&file, &output);
                    summary.add_converted();
                }
                Err(e) => report::error(&file, &e.to_string()),
            }
        }

        summary.print();
        Ok(summary)
    }

    /// Convert a single file to optimized PNG and replace it atomically.
    ///
    /// The conversion writes to a temporary sibling which is renamed onto
    /// the final name only once fully written. On any failure the temporary
    /// artifact is removed and the original is left untouched. A non-PNG
    /// original is deleted after a successful replace; a failed deletion is
    /// a warning, not a failed conversion.
    async fn convert_one(&self, source: &Path, kind: FileKind) -> Result<PathBuf, ConvertError> {
        let tmp = FileManager::temp_path(source);
        let target = FileManager::output_path(source);

        let converted = match kind {
            FileKind::Native => ImageProcessor::convert_to_png(source, &tmp).await,
            FileKind::External => self.magick.convert_to_png(source, &tmp).await,
            FileKind::Unsupported => unreachable!("unsupported files are filtered before dispatch"),
        };
        if let Err(e) = converted {
            FileManager::cleanup_temp(&tmp).await;
            return Err(e);
        }

        if let Err(e) = FileManager::replace_file(&tmp, &target).await {
            FileManager::cleanup_temp(&tmp).await;
            return Err(e);
        }

        if !FileManager::is_png(source) {
            if let Err(e) = FileManager::remove_original(source).await {
                report::warn_cleanup(source, &e.to_string());
            }
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_rgb_image(path: &Path, color: [u8; 3]) {
        RgbImage::from_pixel(8, 8, Rgb(color)).save(path).unwrap();
    }

    async fn run_in(dir: &Path) -> RunSummary {
        let converter = Converter::new(Config::new(dir.to_path_buf())).await;
        converter.run().await.unwrap()
    }

    #[tokio::test]
    async fn test_worked_example() {
        // photo.jpg, icon.bmp, readme.txt, old.png
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        write_rgb_image(&dir.join("photo.jpg"), [120, 80, 40]);
        write_rgb_image(&dir.join("icon.bmp"), [10, 200, 10]);
        write_rgb_image(&dir.join("old.png"), [1, 2, 3]);
        std::fs::write(dir.join("readme.txt"), "leave me alone").unwrap();

        let summary = run_in(dir).await;

        assert_eq!(summary.detected, 3);
        assert_eq!(summary.converted, 3);
        assert!(dir.join("photo.png").exists());
        assert!(dir.join("icon.png").exists());
        assert!(!dir.join("photo.jpg").exists());
        assert!(!dir.join("icon.bmp").exists());
        assert!(dir.join("old.png").exists());
        assert_eq!(
            std::fs::read_to_string(dir.join("readme.txt")).unwrap(),
            "leave me alone"
        );
        // Outputs are decodable PNGs
        assert!(image::open(dir.join("photo.png")).is_ok());
        assert!(image::open(dir.join("icon.png")).is_ok());
    }

    #[tokio::test]
    async fn test_idempotent_on_all_png_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        write_rgb_image(&dir.join("a.png"), [5, 5, 5]);
        write_rgb_image(&dir.join("b.png"), [9, 9, 9]);

        let first = run_in(dir).await;
        let second = run_in(dir).await;

        assert_eq!(first, RunSummary { detected: 2, converted: 2 });
        assert_eq!(second, RunSummary { detected: 2, converted: 2 });
        assert!(image::open(dir.join("a.png")).is_ok());
        assert!(image::open(dir.join("b.png")).is_ok());
    }

    #[tokio::test]
    async fn test_failure_isolation_and_no_temp_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::write(dir.join("broken.jpg"), b"definitely not a jpeg").unwrap();
        write_rgb_image(&dir.join("good.bmp"), [33, 44, 55]);

        let summary = run_in(dir).await;

        assert_eq!(summary.detected, 2);
        assert_eq!(summary.converted, 1);
        // The bad file is untouched and produced no output or temp artifact
        assert!(dir.join("broken.jpg").exists());
        assert!(!dir.join("broken.png").exists());
        assert!(!dir.join("broken.png.tmp").exists());
        assert!(dir.join("good.png").exists());
    }

    #[tokio::test]
    async fn test_unsupported_files_are_untouched_and_uncounted() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::write(dir.join("notes.txt"), "hello").unwrap();
        std::fs::write(dir.join("data.bin"), [0u8, 1, 2, 3]).unwrap();

        let summary = run_in(dir).await;

        assert_eq!(summary, RunSummary { detected: 0, converted: 0 });
        assert_eq!(std::fs::read(dir.join("data.bin")).unwrap(), vec![0u8, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_exotic_format_skipped_without_magick() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::write(dir.join("scan.wdp"), b"hd-photo bytes").unwrap();

        let converter =
            Converter::with_tool(Config::new(dir.to_path_buf()), MagickTool::unavailable());
        let summary = converter.run().await.unwrap();

        // Detected but not converted, file untouched
        assert_eq!(summary, RunSummary { detected: 1, converted: 0 });
        assert_eq!(std::fs::read(dir.join("scan.wdp")).unwrap(), b"hd-photo bytes");
        assert!(!dir.join("scan.png").exists());
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let summary = run_in(temp_dir.path()).await;
        assert_eq!(summary, RunSummary { detected: 0, converted: 0 });
    }
}
