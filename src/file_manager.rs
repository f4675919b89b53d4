//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei file e le operazioni sicure sul
//! filesystem.
//!
//! ## Responsabilità:
//! - Discovery non ricorsiva dei file candidati in una directory
//! - Classificazione per estensione (nativa / tool esterno / non supportata)
//! - Costruzione dei path temporanei con suffisso riconoscibile
//! - Sostituzione atomica tramite rename e cleanup best-effort
//!
//! ## Formati supportati:
//! - **Nativi** (crate `image`): JPG, JPEG, PNG, BMP, GIF, TIF, TIFF, WEBP, JFIF
//! - **Tool esterno** (ImageMagick): WDP, EMF
//!
//! ## Sicurezza operazioni:
//! - L'output viene scritto su un file temporaneo nella stessa directory e
//!   poi rinominato sul nome finale in una singola operazione: nessuno stato
//!   parziale è mai visibile sotto il nome definitivo.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Extensions the `image` crate decodes directly.
const NATIVE_EXTS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp", "jfif",
];

/// Extensions handed off to ImageMagick (not supported by the `image` crate).
const MAGICK_EXTS: &[&str] = &["wdp", "emf"];

/// How a candidate file gets converted, derived from its lowercase extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Decoded and re-encoded in-process with the `image` crate
    Native,
    /// Converted by invoking ImageMagick as a subprocess
    External,
    /// Not an image format we handle; left untouched
    Unsupported,
}

/// Manages file discovery and safe filesystem operations
pub struct FileManager;

impl FileManager {
    /// Find all regular files directly inside `dir`, sorted by name for
    /// deterministic processing order. Subdirectories are never entered.
    pub fn list_files(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect()
    }

    /// Lowercase extension of a path, if any.
    pub fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
    }

    /// Classify a file by its extension (case-insensitive).
    pub fn classify(path: &Path) -> FileKind {
        match Self::extension(path) {
            Some(ext) if NATIVE_EXTS.contains(&ext.as_str()) => FileKind::Native,
            Some(ext) if MAGICK_EXTS.contains(&ext.as_str()) => FileKind::External,
            _ => FileKind::Unsupported,
        }
    }

    /// Check if a file already is a PNG (optimize-in-place case).
    pub fn is_png(path: &Path) -> bool {
        matches!(Self::extension(path).as_deref(), Some("png"))
    }

    /// Final output path for a candidate: `<stem>.png` next to the source,
    /// or the source itself when it already is a PNG.
    pub fn output_path(source: &Path) -> PathBuf {
        if Self::is_png(source) {
            source.to_path_buf()
        } else {
            source.with_extension("png")
        }
    }

    /// Temporary sibling path the conversion writes to before the atomic
    /// rename. The suffix pattern is recognizable so an interrupted run
    /// leaves an obviously-temporary artifact, never a half-written PNG
    /// under a final name.
    pub fn temp_path(source: &Path) -> PathBuf {
        if Self::is_png(source) {
            // photo.png -> photo.tmp.png
            let stem = source.file_stem().unwrap_or_default().to_string_lossy();
            source.with_file_name(format!("{}.tmp.png", stem))
        } else {
            // photo.jpg -> photo.png.tmp
            let out = Self::output_path(source);
            let name = out.file_name().unwrap_or_default().to_string_lossy();
            out.with_file_name(format!("{}.tmp", name))
        }
    }

    /// Atomically move the fully-written temporary file onto the final name.
    /// Both live in the same directory, so the rename is a single filesystem
    /// operation.
    pub async fn replace_file(tmp: &Path, target: &Path) -> Result<(), ConvertError> {
        fs::rename(tmp, target)
            .await
            .map_err(|e| ConvertError::Replace(e.to_string()))
    }

    /// Best-effort removal of a temporary artifact after a failure. Errors
    /// are swallowed: the temp file may never have been created.
    pub async fn cleanup_temp(tmp: &Path) {
        if fs::try_exists(tmp).await.unwrap_or(false) {
            if let Err(e) = fs::remove_file(tmp).await {
                debug!("Could not remove temporary file {}: {}", tmp.display(), e);
            }
        }
    }

    /// Delete the original source file after a successful conversion.
    pub async fn remove_original(path: &Path) -> std::io::Result<()> {
        fs::remove_file(path).await
    }
}
