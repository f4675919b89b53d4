//! # ImageMagick Processor Module
//!
//! Questo modulo gestisce la conversione dei formati esotici (WDP, EMF) che
//! il crate `image` non decodifica, delegandola a ImageMagick come
//! subprocess.
//!
//! ## Responsabilità:
//! - Probe una-tantum della disponibilità del comando `magick` sul PATH
//! - Invocazione del tool con strip dei metadati e compressione PNG massima
//!
//! La disponibilità viene rilevata all'avvio e trasportata come valore
//! immutabile: il dispatch non ricontrolla mai il PATH durante il run.

use crate::error::ConvertError;
use std::path::Path;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Handle to the external ImageMagick tool, probed once at startup.
#[derive(Debug, Clone, Copy)]
pub struct MagickTool {
    available: bool,
}

impl MagickTool {
    /// Probe the system PATH for the `magick` command.
    pub async fn probe() -> Self {
        let which = if cfg!(windows) { "where" } else { "which" };
        let command = if cfg!(windows) { "magick.exe" } else { "magick" };

        let available = match Command::new(which).arg(command).output().await {
            Ok(output) => output.status.success(),
            Err(_) => false,
        };
        debug!("ImageMagick available: {}", available);

        Self { available }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    #[cfg(test)]
    pub fn unavailable() -> Self {
        Self { available: false }
    }

    /// Convert `source` to PNG at `tmp_out` by invoking:
    /// `magick <source> -strip -define png:compression-level=9 <tmp_out>`
    ///
    /// Blocks until the subprocess exits; a nonzero exit status is reported
    /// as a conversion failure like any codec error.
    pub async fn convert_to_png(&self, source: &Path, tmp_out: &Path) -> Result<(), ConvertError> {
        let args = [
            source.as_os_str(),
            "-strip".as_ref(),
            "-define".as_ref(),
            "png:compression-level=9".as_ref(),
            tmp_out.as_os_str(),
        ];
        debug!("Running magick {:?}", args);

        let start = Instant::now();
        let status = Command::new("magick").args(args).status().await?;
        debug!("magick exited with {} in {:?}", status, start.elapsed());

        if status.success() {
            Ok(())
        } else {
            Err(ConvertError::Magick(format!(
                "magick exited with {} for {}",
                status,
                source.display()
            )))
        }
    }
}
