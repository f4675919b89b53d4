//! # Run Reporting Module
//!
//! Questo modulo gestisce l'output utente del run: le righe di stato
//! per-file e i contatori del riepilogo finale.
//!
//! ## Contratto di output:
//! - `[OK]` e `[SKIP]` per estensioni non supportate vanno su stdout
//! - `[SKIP]` per tool mancante, `[ERROR]` e `[WARN]` vanno su stderr
//! - Il riepilogo finale è composto da due righe di conteggio
//!
//! Queste righe sono il contratto del programma, non log: il logging
//! strutturato (`tracing`) trasporta solo il dettaglio ambientale.

use std::path::Path;

/// Aggregate counters for a single run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Files whose extension was recognized, regardless of outcome
    pub detected: usize,
    /// Files successfully converted or optimized in place
    pub converted: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_detected(&mut self) {
        self.detected += 1;
    }

    pub fn add_converted(&mut self) {
        self.converted += 1;
    }

    /// Print the final two-line summary.
    pub fn print(&self) {
        println!("\nSummary:");
        println!("  Images detected                 : {}", self.detected);
        println!("  Converted/optimized successfully: {}", self.converted);
    }
}

fn name_of(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name().unwrap_or_default().to_string_lossy()
}

/// `[OK] photo.jpg -> photo.png`
pub fn ok(source: &Path, output: &Path) {
    println!("[OK] {} -> {}", name_of(source), name_of(output));
}

/// `[SKIP]` for an extension outside both format sets; excluded from totals.
pub fn skip_unsupported(source: &Path) {
    println!("[SKIP] {} (unsupported extension)", name_of(source));
}

/// `[SKIP]` for an exotic format when ImageMagick is absent; counted as
/// detected but not converted.
pub fn skip_missing_tool(source: &Path) {
    eprintln!(
        "[SKIP] {} (requires ImageMagick: 'magick' command not found)",
        name_of(source)
    );
}

/// `[ERROR]` for a failed conversion or replace; the original is untouched.
pub fn error(source: &Path, message: &str) {
    eprintln!("[ERROR] Could not convert {}: {}", name_of(source), message);
}

/// `[WARN]` when the original could not be deleted after a successful
/// conversion; the conversion still counts.
pub fn warn_cleanup(source: &Path, message: &str) {
    eprintln!(
        "[WARN] Could not delete original {}: {}",
        name_of(source),
        message
    );
}

/// One-time startup notice when ImageMagick is absent.
pub fn notice_missing_magick() {
    println!(
        "Notice: ImageMagick is not available ('magick' command). \
         .wdp and .emf files will be skipped."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counters() {
        let mut summary = RunSummary::new();
        summary.add_detected();
        summary.add_detected();
        summary.add_converted();
        assert_eq!(summary.detected, 2);
        assert_eq!(summary.converted, 1);
    }

    #[test]
    fn test_summary_default_is_zero() {
        let summary = RunSummary::new();
        assert_eq!(summary, RunSummary { detected: 0, converted: 0 });
    }
}
