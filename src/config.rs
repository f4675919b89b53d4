//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri del run
//! - Fornisce validazione della directory di destinazione
//!
//! ## Parametri di configurazione:
//! - `directory`: directory contenente le immagini da convertire
//! - `verbose`: logging a livello DEBUG invece di INFO
//!
//! ## Validazione:
//! - La directory deve esistere ed essere una directory: questo è l'unico
//!   errore fatale dell'intero programma.

use anyhow::Result;
use std::path::PathBuf;

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the images to convert
    pub directory: PathBuf,
    /// Verbose logging
    pub verbose: bool,
}

impl Config {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            verbose: false,
        }
    }

    /// Validate the target directory. A missing or non-directory target is
    /// the single fatal condition of the whole run.
    pub fn validate(&self) -> Result<()> {
        if !self.directory.is_dir() {
            return Err(anyhow::anyhow!(
                "Image directory does not exist: {}",
                self.directory.display()
            ));
        }
        Ok(())
    }
}
