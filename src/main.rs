//! # Pngify - Main Entry Point
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory opzionale, flag verbose)
//! 2. Configura il logging con `tracing` (INFO, o DEBUG con --verbose)
//! 3. Risolve la directory di destinazione: l'argomento se presente,
//!    altrimenti la directory che contiene l'eseguibile
//! 4. Valida che la directory esista (unico caso fatale, exit nonzero)
//! 5. Avvia il converter; gli errori per-file sono riportati ma non fatali
//!
//! ## Esempio di utilizzo:
//! ```bash
//! pngify /path/to/images --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pngify::{Config, Converter};

#[derive(Parser)]
#[command(name = "pngify")]
#[command(about = "Convert every image in a directory to web-optimized PNG")]
struct Args {
    /// Directory containing the images to convert (defaults to the
    /// directory the executable lives in)
    directory: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Self-locating default: the directory containing the running executable.
fn default_directory() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Cannot determine the executable's directory"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let directory = match args.directory {
        Some(dir) => dir,
        None => default_directory()?,
    };

    let mut config = Config::new(directory);
    config.verbose = args.verbose;
    config.validate()?;

    let converter = Converter::new(config).await;
    converter.run().await?;

    Ok(())
}
