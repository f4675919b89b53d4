//! # Pngify Library
//!
//! Batch conversion of a single directory of images to web-optimized PNG.
//!
//! ## Module architecture:
//! - `config`: target directory and validation (the only fatal error lives here)
//! - `error`: per-file error types for the conversion step
//! - `file_manager`: candidate discovery, extension classification, atomic replace
//! - `image_processor`: in-process conversion via the `image` crate
//! - `magick_processor`: subprocess conversion via ImageMagick for exotic formats
//! - `report`: per-file status lines and the run summary counters
//! - `converter`: the sequential scan/classify/dispatch/replace orchestrator
//!
//! ## Usage:
//! ```no_run
//! use pngify::{Config, Converter};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::new("/path/to/images".into());
//! config.validate()?;
//! let summary = Converter::new(config).await.run().await?;
//! println!("{} converted", summary.converted);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod magick_processor;
pub mod report;

pub use config::Config;
pub use converter::Converter;
pub use error::ConvertError;
pub use report::RunSummary;
