//! BatchResize - Batch Image Resizer
//!
//! A small library for resizing every image in a folder to a fixed target
//! width, preserving aspect ratio. Outputs land in a separate folder under
//! `{stem}_resized{ext}` names; files whose output already exists are
//! skipped, so reruns are cheap and never clobber earlier results.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use batchresize::{Pipeline, PipelineConfig, NullReporter};
//! use std::path::Path;
//!
//! # async fn demo() -> batchresize::Result<()> {
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let summary = pipeline
//!     .run(Path::new("photos"), Path::new("resized_imgs"), &NullReporter)
//!     .await?;
//!
//! println!("{} processed, {} skipped", summary.processed, summary.skipped);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod processing;
pub mod report;

// Re-export commonly used types
pub use config::{PipelineConfig, ResizeFilter};
pub use error::{BatchResizeError, Result};
pub use pipeline::{ImageTask, Pipeline, RunSummary, TaskOutcome};
pub use processing::ResizeEngine;
pub use report::{ConsoleReporter, NullReporter, Reporter};

use tracing::info;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default settings
///
/// Installs a tracing subscriber honoring `RUST_LOG`. Safe to call more
/// than once; only the first subscriber wins.
pub fn init() {
    if tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish(),
    )
    .is_ok()
    {
        info!("BatchResize v{} initialized", VERSION);
    }
}

/// Initialize with the log level from a loaded configuration
pub fn init_with_config(config: &PipelineConfig) {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(config.logging.level.as_str())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        info!("BatchResize v{} initialized with custom config", VERSION);
    }
}
