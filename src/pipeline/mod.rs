//! Batch pipeline: discovery, naming, and the per-file processing loop

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{BatchResizeError, Result};
use crate::processing::{ProcessedImage, ResizeEngine};
use crate::report::Reporter;

/// A single unit of work: one source file and its derived output path
#[derive(Debug, Clone)]
pub struct ImageTask {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
}

/// Per-file result, aggregated into the [`RunSummary`] by the pipeline
#[derive(Debug)]
pub enum TaskOutcome {
    Processed(ProcessedImage),
    Skipped,
    Failed(BatchResizeError),
}

/// Accumulated counts for one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub processed: u32,
    pub skipped: u32,
    pub failed: u32,
    pub output_dir: PathBuf,
}

impl RunSummary {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            processed: 0,
            skipped: 0,
            failed: 0,
            output_dir,
        }
    }

    fn record(&mut self, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Processed(_) => self.processed += 1,
            TaskOutcome::Skipped => self.skipped += 1,
            TaskOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Batch resizer pipeline
///
/// Discovers eligible images in an input folder, resizes each to the
/// configured width, and writes the results under collision-safe names.
/// Per-file failures are recorded and never abort the remaining batch.
pub struct Pipeline {
    config: PipelineConfig,
    engine: ResizeEngine,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: PipelineConfig) -> Self {
        let engine = ResizeEngine::new(&config);
        Self { config, engine }
    }

    /// Run the batch over `input_dir`, writing into `output_dir`
    ///
    /// Fails fast when `input_dir` is missing or not a directory, or when
    /// `output_dir` cannot be created. Everything after that point is
    /// per-file: a file that cannot be decoded or written is counted as
    /// failed and the run continues.
    pub async fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        reporter: &dyn Reporter,
    ) -> Result<RunSummary> {
        match fs::metadata(input_dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(BatchResizeError::invalid_input(
                    input_dir.to_path_buf(),
                    "not a directory",
                ))
            }
            Err(_) => {
                return Err(BatchResizeError::invalid_input(
                    input_dir.to_path_buf(),
                    "does not exist",
                ))
            }
        }

        fs::create_dir_all(output_dir).await?;

        let files = self.discover_files(input_dir).await?;
        let mut summary = RunSummary::new(output_dir.to_path_buf());

        if files.is_empty() {
            warn!("No supported image files found in {:?}", input_dir);
            reporter.no_files_found(input_dir);
            reporter.batch_finished(&summary);
            return Ok(summary);
        }

        info!("Found {} files to process", files.len());
        reporter.batch_started(files.len());

        for source_path in files {
            let task = self.make_task(&source_path, output_dir);
            let outcome = self.process_task(&task).await;
            summary.record(&outcome);

            match &outcome {
                TaskOutcome::Processed(image) => reporter.file_processed(&task, image),
                TaskOutcome::Skipped => reporter.file_skipped(&task),
                TaskOutcome::Failed(error) => {
                    warn!("Failed to process {:?}: {}", task.source_path, error);
                    reporter.file_failed(&task, error);
                }
            }
        }

        reporter.batch_finished(&summary);
        Ok(summary)
    }

    /// Enumerate direct entries of the input folder, extension-filtered and sorted
    async fn discover_files(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(input_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if !file_type.is_file() {
                continue;
            }

            match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if self.config.is_supported_extension(ext) => files.push(path),
                _ => debug!("Ignoring non-image entry: {:?}", path),
            }
        }

        // Sort for a deterministic processing order within a run
        files.sort();
        Ok(files)
    }

    /// Pair a source file with its derived output path
    fn make_task(&self, source_path: &Path, output_dir: &Path) -> ImageTask {
        let file_name = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target_path = output_dir.join(output_file_name(&file_name, &self.config.suffix));

        ImageTask {
            source_path: source_path.to_path_buf(),
            target_path,
        }
    }

    /// Process one task: skip on collision, otherwise decode, resize, encode
    async fn process_task(&self, task: &ImageTask) -> TaskOutcome {
        if fs::try_exists(&task.target_path).await.unwrap_or(false) {
            debug!("Output already exists, skipping: {:?}", task.target_path);
            return TaskOutcome::Skipped;
        }

        match self
            .engine
            .process_file(&task.source_path, &task.target_path)
            .await
        {
            Ok(image) => TaskOutcome::Processed(image),
            Err(error) => TaskOutcome::Failed(error),
        }
    }
}

/// Derive the output filename: `{stem}{suffix}{original_extension}`
///
/// The original extension, including its leading dot, is kept verbatim so
/// the output is encoded in the same format as the source.
pub fn output_file_name(input_name: &str, suffix: &str) -> String {
    match input_name.rfind('.') {
        Some(dot) => format!("{}{}{}", &input_name[..dot], suffix, &input_name[dot..]),
        None => format!("{}{}", input_name, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;
    use tempfile::TempDir;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("bear.jpg", "_resized"), "bear_resized.jpg");
        assert_eq!(output_file_name("photo.PNG", "_resized"), "photo_resized.PNG");
        assert_eq!(
            output_file_name("archive.tar.gif", "_resized"),
            "archive.tar_resized.gif"
        );
        assert_eq!(output_file_name("noext", "_resized"), "noext_resized");
    }

    #[test]
    fn test_summary_record() {
        let mut summary = RunSummary::new(PathBuf::from("out"));
        summary.record(&TaskOutcome::Skipped);
        summary.record(&TaskOutcome::Failed(BatchResizeError::config("x")));
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_discovery_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.jpg", "a.PNG", "notes.txt", "c.webp", "README"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.jpg")).unwrap();

        let pipeline = Pipeline::new(PipelineConfig::default());
        let files = pipeline.discover_files(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["a.PNG", "b.jpg", "c.webp"]);
    }

    #[tokio::test]
    async fn test_run_rejects_missing_input() {
        let pipeline = Pipeline::new(PipelineConfig::default());
        let err = pipeline
            .run(Path::new("/definitely/not/here"), Path::new("out"), &NullReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, BatchResizeError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_run_rejects_file_as_input() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.jpg");
        std::fs::write(&file, b"x").unwrap();

        let pipeline = Pipeline::new(PipelineConfig::default());
        let err = pipeline
            .run(&file, &dir.path().join("out"), &NullReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, BatchResizeError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_run_creates_output_dir_for_empty_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("nested").join("out");
        std::fs::create_dir(&input).unwrap();

        let pipeline = Pipeline::new(PipelineConfig::default());
        let summary = pipeline.run(&input, &output, &NullReporter).await.unwrap();

        assert!(output.is_dir());
        assert_eq!(summary.processed, 0);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.output_dir, output);
    }
}
