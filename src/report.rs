//! Reporting seam between the pipeline and the console
//!
//! The pipeline emits events through the [`Reporter`] trait instead of
//! printing, so the decision logic stays testable without capturing
//! output streams. The binary installs a [`ConsoleReporter`]; library
//! tests use [`NullReporter`].

use std::path::Path;
use std::sync::Mutex;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::BatchResizeError;
use crate::pipeline::{ImageTask, RunSummary};
use crate::processing::ProcessedImage;

/// Event sink for pipeline progress
pub trait Reporter: Send + Sync {
    /// Discovery finished with at least one eligible file
    fn batch_started(&self, _file_count: usize) {}

    /// Discovery found no eligible files
    fn no_files_found(&self, _input_dir: &Path) {}

    /// A file was resized and written
    fn file_processed(&self, _task: &ImageTask, _image: &ProcessedImage) {}

    /// A file was skipped because its output already exists
    fn file_skipped(&self, _task: &ImageTask) {}

    /// A file failed to decode or encode
    fn file_failed(&self, _task: &ImageTask, _error: &BatchResizeError) {}

    /// The run is complete
    fn batch_finished(&self, _summary: &RunSummary) {}
}

/// Reporter that discards all events
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Console reporter with a progress bar and a styled summary block
pub struct ConsoleReporter {
    progress: Mutex<Option<ProgressBar>>,
    show_progress: bool,
}

impl ConsoleReporter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            progress: Mutex::new(None),
            show_progress,
        }
    }

    fn println(&self, line: String) {
        let guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }

    fn tick(&self) {
        let guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = guard.as_ref() {
            pb.inc(1);
        }
    }

    fn name_of(task: &ImageTask) -> String {
        task.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| task.source_path.display().to_string())
    }
}

impl Reporter for ConsoleReporter {
    fn batch_started(&self, file_count: usize) {
        println!("Found {} image(s) to process", style(file_count).bold());

        if self.show_progress {
            let pb = ProgressBar::new(file_count as u64);
            if let Ok(bar_style) = ProgressStyle::default_bar()
                .template("[{wide_bar:.cyan/blue}] {pos}/{len}")
            {
                pb.set_style(bar_style.progress_chars("#>-"));
            }
            let mut guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
            *guard = Some(pb);
        }
    }

    fn no_files_found(&self, input_dir: &Path) {
        println!(
            "{}: no supported image files found in {}",
            style("Warning").yellow().bold(),
            input_dir.display()
        );
    }

    fn file_processed(&self, task: &ImageTask, image: &ProcessedImage) {
        self.println(format!(
            "{} {} ({}x{})",
            style("Resized").green(),
            Self::name_of(task),
            image.width,
            image.height
        ));
        self.tick();
    }

    fn file_skipped(&self, task: &ImageTask) {
        self.println(format!(
            "{} {} (output already exists)",
            style("Skipped").yellow(),
            Self::name_of(task)
        ));
        self.tick();
    }

    fn file_failed(&self, task: &ImageTask, error: &BatchResizeError) {
        self.println(format!(
            "{} {}: {}",
            style("Failed").red(),
            Self::name_of(task),
            error.user_message()
        ));
        self.tick();
    }

    fn batch_finished(&self, summary: &RunSummary) {
        {
            let mut guard = self.progress.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }

        println!();
        println!("{}", style("Summary:").bold());
        println!("  {}: {}", style("Processed").green(), summary.processed);
        println!("  {}: {}", style("Skipped").yellow(), summary.skipped);
        if summary.failed > 0 {
            println!("  {}: {}", style("Failed").red(), summary.failed);
        }
        println!(
            "  {}: {}",
            style("Output folder").cyan(),
            summary.output_dir.display()
        );
    }
}
