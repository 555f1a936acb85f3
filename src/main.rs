//! BatchResize CLI - Batch Image Resizer
//!
//! Resizes every supported image in a folder to a fixed target width,
//! writing the results into a separate output folder and skipping files
//! that were already processed on an earlier run.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use console::style;
use tracing::{error, info};

use batchresize::{init_with_config, ConsoleReporter, NullReporter, Pipeline, PipelineConfig, Reporter};

/// BatchResize - Batch Image Resizer
#[derive(Parser)]
#[command(
    name = "batchresize",
    version,
    about = "Resize a folder of images to a fixed width, skipping existing outputs",
    long_about = "BatchResize resizes every supported image in a folder to a fixed target \
                  width (default 300), preserving aspect ratio. Results are written to the \
                  output folder as {stem}_resized{ext}; files whose output already exists \
                  are skipped, so reruns never overwrite earlier results."
)]
struct Cli {
    /// Input folder containing the images to resize
    #[arg(short = 'f', long = "folder", value_name = "PATH")]
    folder: PathBuf,

    /// Output folder for the resized images (created if missing)
    #[arg(short = 'r', long = "resized_imgs", value_name = "PATH")]
    resized_imgs: PathBuf,

    /// Target width in pixels (overrides the config file)
    #[arg(short, long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Configuration file path (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match PipelineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}: {}", style("Error").red().bold(), e.user_message());
                process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };

    if let Some(width) = cli.width {
        config.target_width = width;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    } else if cli.quiet {
        config.logging.level = "error".to_string();
    }

    if let Err(e) = config.validate() {
        eprintln!("{}: {}", style("Error").red().bold(), e.user_message());
        process::exit(1);
    }

    init_with_config(&config);
    info!("Input: {:?}", cli.folder);
    info!("Output: {:?}", cli.resized_imgs);
    info!("Target width: {}", config.target_width);

    // JSON mode reserves stdout for the summary object
    let console_reporter;
    let reporter: &dyn Reporter = if cli.json {
        &NullReporter
    } else {
        console_reporter = ConsoleReporter::new(!cli.quiet);
        &console_reporter
    };

    let pipeline = Pipeline::new(config);
    match pipeline.run(&cli.folder, &cli.resized_imgs, reporter).await {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{}: {}", style("Error").red().bold(), e);
                        process::exit(1);
                    }
                }
            }
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            eprintln!("{}: {}", style("Error").red().bold(), e.user_message());
            process::exit(1);
        }
    }
}
