//! Test Fixture Generator
//!
//! Writes a deterministic I420 test pattern to disk for use as a renderer
//! fixture. The output is identical on every platform (no randomness).
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_fixture -- 640 480 yuv/test_640x480.yuv
//! cargo run --bin generate_fixture -- 641 480 out.yuv --base-dir assets
//! ```
//!
//! Odd sizes are rounded up to the next even value with a warning. Relative
//! output paths are resolved against `--base-dir` (default: the current
//! directory) and missing directories are created.
//!
//! # Exit Status
//!
//! - `0` on success (and for `--help` / `--version`)
//! - `1` for bad arguments, invalid dimensions, a failed write, or Ctrl-C
//!
//! An interrupted run removes any partially written output file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::error::ErrorKind;
use clap::Parser;
use i420_testgen::{generate, write_frame_until, Dimensions, Error, OutputConfig, Summary};

/// Raised by the Ctrl-C handler.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[derive(Parser, Debug)]
#[command(name = "generate_fixture")]
#[command(about = "Generate an I420 (YUV420 planar) test pattern file")]
#[command(version, allow_negative_numbers = true)]
struct Cli {
    /// Image width in pixels
    width: i64,

    /// Image height in pixels
    height: i64,

    /// Output file for the raw I420 data
    output: PathBuf,

    /// Directory that a relative output path is resolved against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Skip the summary and usage example
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Err(e) = ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst)) {
        log::warn!("could not install Ctrl-C handler: {e}");
    }

    match run(&cli, &INTERRUPTED) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Interrupted) => {
            log::error!("interrupted by user");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, stop: &AtomicBool) -> i420_testgen::Result<()> {
    let (dims, adjusted) = Dimensions::round_up_to_even(cli.width, cli.height)?;
    if adjusted {
        log::warn!(
            "I420 requires even dimensions; adjusted {}x{} to {dims}",
            cli.width,
            cli.height
        );
    }

    log::info!("generating {dims} test pattern");
    let frame = generate(dims);
    if stop.load(Ordering::SeqCst) {
        return Err(Error::Interrupted);
    }

    let config = OutputConfig::new(&cli.base_dir, &cli.output);
    let report = write_frame_until(&frame, &config, stop)?;

    if !cli.quiet {
        let summary = Summary::new(report.dims, &report.path);
        println!("{summary}");
        println!();
        println!("Load in the renderer with:");
        println!("  {}", summary.usage_hint());
    }
    Ok(())
}
