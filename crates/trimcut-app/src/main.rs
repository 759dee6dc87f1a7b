//! TrimCut - remove time ranges from a video file
//!
//! Entry point: parses the command line, runs the cut on a background
//! worker, and reports the outcome.

mod config;
mod worker;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::RecvTimeoutError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use trimcut_core::{RawInterval, TrimCutError};
use trimcut_media::{plan_cut, CutJob, CutStage, FfmpegService};

use crate::config::AppConfig;
use crate::worker::{CutWorker, WorkerEvent};

/// Remove time ranges from a video and save the rest, joined in order.
#[derive(Parser, Debug)]
#[command(name = "trimcut", version, about, long_about = None)]
struct Args {
    /// Input video file
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the edited video
    #[arg(short, long)]
    output: PathBuf,

    /// Range to remove, as START,END in HH:MM:SS (repeat for more ranges)
    #[arg(
        short = 'c',
        long = "cut",
        value_name = "START,END",
        required = true,
        value_parser = parse_cut
    )]
    cuts: Vec<RawInterval>,

    /// JSON config file (encoder settings, work directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the segments that would be kept, without encoding
    #[arg(long)]
    dry_run: bool,

    /// Give up after this many seconds (checked between FFmpeg steps)
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn parse_cut(value: &str) -> std::result::Result<RawInterval, String> {
    let (start, end) = value
        .split_once(',')
        .ok_or_else(|| format!("expected START,END (e.g. 00:01:00,00:01:30), got {value:?}"))?;
    Ok(RawInterval::new(start.trim(), end.trim()))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::load(args.config.as_deref())?;
    FfmpegService::check_installed()?;
    trimcut_media::init();

    let job = CutJob {
        input: args.input,
        output: args.output,
        intervals: args.cuts,
    };
    let service = config.build_service()?;

    if args.dry_run {
        return Ok(match plan_cut(&service, &job) {
            Ok(plan) => {
                for (i, segment) in plan.segments.iter().enumerate() {
                    println!("{:>3}  {}  ({})", i + 1, segment, segment.duration());
                }
                println!("keep {} / remove {}", plan.kept(), plan.removed());
                ExitCode::SUCCESS
            }
            Err(err) => present_error(&err),
        });
    }

    info!(input = %job.input.display(), cuts = job.intervals.len(), "Processing video");
    let worker = CutWorker::spawn(service, job).context("Failed to start worker thread")?;

    let mut deadline = args.timeout.map(|secs| Instant::now() + Duration::from_secs(secs));
    let mut exit = ExitCode::FAILURE;
    loop {
        let received = match deadline {
            Some(at) => worker.events().recv_deadline(at),
            None => worker.events().recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        let event = match received {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => {
                warn!("Timed out, cancelling after the current step");
                worker.cancel();
                deadline = None;
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };
        match event {
            WorkerEvent::Progress(progress) => match progress.stage {
                CutStage::Probing => info!("Reading source..."),
                stage => info!(
                    "[{}/{}] {:?} ({:.0}%)",
                    progress.completed,
                    progress.total,
                    stage,
                    progress.fraction() * 100.0
                ),
            },
            WorkerEvent::Finished(report) => {
                println!(
                    "Video processed successfully: {} ({} kept in {} segments, {} removed)",
                    report.output.display(),
                    report.kept,
                    report.segments.len(),
                    report.removed
                );
                exit = ExitCode::SUCCESS;
            }
            WorkerEvent::Failed(err) => exit = present_error(&err),
        }
    }
    worker.join();

    Ok(exit)
}

/// Show an error as its kind plus message. Input mistakes are for the user
/// to correct; nothing is retried.
fn present_error(err: &TrimCutError) -> ExitCode {
    let kind = match err {
        TrimCutError::Cut(cut) => cut.kind().to_string(),
        TrimCutError::Io(_) => "I/O error".to_string(),
        TrimCutError::Media(_) | TrimCutError::NotFound(_) => "Media error".to_string(),
        TrimCutError::Encoder(_) => "Encoder error".to_string(),
        TrimCutError::InvalidParameter(_) | TrimCutError::Serialization(_) => {
            "Invalid input".to_string()
        }
        TrimCutError::Cancelled => "Cancelled".to_string(),
    };
    eprintln!("Error [{kind}]: {err}");
    ExitCode::FAILURE
}
