//! ReelCut pipeline binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reelcut_pipeline::analyze::analyze_stage;
use reelcut_pipeline::batch::{process_video, run_batch};
use reelcut_pipeline::render::render_stage;
use reelcut_pipeline::report::report_stage;
use reelcut_pipeline::store::{load_clips, load_transcript, CLIPS_FILE, SUBTITLES_FILE, TRANSCRIPT_FILE};
use reelcut_pipeline::transcribe::transcribe_stage;
use reelcut_pipeline::{PipelineConfig, PipelineResult};

#[derive(Parser)]
#[command(name = "reelcut", about = "Turn long-form videos into captioned vertical clips")]
struct Cli {
    /// Working directory for intermediate files (overrides REELCUT_WORK_DIR)
    #[arg(long, global = true)]
    workdir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process every video in the input folder
    Batch,
    /// Run all stages for a single video
    Run { video: PathBuf },
    /// Transcribe a video and generate captions
    Transcribe { video: PathBuf },
    /// Propose and expand viral clips from an existing transcript
    Analyze,
    /// Render clips from an existing analysis
    Render { video: PathBuf },
    /// Generate the virality report from an existing analysis
    Report,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON when requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reelcut=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();
    let mut config = PipelineConfig::from_env();
    if let Some(workdir) = cli.workdir {
        config.work_dir = workdir;
    }

    // Cooperative stop flag, flipped on Ctrl-C and checked between stages
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        stop_tx.send(true).ok();
    });

    if let Err(e) = dispatch(cli.command, &config, stop_rx).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn dispatch(
    command: Command,
    config: &PipelineConfig,
    stop_rx: watch::Receiver<bool>,
) -> PipelineResult<()> {
    match command {
        Command::Batch => {
            let completed = run_batch(config, stop_rx).await?;
            info!("Batch complete: {} videos processed", completed);
        }
        Command::Run { video } => {
            let dest = process_video(config, &video, &stop_rx).await?;
            info!("Results saved to {}", dest.display());
        }
        Command::Transcribe { video } => {
            let segments = transcribe_stage(config, &video, &config.work_dir).await?;
            info!("Transcribed {} segments", segments.len());
        }
        Command::Analyze => {
            let segments = load_transcript(config.work_dir.join(TRANSCRIPT_FILE)).await?;
            let clips = analyze_stage(config, &segments, &config.work_dir).await?;
            info!("Expanded {} clips", clips.len());
        }
        Command::Render { video } => {
            let clips = load_clips(config.work_dir.join(CLIPS_FILE)).await?;
            let rendered = render_stage(
                config,
                &video,
                &clips,
                &config.work_dir.join(SUBTITLES_FILE),
                &config.work_dir.join("final_clips"),
                Some(stop_rx),
            )
            .await?;
            info!("Rendered {} clips", rendered);
        }
        Command::Report => {
            let clips = load_clips(config.work_dir.join(CLIPS_FILE)).await?;
            let segments = load_transcript(config.work_dir.join(TRANSCRIPT_FILE)).await?;
            report_stage(&clips, &segments, &config.work_dir.join("final_clips")).await?;
        }
    }
    Ok(())
}
