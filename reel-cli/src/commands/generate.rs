//! Generate command handler
//!
//! Builds a generation request from flags and image files, runs the whole
//! submit → poll → download workflow and writes the MP4 to disk.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Args, ValueEnum};
use colored::*;
use reel_client::{GenerationError, ProxyClient, Progress, workflow};
use reel_core::domain::request::{
    AspectRatio, GenerationRequest, MAX_REFERENCE_IMAGES, Resolution, VideoMode,
};
use reel_core::domain::video::VideoResult;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// Shown next to the elapsed time while the provider renders
const LOADING_MESSAGES: [&str; 10] = [
    "Straightening out the timeline...",
    "Picking nano bananas...",
    "Syncing the avatar's lips...",
    "Tracing light and shadow...",
    "Weaving the pixel mesh...",
    "Calibrating the neural renderer...",
    "Adding a cinematic grade...",
    "Tuning physics collisions...",
    "Loading creative inspiration...",
    "Letting the AI take a deep breath...",
];

/// Generation mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Text to video
    Text,
    /// Start (and optional end) frame to video
    Frames,
    /// Up to three reference images to video
    References,
    /// Talking digital human reading a script
    Avatar,
}

impl From<ModeArg> for VideoMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Text => VideoMode::TextToVideo,
            ModeArg::Frames => VideoMode::FramesToVideo,
            ModeArg::References => VideoMode::ReferencesToVideo,
            ModeArg::Avatar => VideoMode::Avatar,
        }
    }
}

/// Arguments of `reel generate`
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// What the video should show
    prompt: String,

    /// Generation mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Text)]
    mode: ModeArg,

    /// Script the avatar speaks (avatar mode)
    #[arg(long)]
    script: Option<String>,

    /// Output resolution (720p or 1080p)
    #[arg(short, long, default_value = "720p")]
    resolution: Resolution,

    /// Aspect ratio (16:9 or 9:16)
    #[arg(short, long, default_value = "16:9")]
    aspect_ratio: AspectRatio,

    /// PNG used as the first frame (frames mode)
    #[arg(long)]
    start_frame: Option<PathBuf>,

    /// PNG used as the last frame (frames mode)
    #[arg(long)]
    end_frame: Option<PathBuf>,

    /// End on the start frame so the clip loops (frames mode)
    #[arg(long = "loop")]
    looping: bool,

    /// Reference PNG, repeat up to three times (references mode)
    #[arg(long = "reference")]
    references: Vec<PathBuf>,

    /// Where to write the video (defaults to reel-<timestamp>.mp4)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Handle `reel generate`
pub async fn handle_generate(args: GenerateArgs, config: &Config) -> Result<()> {
    let output = args.output.clone();
    let request = build_request(args)?;
    let client = ProxyClient::new(&config.proxy_url);
    tracing::debug!("Using proxy at {}", client.base_url());

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    println!(
        "{} {} video ({} {}, budget {}s)",
        "▶".cyan(),
        request.mode.to_string().bold(),
        request.resolution,
        request.aspect_ratio,
        config.poll_policy.budget().as_secs()
    );

    let outcome =
        workflow::generate_video(&client, request, &config.poll_policy, &cancel, print_progress)
            .await;
    ctrl_c.abort();

    match outcome {
        Ok(result) => save_result(&result, output.as_deref()),
        Err(err) => {
            report_failure(&err);
            Err(anyhow::Error::new(err).context("Video generation failed"))
        }
    }
}

/// Turns command-line arguments into a validated request
fn build_request(args: GenerateArgs) -> Result<GenerationRequest> {
    let mode = VideoMode::from(args.mode);
    let mut request = GenerationRequest::new(mode, args.prompt, args.resolution, args.aspect_ratio);

    match mode {
        VideoMode::Avatar => {
            let Some(script) = args.script else {
                bail!("avatar mode needs --script");
            };
            request = request.with_script(script);
        }
        VideoMode::FramesToVideo => {
            if args.start_frame.is_none() && args.end_frame.is_none() {
                bail!("frames mode needs --start-frame and/or --end-frame");
            }
            if let Some(path) = &args.start_frame {
                request = request.with_start_frame(read_image(path)?);
            }
            if let Some(path) = &args.end_frame {
                request = request.with_end_frame(read_image(path)?);
            }
            request = request.with_looping(args.looping);
        }
        VideoMode::ReferencesToVideo => {
            if args.references.is_empty() {
                bail!("references mode needs at least one --reference");
            }
            if args.references.len() > MAX_REFERENCE_IMAGES {
                bail!(
                    "at most {} reference images are allowed",
                    MAX_REFERENCE_IMAGES
                );
            }
            for path in &args.references {
                request = request.with_reference_image(read_image(path)?);
            }
        }
        VideoMode::TextToVideo => {}
    }

    request.validate()?;
    Ok(request)
}

fn read_image(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}

fn print_progress(progress: Progress) {
    match &progress {
        Progress::Rendering { poll, .. } => {
            let flavour = LOADING_MESSAGES[(*poll as usize).saturating_sub(1) % LOADING_MESSAGES.len()];
            println!("  {} {}", progress.to_string().yellow(), flavour.dimmed());
        }
        Progress::Submitted { .. } => println!("  {}", progress.to_string().dimmed()),
        _ => println!("  {}", progress.to_string().yellow()),
    }
}

fn save_result(result: &VideoResult, output: Option<&Path>) -> Result<()> {
    let path = output.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from(format!(
            "reel-{}.mp4",
            result.created_at.format("%Y%m%d-%H%M%S")
        ))
    });

    let url = result
        .video
        .save_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Saved {} bytes to {}",
        "✓".green(),
        result.video.len(),
        url.bold()
    );

    Ok(())
}

fn report_failure(err: &GenerationError) {
    let label = if err.is_policy_violation() {
        "Policy violation".red().bold()
    } else {
        "Generation failed".red().bold()
    };
    eprintln!("{} {}", label, err.user_message());
}
