use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use picme::{
    capture::{CaptureSource, StillImageSource, SyntheticSource},
    config::Config,
    session::ConsoleUi,
    usage::usage_sink,
    Photobooth,
};

#[derive(Parser)]
#[command(
    name = "picme",
    version,
    about = "Photobooth: countdown, capture, filter and frame your shots",
    long_about = "PicMe runs a photobooth session from the terminal. It counts down, captures one to four shots from a capture source, applies a color filter and composes them into a framed single, strip or 2x2 grid PNG."
)]
struct Cli {
    /// Use a photo on disk as the camera
    #[arg(short, long, conflicts_with = "synthetic")]
    image: Option<PathBuf>,

    /// Use a generated test pattern of the given size (e.g. 640x480)
    #[arg(long, value_parser = parse_size)]
    synthetic: Option<(u32, u32)>,

    /// Layout to compose (single, strip, grid2x2)
    #[arg(short, long, default_value = "single")]
    layout: String,

    /// Color filter (none, bw, warm, cool)
    #[arg(short, long, default_value = "none")]
    filter: String,

    /// Frame color as a hex value (e.g. #FFD700)
    #[arg(long)]
    frame_color: Option<String>,

    /// Legacy frame style (simple, gold, black)
    #[arg(long)]
    legacy_frame: Option<String>,

    /// Directory to save the result into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the usage log endpoint
    #[arg(long)]
    log_endpoint: Option<String>,

    /// Disable usage logging
    #[arg(long)]
    no_log: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_size(value: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let height = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    if width == 0 || height == 0 {
        return Err("size must be non-zero".to_string());
    }
    Ok((width, height))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting PicMe v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(endpoint) = &cli.log_endpoint {
        config.usage.endpoint = endpoint.clone();
    }
    if cli.no_log {
        config.usage.enabled = false;
    }
    if let Some(output) = &cli.output {
        config.export.output_dir = output.clone();
    }
    config.validate()?;

    match (&cli.image, cli.synthetic) {
        (Some(path), _) => {
            info!("Image source: {:?}", path);
            run_booth(&cli, config, StillImageSource::new(path)).await
        }
        (None, Some((width, height))) => {
            run_booth(&cli, config, SyntheticSource::new(width, height)).await
        }
        (None, None) => {
            info!("No source given, using a 640x480 test pattern");
            run_booth(&cli, config, SyntheticSource::new(640, 480)).await
        }
    }
}

async fn run_booth<S: CaptureSource>(cli: &Cli, config: Config, source: S) -> Result<()> {
    let logger = usage_sink(&config.usage);
    let mut booth = Photobooth::new(config, source, ConsoleUi::default(), logger);

    booth.set_layout(&cli.layout);
    booth.set_filter(&cli.filter);
    if let Some(legacy) = &cli.legacy_frame {
        booth.set_legacy_frame(legacy);
    }
    if let Some(color) = &cli.frame_color {
        booth.set_frame_color(color);
    }

    info!("Layout: {}, filter: {}, frame: {}",
          booth.settings().layout, booth.settings().filter, booth.settings().frame_color());

    booth.start().await?;
    booth.capture().await?;

    match booth.download(None).await? {
        Some(path) => info!("Session complete! Output saved to: {:?}", path),
        None => info!("Session complete, nothing to save"),
    }

    booth.stop();
    Ok(())
}
