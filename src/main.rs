//! # Volley Arena Client Entry Point
//!
//! Parses the CLI, sets up logging, preloads assets, starts the music, and
//! runs the scene loop.

use clap::Parser;
use log::{info, LevelFilter};
use macroquad::prelude::*;
use volley::config::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, STATUS_BAR_HEIGHT};
use volley::{AssetCache, ControlState, MacroquadSurface, SceneManager, VolleyResult};

/// Command line arguments for the arena client.
#[derive(Parser, Debug)]
#[command(name = "volley")]
#[command(about = "2D arcade arena client")]
#[command(version)]
struct Args {
    /// Seed for the demo match layout
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to the JSON control settings file
    #[arg(long, default_value = "settings.json")]
    settings: std::path::PathBuf,

    /// Do not play background music
    #[arg(long)]
    mute: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Volley Arena")]
async fn main() -> VolleyResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting volley client v{}", volley::VERSION);

    request_new_screen_size(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);
    set_pc_assets_folder("assets");

    let control = ControlState::load_or_default(&args.settings);

    // Fail fast here rather than mid-frame if an asset is missing.
    let assets = AssetCache::load(&control).await?;
    if !args.mute {
        assets.play_music();
    }
    let mut surface = MacroquadSurface::new(assets);

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    // Objects live above the status strip.
    let arena_height = DEFAULT_SCREEN_HEIGHT - STATUS_BAR_HEIGHT;
    let mut scenes = SceneManager::new(seed, DEFAULT_SCREEN_WIDTH, arena_height, control);
    scenes.run(&mut surface).await
}

fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
