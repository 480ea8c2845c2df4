use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use cornell_renderer::{RenderConfig, RenderResult, Scene, DEFAULT_MAX_DEPTH};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "cornell")]
#[command(about = "Progressive Monte Carlo path tracer for the Cornell box")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Maximum diffuse bounces per path
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Number of progressive frames to render
    #[arg(long, short = 'n', default_value_t = 50_000)]
    pub frames: u64,

    /// Base seed for the random streams
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Scene description (JSON); defaults to the built-in box
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Use the built-in box with its ceiling as the light
    #[arg(long, conflicts_with = "scene")]
    pub lit: bool,

    /// Render without a window and write the final image to --output
    #[arg(long)]
    pub headless: bool,

    /// PNG written on exit in headless mode, or when pressing S in the window
    #[arg(short, long, default_value = "cornell.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub debug_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            max_depth: self.max_depth,
            seed: self.seed,
            max_frames: self.frames,
        }
    }

    pub fn scene(&self) -> RenderResult<Scene> {
        match &self.scene {
            Some(path) => Scene::load(path),
            None if self.lit => Ok(Scene::cornell_box_lit()),
            None => Ok(Scene::cornell_box()),
        }
    }
}
