use anyhow::{Context, Result};
use clap::Parser;
use cornell_renderer::{FrameDriver, PinholeCamera};
use winit::event_loop::{ControlFlow, EventLoop};

mod app;
mod cli;
mod display;
mod headless;

use app::App;
use cli::Args;

fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.debug_level.clone().into());

    log::info!("Starting Cornell viewer");

    let config = args.render_config();
    let scene = args.scene().context("Failed to load scene")?;
    let driver = FrameDriver::new(config, PinholeCamera::default(), scene)
        .context("Invalid render setup")?;

    if args.headless {
        return headless::run(driver, &args.output);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(driver, args.output);

    log::info!("Running event loop");
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
