//! Window harness: one progressive frame per redraw.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use cornell_renderer::FrameDriver;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::display::WindowDisplay;

/// How often the window title is refreshed.
const TITLE_INTERVAL: Duration = Duration::from_millis(500);

/// Application state
pub struct App {
    driver: FrameDriver,
    output: PathBuf,
    window: Option<Arc<Window>>,
    display: Option<WindowDisplay>,
    last_title_update: Instant,
    started: Instant,
    /// Fatal error that ended the event loop, reported by `main`
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(driver: FrameDriver, output: PathBuf) -> Self {
        Self {
            driver,
            output,
            window: None,
            display: None,
            last_title_update: Instant::now(),
            started: Instant::now(),
            error: None,
        }
    }

    /// Error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let config = self.driver.config();
        let window_attrs = Window::default_attributes()
            .with_title("Cornell Box")
            .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        let image_size = (config.width, config.height);
        let display = pollster::block_on(WindowDisplay::new(window.clone(), image_size))
            .context("Failed to initialize display")?;

        self.window = Some(window);
        self.display = Some(display);

        log::info!("Window and display initialized");
        Ok(())
    }

    fn save_snapshot(&self) {
        match self.driver.snapshot().save_png(&self.output) {
            Ok(()) => log::info!(
                "Snapshot at {} frames written to {:?}",
                self.driver.samples(),
                self.output
            ),
            Err(e) => log::error!("Failed to save snapshot: {}", e),
        }
    }

    fn update_title(&mut self) {
        if self.last_title_update.elapsed() < TITLE_INTERVAL && !self.driver.is_finished() {
            return;
        }
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "Cornell Box - {} samples ({:.1} ms/frame)",
                self.driver.samples(),
                self.driver.last_frame_time().as_secs_f64() * 1000.0
            ));
        }
        self.last_title_update = Instant::now();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(display) = &mut self.display else {
            return;
        };

        let was_finished = self.driver.is_finished();
        let result = if was_finished {
            display.redraw()
        } else {
            self.driver.step(display)
        };

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                let size = display.size();
                display.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("Out of memory while presenting"));
                return;
            }
            Err(e) => log::warn!("Surface error: {:?}", e),
        }

        if !was_finished {
            self.update_title();
            if self.driver.is_finished() {
                log::info!(
                    "Reached {} frames in {:?}; close the window to exit",
                    self.driver.samples(),
                    self.started.elapsed()
                );
                event_loop.set_control_flow(ControlFlow::Wait);
            } else if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
                return;
            }
            self.started = Instant::now();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested after {} frames", self.driver.samples());
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(display) = &mut self.display {
                    display.resize((physical_size.width, physical_size.height));
                    log::debug!("Resized to {}x{}", physical_size.width, physical_size.height);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match keycode {
                KeyCode::KeyS => self.save_snapshot(),
                KeyCode::Escape => event_loop.exit(),
                _ => {}
            },
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
