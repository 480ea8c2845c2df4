//! Frame driver: one progressive pass per displayed frame.
//!
//! Each frame traces exactly one path per pixel and adds it into the
//! accumulation buffer. Rows are rendered in parallel with rayon; the
//! parallel iterator returning is the frame barrier, after which the driver
//! counts the frame and a snapshot may be taken.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::integrator::radiance;
use crate::presenter::Presenter;
use crate::{AccumulationBuffer, ImageBuffer, PinholeCamera, RenderConfig, RenderResult, Scene};

/// How often `step` reports frame timings.
const LOG_INTERVAL: u64 = 100;

fn is_log_frame(samples: u64) -> bool {
    samples > 0 && samples % LOG_INTERVAL == 0
}

/// Seed for the random stream of one pixel in one frame.
///
/// Streams depend only on `(seed, frame, pixel)`, never on which thread
/// renders the pixel.
fn pixel_seed(seed: u64, frame: u64, pixel: u64) -> u64 {
    // splitmix64 finalizer over a mixed key
    let mut h = seed
        ^ frame.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ pixel.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 30;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

/// Owns the scene, camera and accumulation state for a whole run.
pub struct FrameDriver {
    config: RenderConfig,
    camera: PinholeCamera,
    scene: Scene,
    buffer: AccumulationBuffer,
    last_frame_time: Duration,
}

impl FrameDriver {
    /// Validate everything and allocate the accumulation buffer.
    ///
    /// No frame is rendered here.
    pub fn new(config: RenderConfig, camera: PinholeCamera, scene: Scene) -> RenderResult<Self> {
        config.validate()?;
        camera.validate()?;
        scene.validate()?;

        let buffer = AccumulationBuffer::new(config.width, config.height)?;

        log::info!(
            "Frame driver ready: {}x{}, max depth {}, {} planes{}",
            config.width,
            config.height,
            config.max_depth,
            scene.planes().len(),
            if scene.has_light() { "" } else { " (no light, image will stay black)" }
        );

        Ok(Self {
            config,
            camera,
            scene,
            buffer,
            last_frame_time: Duration::ZERO,
        })
    }

    /// Trace one sample per pixel and add it into the buffer.
    pub fn render_frame(&mut self) {
        let start = Instant::now();

        let frame = self.buffer.samples();
        let (width, height) = (self.config.width, self.config.height);
        let max_depth = self.config.max_depth;
        let seed = self.config.seed;
        let camera = &self.camera;
        let scene = &self.scene;

        self.buffer.accumulate(|u, v| {
            let pixel = v as u64 * width as u64 + u as u64;
            let mut rng = SmallRng::seed_from_u64(pixel_seed(seed, frame, pixel));

            let ray = camera.get_ray(u, v, width, height, &mut rng);
            radiance(ray, scene, max_depth, &mut rng)
        });

        self.last_frame_time = start.elapsed();
        log::trace!("Frame {} took {:?}", frame + 1, self.last_frame_time);
    }

    /// Tone-mapped view of everything accumulated so far.
    pub fn snapshot(&self) -> ImageBuffer {
        self.buffer.tone_mapped()
    }

    /// Render one frame and hand its snapshot to `presenter`.
    ///
    /// Every `LOG_INTERVAL` frames the progress and last frame time go to
    /// the debug log.
    pub fn step<P: Presenter>(&mut self, presenter: &mut P) -> Result<(), P::Error> {
        self.render_frame();

        let samples = self.samples();
        if is_log_frame(samples) {
            log::debug!(
                "{} / {} frames, last frame {:?}",
                samples,
                self.config.max_frames,
                self.last_frame_time
            );
        }

        presenter.present(&self.snapshot())
    }

    /// Render until `max_frames` frames have been accumulated.
    pub fn run<P: Presenter>(&mut self, presenter: &mut P) -> Result<(), P::Error> {
        let start = Instant::now();
        while !self.is_finished() {
            self.step(presenter)?;
        }
        log::info!("Rendered {} frames in {:?}", self.samples(), start.elapsed());
        Ok(())
    }

    /// Whether the frame budget is used up.
    pub fn is_finished(&self) -> bool {
        self.buffer.samples() >= self.config.max_frames
    }

    /// Frames accumulated so far.
    pub fn samples(&self) -> u64 {
        self.buffer.samples()
    }

    /// Wall time of the most recent frame.
    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    pub fn buffer(&self) -> &AccumulationBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn camera(&self) -> &PinholeCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
