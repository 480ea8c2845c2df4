//! Whole-pipeline scenarios with analytically known results.

use cornell_renderer::{
    Color, FrameDriver, LatestImage, MaterialKind, PinholeCamera, Plane, Presenter, RenderConfig,
    Scene, Vec3, TARGET_MEAN,
};

/// Camera at the origin aimed down +Z.
fn forward_camera() -> PinholeCamera {
    PinholeCamera::new(Vec3::ZERO, Vec3::Z, Vec3::Y, 0.8)
}

/// A single plane at z = 5 facing the camera.
fn wall(material: MaterialKind, light_color: Color) -> Scene {
    Scene::new(
        vec![Plane::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::NEG_Z,
            Color::new(1.0, 0.0, 0.0),
            material,
        )],
        light_color,
    )
}

fn config() -> RenderConfig {
    RenderConfig::default().with_resolution(24, 16).with_max_depth(1).with_seed(42)
}

#[test]
fn diffuse_wall_without_light_stays_black() {
    let scene = wall(MaterialKind::Lambertian, Color::ONE);
    let mut driver = FrameDriver::new(config(), forward_camera(), scene).unwrap();
    let mut sink = LatestImage::new();

    for n in 1..=8 {
        driver.step(&mut sink).unwrap();
        assert_eq!(driver.samples(), n);
        assert!(driver.buffer().sums().iter().all(|&c| c == Color::ZERO));
    }

    let image = sink.image().unwrap();
    assert!(image.pixels.iter().all(|&c| c == Color::ZERO));
}

#[test]
fn light_wall_converges_to_light_color_exactly() {
    let scene = wall(MaterialKind::Light, Color::ONE);
    let mut driver = FrameDriver::new(config(), forward_camera(), scene).unwrap();

    for _ in 0..13 {
        driver.render_frame();
    }
    assert_eq!(driver.samples(), 13);

    let estimate = driver.buffer().normalized();
    assert!(estimate.pixels.iter().all(|&c| c == Color::ONE));

    // Uniform image: exposure brings every channel to the target mean
    let expected = TARGET_MEAN.sqrt();
    for c in driver.snapshot().pixels {
        assert!((c - Color::splat(expected)).abs().max_element() < 1e-6);
    }
}

#[test]
fn lit_cornell_box_renders_something() {
    let config = RenderConfig::default().with_resolution(32, 32).with_seed(1);
    let mut driver =
        FrameDriver::new(config, PinholeCamera::default(), Scene::cornell_box_lit()).unwrap();

    for _ in 0..4 {
        driver.render_frame();
    }

    let snapshot = driver.snapshot();
    assert!(snapshot.mean() > 0.0);
    assert!(snapshot.pixels.iter().all(|c| c.is_finite()));

    // Exposure is normalized before the square root
    let mut exposed = driver.buffer().normalized();
    let scale = TARGET_MEAN / exposed.mean();
    for p in &mut exposed.pixels {
        *p *= scale;
    }
    assert!((exposed.mean() - TARGET_MEAN).abs() < 1e-4);
}

/// Presenter that records how many frames it saw and fails on demand.
struct CountingPresenter {
    seen: u64,
    fail_after: u64,
}

impl Presenter for CountingPresenter {
    type Error = String;

    fn present(&mut self, _image: &cornell_renderer::ImageBuffer) -> Result<(), Self::Error> {
        if self.seen == self.fail_after {
            return Err("display closed".to_string());
        }
        self.seen += 1;
        Ok(())
    }
}

#[test]
fn presenter_errors_stop_the_loop() {
    let mut config = config();
    config.max_frames = 100;
    let scene = wall(MaterialKind::Light, Color::ONE);
    let mut driver = FrameDriver::new(config, forward_camera(), scene).unwrap();
    let mut presenter = CountingPresenter { seen: 0, fail_after: 3 };

    let result = driver.run(&mut presenter);
    assert_eq!(result, Err("display closed".to_string()));
    assert_eq!(presenter.seen, 3);
    // The failing frame was still accumulated before being presented
    assert_eq!(driver.samples(), 4);
}

#[test]
fn scene_file_drives_the_renderer() {
    let json = r#"{
        "planes": [
            { "point": [0.0, 0.0, 5.0], "normal": [0.0, 0.0, -1.0],
              "color": [1.0, 1.0, 1.0], "material": "light" }
        ],
        "light_color": [0.5, 0.5, 0.5]
    }"#;
    let path = std::env::temp_dir().join("cornell_end_to_end_scene.json");
    std::fs::write(&path, json).unwrap();

    let scene = Scene::load(&path).unwrap();
    let mut driver = FrameDriver::new(config(), forward_camera(), scene).unwrap();
    driver.render_frame();
    driver.render_frame();

    assert!(driver.buffer().normalized().pixels.iter().all(|&c| c == Color::splat(0.5)));
    let _ = std::fs::remove_file(&path);
}
