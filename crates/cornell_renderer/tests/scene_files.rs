//! The scene files shipped in `scenes/` stay loadable.

use std::path::PathBuf;

use cornell_renderer::{MaterialKind, Scene};

fn scene_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenes").join(name)
}

#[test]
fn lit_box_file_matches_builtin() {
    let loaded = Scene::load(scene_path("lit_box.json")).unwrap();
    let builtin = Scene::cornell_box_lit();

    assert_eq!(loaded.planes().len(), builtin.planes().len());
    for (a, b) in loaded.planes().iter().zip(builtin.planes()) {
        assert_eq!(a.material, b.material);
        assert!((a.point - b.point).length() < 1e-6);
        assert!((a.normal - b.normal).length() < 1e-6);
        assert!((a.color - b.color).length() < 1e-6);
    }
    assert!((loaded.light_color() - builtin.light_color()).length() < 1e-6);
}

#[test]
fn light_wall_file_loads() {
    let scene = Scene::load(scene_path("light_wall.json")).unwrap();
    assert_eq!(scene.planes().len(), 1);
    assert_eq!(scene.planes()[0].material, MaterialKind::Light);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Scene::load(scene_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, cornell_renderer::RenderError::Io(_)));
}
