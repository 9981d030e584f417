use heightfield_scene::{
    SceneError,
    scene::{SceneAssets, SkyFace},
};

use crate::common::test_utils::{UP, approx_eq, quads_obj, scene_fixture, write_file};

mod common;

fn scene_error(error: &anyhow::Error) -> &SceneError {
    error
        .downcast_ref::<SceneError>()
        .expect("error should be a SceneError")
}

#[tokio::test]
async fn should_load_every_scene_asset() {
    let dir = tempfile::tempdir().unwrap();
    let config = scene_fixture(dir.path());
    let assets = SceneAssets::load(&config).await.unwrap();

    assert_eq!(assets.terrain.vertex_count(), 16);
    assert_eq!(assets.terrain.triangle_count(), 18);
    assert!(assets.terrain.positions.iter().all(|p| approx_eq(p[1], 30.0)));
    assert_eq!(assets.terrain_texture.dimensions(), (8, 8));

    let faces: Vec<SkyFace> = assets.sky.iter().map(|s| s.face).collect();
    assert_eq!(faces, SkyFace::ALL.to_vec());

    assert_eq!(assets.vehicle.len(), 2);
    assert_eq!(assets.vehicle_texture.dimensions(), (16, 4));
}

#[tokio::test]
async fn should_bind_sky_textures_by_face_with_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let config = scene_fixture(dir.path());
    let assets = SceneAssets::load(&config).await.unwrap();

    for sky in &assets.sky {
        let expected = if sky.face == SkyFace::Up { (32, 32) } else { (2, 2) };
        assert_eq!(sky.texture.dimensions(), expected, "{:?}", sky.face);
    }
}

#[tokio::test]
async fn should_fall_back_for_missing_terrain_texture() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = scene_fixture(dir.path());
    config.terrain_texture = "textures/missing.png".into();
    let assets = SceneAssets::load(&config).await.unwrap();

    assert_eq!(assets.terrain_texture.dimensions(), (2, 2));
}

#[tokio::test]
async fn should_fail_without_heightmap() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = scene_fixture(dir.path());
    config.heightmap = "heightmaps/missing.png".into();
    let error = SceneAssets::load(&config).await.err().unwrap();

    assert!(matches!(scene_error(&error), SceneError::AssetLoad { .. }));
}

#[tokio::test]
async fn should_fail_without_vehicle_model() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = scene_fixture(dir.path());
    config.vehicle_model = "models/missing.obj".into();
    let error = SceneAssets::load(&config).await.err().unwrap();

    match scene_error(&error) {
        SceneError::AssetLoad { path, .. } => {
            assert_eq!(path, &dir.path().join("models/missing.obj"))
        }
        other => panic!("unexpected error {other}"),
    }
}

#[tokio::test]
async fn should_fail_on_incomplete_sky_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = scene_fixture(dir.path());
    write_file(
        dir.path(),
        "models/sky/mars/skybox.obj",
        &quads_obj(&[("Mar_U", UP)]),
    );
    let error = SceneAssets::load(&config).await.err().unwrap();

    assert!(matches!(scene_error(&error), SceneError::SkyFaces(_)));
}

#[tokio::test]
async fn should_reject_degenerate_terrain() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = scene_fixture(dir.path());
    config.terrain.squares_x = 0;
    let error = SceneAssets::load(&config).await.err().unwrap();

    assert!(matches!(
        scene_error(&error),
        SceneError::DegenerateGeometry(_)
    ));
}
