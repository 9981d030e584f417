use heightfield_scene::{
    SceneError,
    data_structures::model::{MeshData, ModelVertex},
    resources::{
        load_obj,
        texture::{load_image, load_image_or_fallback},
    },
    scene::{SkyFace, map_sky_faces},
};

use crate::common::test_utils::{
    BACK, DOWN, FRONT, LEFT, RIGHT, UP, approx_vec, quads_obj, sky_obj, write_file, write_png,
};

mod common;

fn mesh(name: &str, corners: [[f32; 3]; 4]) -> MeshData {
    MeshData {
        name: name.to_string(),
        vertices: corners
            .iter()
            .map(|position| ModelVertex {
                position: *position,
                ..Default::default()
            })
            .collect(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[tokio::test]
async fn should_decode_images_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "a.png", 5, 3, 12);
    let img = load_image(&path).await.unwrap();

    assert_eq!(img.dimensions(), (5, 3));
    assert_eq!(img.get_pixel(4, 2).0, [12, 12, 12, 255]);
}

#[tokio::test]
async fn should_bind_fallback_when_primary_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let fallback = write_png(dir.path(), "error.png", 3, 2, 255);
    let img = load_image_or_fallback(&dir.path().join("missing.png"), &fallback)
        .await
        .unwrap();

    assert_eq!(img.dimensions(), (3, 2));
}

#[tokio::test]
async fn should_fall_back_when_primary_is_undecodable() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_file(dir.path(), "broken.png", "not an image");
    let fallback = write_png(dir.path(), "error.png", 4, 4, 255);
    let img = load_image_or_fallback(&broken, &fallback).await.unwrap();

    assert_eq!(img.dimensions(), (4, 4));
}

#[tokio::test]
async fn should_fail_when_fallback_is_missing_too() {
    let dir = tempfile::tempdir().unwrap();
    let result =
        load_image_or_fallback(&dir.path().join("a.png"), &dir.path().join("b.png")).await;

    match result {
        Err(SceneError::AssetLoad { path, .. }) => assert_eq!(path, dir.path().join("b.png")),
        other => panic!("expected an asset error, got {:?}", other.map(|i| i.dimensions())),
    }
}

#[tokio::test]
async fn should_load_one_mesh_per_obj_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "two.obj",
        &quads_obj(&[("first", UP), ("second", DOWN)]),
    );
    let meshes = load_obj(&path).await.unwrap();

    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].name, "first");
    assert_eq!(meshes[1].name, "second");
    for mesh in &meshes {
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }
}

#[tokio::test]
async fn should_flip_v_and_synthesize_missing_normals() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "tri.obj",
        "o tri\nv 0 0 0\nv 0 0 1\nv 1 0 0\nvt 0 0.25\nvt 1 0.25\nvt 1 1\nf 1/1 2/2 3/3\n",
    );
    let meshes = load_obj(&path).await.unwrap();
    let vertices = &meshes[0].vertices;

    assert_eq!(vertices[0].tex_coords, [0.0, 0.75]);
    assert_eq!(vertices[2].tex_coords, [1.0, 0.0]);
    assert!(vertices.iter().all(|v| approx_vec(v.normal, [0.0, 1.0, 0.0])));
}

#[tokio::test]
async fn should_reject_obj_without_triangles() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "empty.obj", "o nothing\nv 0 0 0\nv 1 0 0\n");

    assert!(matches!(
        load_obj(&path).await,
        Err(SceneError::AssetLoad { .. })
    ));
}

#[tokio::test]
async fn should_report_missing_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.obj");

    match load_obj(&missing).await {
        Err(SceneError::AssetLoad { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an asset error, got {:?}", other.map(|m| m.len())),
    }
}

#[tokio::test]
async fn should_map_sky_faces_by_name_regardless_of_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "sky.obj", &sky_obj());
    let mapped = map_sky_faces(load_obj(&path).await.unwrap()).unwrap();

    let faces: Vec<SkyFace> = mapped.iter().map(|(face, _)| *face).collect();
    assert_eq!(faces, SkyFace::ALL.to_vec());
    assert!(mapped.iter().all(|(face, mesh)| SkyFace::from_name(&mesh.name) == Some(*face)));
}

#[test]
fn should_classify_face_names() {
    assert_eq!(SkyFace::from_name("Mar_U"), Some(SkyFace::Up));
    assert_eq!(SkyFace::from_name("sky-bottom"), Some(SkyFace::Down));
    assert_eq!(SkyFace::from_name("Left"), Some(SkyFace::Left));
    assert_eq!(SkyFace::from_name("skybox_right.001"), Some(SkyFace::Right));
    assert_eq!(SkyFace::from_name("FRONT"), Some(SkyFace::Front));
    assert_eq!(SkyFace::from_name("Mar_B"), Some(SkyFace::Back));
    assert_eq!(SkyFace::from_name("Cube.003"), None);
}

#[test]
fn should_refuse_names_that_mention_two_faces() {
    assert_eq!(SkyFace::from_name("skybox_back_r"), None);
    assert_eq!(SkyFace::from_name("top_left"), None);
    // Repeating the same face is still unambiguous.
    assert_eq!(SkyFace::from_name("up_top"), Some(SkyFace::Up));
    // Position must not override an ambiguous name.
    assert_eq!(SkyFace::classify(&mesh("skybox_back_r", BACK)), None);
}

#[test]
fn should_reject_sky_with_ambiguous_face_name() {
    let meshes = vec![
        mesh("Mar_U", UP),
        mesh("Mar_D", DOWN),
        mesh("Mar_L", LEFT),
        mesh("Mar_R", RIGHT),
        mesh("Mar_F", FRONT),
        mesh("skybox_back_r", BACK),
    ];

    assert!(matches!(map_sky_faces(meshes), Err(SceneError::SkyFaces(_))));
}

#[test]
fn should_classify_unnamed_faces_by_position() {
    let faces = [UP, DOWN, LEFT, RIGHT, FRONT, BACK];
    let expected = [
        SkyFace::Up,
        SkyFace::Down,
        SkyFace::Left,
        SkyFace::Right,
        SkyFace::Front,
        SkyFace::Back,
    ];
    for (corners, face) in faces.into_iter().zip(expected) {
        assert_eq!(SkyFace::classify(&mesh("Plane", corners)), Some(face));
    }

    let meshes = faces.map(|corners| mesh("Plane", corners)).to_vec();
    assert_eq!(map_sky_faces(meshes).unwrap().len(), 6);
}

#[test]
fn should_reject_duplicate_sky_faces() {
    let meshes = vec![
        mesh("Mar_U", UP),
        mesh("Mar_D", DOWN),
        mesh("Mar_L", LEFT),
        mesh("Mar_R", RIGHT),
        mesh("Mar_F", FRONT),
        mesh("Mar_U.001", BACK),
    ];

    assert!(matches!(map_sky_faces(meshes), Err(SceneError::SkyFaces(_))));
}

#[test]
fn should_reject_wrong_sky_face_count() {
    let meshes = vec![mesh("Mar_U", UP), mesh("Mar_D", DOWN)];

    assert!(matches!(map_sky_faces(meshes), Err(SceneError::SkyFaces(_))));
}

#[test]
fn should_reject_unclassifiable_sky_face() {
    let mut meshes: Vec<MeshData> = [UP, DOWN, LEFT, RIGHT, FRONT]
        .into_iter()
        .map(|corners| mesh("Plane", corners))
        .collect();
    meshes.push(mesh("Plane", [[0.0; 3]; 4]));

    assert!(matches!(map_sky_faces(meshes), Err(SceneError::SkyFaces(_))));
}
