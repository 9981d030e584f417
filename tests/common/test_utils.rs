use std::path::{Path, PathBuf};

use heightfield_scene::{
    SceneConfig,
    config::TerrainConfig,
    data_structures::heightmap::{HeightImage, HeightmapSampler},
};

pub const EPSILON: f32 = 1e-5;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

pub fn approx_vec(a: [f32; 3], b: [f32; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y))
}

/// RGBA8 bytes whose first channel is `value(column, row)`.
pub fn rgba_pixels(width: u32, height: u32, value: impl Fn(u32, u32) -> u8) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        for column in 0..width {
            pixels.extend_from_slice(&[value(column, row), 7, 7, 255]);
        }
    }
    pixels
}

pub fn sampler(width: u32, height: u32, value: impl Fn(u32, u32) -> u8) -> HeightmapSampler {
    let image = HeightImage::from_rgba8(width, height, rgba_pixels(width, height, value))
        .expect("valid test heightmap");
    HeightmapSampler::new(image)
}

pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    image::RgbaImage::from_pixel(width, height, image::Rgba([value, value, value, 255]))
        .save(&path)
        .expect("write fixture png");
    path
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(&path, contents).expect("write fixture file");
    path
}

/// One quad per named object; `faces` pairs an object name with its four corners.
pub fn quads_obj(faces: &[(&str, [[f32; 3]; 4])]) -> String {
    let mut obj = String::new();
    for (i, (name, corners)) in faces.iter().enumerate() {
        obj.push_str(&format!("o {}\n", name));
        for [x, y, z] in corners {
            obj.push_str(&format!("v {} {} {}\n", x, y, z));
        }
        obj.push_str("vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n");
        let base = i * 4;
        obj.push_str(&format!(
            "f {}/{} {}/{} {}/{} {}/{}\n",
            base + 1,
            base + 1,
            base + 2,
            base + 2,
            base + 3,
            base + 3,
            base + 4,
            base + 4
        ));
    }
    obj
}

pub const UP: [[f32; 3]; 4] = [[-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]];
pub const DOWN: [[f32; 3]; 4] = [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0]];
pub const LEFT: [[f32; 3]; 4] = [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0]];
pub const RIGHT: [[f32; 3]; 4] = [[1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]];
pub const FRONT: [[f32; 3]; 4] = [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0]];
pub const BACK: [[f32; 3]; 4] = [[-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]];

pub fn sky_obj() -> String {
    quads_obj(&[
        ("Mar_D", DOWN),
        ("Mar_R", RIGHT),
        ("Mar_F", FRONT),
        ("Mar_U", UP),
        ("Mar_L", LEFT),
        ("Mar_B", BACK),
    ])
}

pub fn vehicle_obj() -> String {
    quads_obj(&[
        ("body", [[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 2.0, 0.0], [0.0, 2.0, 0.0]]),
        ("wheel", [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]),
    ])
}

/// Writes a complete small scene under `dir` and returns a config pointing at it.
///
/// Only the `Mar_U` sky texture is written; the other five faces fall back to
/// the error texture.
pub fn scene_fixture(dir: &Path) -> SceneConfig {
    let config = SceneConfig {
        assets_root: dir.to_path_buf(),
        terrain: TerrainConfig {
            squares_x: 3,
            squares_z: 3,
            ..TerrainConfig::default()
        },
        ..SceneConfig::default()
    };
    write_png(dir, "heightmaps/TerrainHeightmap.png", 4, 4, 90);
    write_png(dir, "textures/Terrain_Sand.png", 8, 8, 200);
    write_png(dir, "textures/ErrorTexture.png", 2, 2, 255);
    write_png(dir, "textures/jeep_army.png", 16, 4, 60);
    write_png(dir, "models/sky/mars/Mar_U.png", 32, 32, 120);
    write_file(dir, "models/sky/mars/skybox.obj", &sky_obj());
    write_file(dir, "models/jeep.obj", &vehicle_obj());

    SceneConfig {
        heightmap: "heightmaps/TerrainHeightmap.png".into(),
        terrain_texture: "textures/Terrain_Sand.png".into(),
        error_texture: "textures/ErrorTexture.png".into(),
        vehicle_texture: "textures/jeep_army.png".into(),
        sky_faces: heightfield_scene::config::SkyFaceTextures {
            up: "models/sky/mars/Mar_U.png".into(),
            ..Default::default()
        },
        ..config
    }
}
