//! Scene configuration.
//!
//! Every constant the scene needs (asset locations, terrain resolution, object
//! placement, camera start pose) lives in [`SceneConfig`]. The defaults
//! reproduce the stock scene; a TOML file may override any subset of fields.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{dispatch::SpinRate, error::SceneError, scene::SkyFace};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// All asset paths below are relative to this directory.
    pub assets_root: PathBuf,
    pub heightmap: PathBuf,
    pub terrain_texture: PathBuf,
    /// Substitute for cosmetic textures that fail to load.
    pub error_texture: PathBuf,
    pub sky_model: PathBuf,
    pub sky_faces: SkyFaceTextures,
    pub vehicle_model: PathBuf,
    pub vehicle_texture: PathBuf,
    pub terrain: TerrainConfig,
    pub cube: CubePlacement,
    pub vehicle: VehiclePlacement,
    pub camera: CameraConfig,
    pub clear_colour: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub squares_x: u32,
    pub squares_z: u32,
    pub spacing: f32,
    pub height_divisor: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CubePlacement {
    pub scale: f32,
    pub translation: [f32; 3],
    pub spin: SpinRate,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehiclePlacement {
    pub scale: f32,
    pub translation: [f32; 3],
    pub yaw_radians: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

/// Texture path per sky face. Faces are bound by name, never by load order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkyFaceTextures {
    pub up: PathBuf,
    pub down: PathBuf,
    pub left: PathBuf,
    pub right: PathBuf,
    pub front: PathBuf,
    pub back: PathBuf,
}

impl SkyFaceTextures {
    pub fn path(&self, face: SkyFace) -> &Path {
        match face {
            SkyFace::Up => &self.up,
            SkyFace::Down => &self.down,
            SkyFace::Left => &self.left,
            SkyFace::Right => &self.right,
            SkyFace::Front => &self.front,
            SkyFace::Back => &self.back,
        }
    }
}

impl Default for SkyFaceTextures {
    fn default() -> Self {
        let dir = Path::new("models/sky/mars");
        Self {
            up: dir.join("Mar_U.dds"),
            down: dir.join("Mar_D.dds"),
            left: dir.join("Mar_L.dds"),
            right: dir.join("Mar_R.dds"),
            front: dir.join("Mar_F.dds"),
            back: dir.join("Mar_B.dds"),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            squares_x: 200,
            squares_z: 200,
            spacing: 8.0,
            height_divisor: 3.0,
        }
    }
}

impl Default for CubePlacement {
    fn default() -> Self {
        Self {
            scale: 2.5,
            translation: [200.0, 40.0, 200.0],
            spin: SpinRate::default(),
        }
    }
}

impl Default for VehiclePlacement {
    fn default() -> Self {
        Self {
            scale: 0.4,
            translation: [2000.0, 60.0, 2600.0],
            yaw_radians: 0.5,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        // Just outside the terrain corner, looking across it towards the cube.
        Self {
            position: [250.0, 180.0, 250.0],
            yaw_degrees: 45.0,
            pitch_degrees: -15.0,
            speed: 120.0,
            sensitivity: 0.4,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("assets"),
            heightmap: PathBuf::from("heightmaps/TerrainHeightmap.jpg"),
            terrain_texture: PathBuf::from("textures/Terrain_Sand.jpg"),
            error_texture: PathBuf::from("textures/ErrorTexture.png"),
            sky_model: PathBuf::from("models/sky/mars/skybox.obj"),
            sky_faces: SkyFaceTextures::default(),
            vehicle_model: PathBuf::from("models/jeep.obj"),
            vehicle_texture: PathBuf::from("textures/jeep_army.jpg"),
            terrain: TerrainConfig::default(),
            cube: CubePlacement::default(),
            vehicle: VehiclePlacement::default(),
            camera: CameraConfig::default(),
            clear_colour: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl SceneConfig {
    /// Reads a TOML config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        if !path.exists() {
            log::info!("No config at {:?}, using the default scene", path);
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| SceneError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, SceneError> {
        let config: Self = toml::from_str(text).map_err(|e| SceneError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let terrain = &self.terrain;
        if !(terrain.spacing.is_finite() && terrain.spacing > 0.0) {
            return Err(SceneError::Config(format!(
                "terrain spacing must be positive, got {}",
                terrain.spacing
            )));
        }
        if !(terrain.height_divisor.is_finite() && terrain.height_divisor != 0.0) {
            return Err(SceneError::Config(format!(
                "terrain height divisor must be non-zero, got {}",
                terrain.height_divisor
            )));
        }
        Ok(())
    }

    /// Joins an asset path onto [`SceneConfig::assets_root`].
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.assets_root.join(relative)
    }
}
