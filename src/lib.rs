//! heightfield-scene
//!
//! Renders a small fixed 3D scene: a sky cube, terrain generated from a
//! heightmap, a spinning colour cube and a loaded vehicle model. The CPU side
//! (terrain generation, normal synthesis, per-object dispatch) is plain data
//! and can be used without a GPU.
//!
//! High-level modules
//! - `camera`: fly camera, projection and input controller
//! - `config`: scene configuration and its TOML loader
//! - `context`: window, surface and device
//! - `data_structures`: terrain, heightmap, normals, cube and mesh types
//! - `dispatch`: per-object program, depth policy and transform selection
//! - `error`: scene construction errors
//! - `flow`: the application event loop
//! - `pipelines`: the Sky, Main and Cube render programs
//! - `render`: turns a frame plan into GPU commands
//! - `resources`: image and model loading, GPU buffer upload
//! - `scene`: concurrent asset loading and scene assembly
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod dispatch;
pub mod error;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

pub use config::SceneConfig;
pub use error::SceneError;
