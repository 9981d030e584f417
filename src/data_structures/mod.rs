//! Scene data: geometry generation and GPU-facing data models.
//!
//! - `heightmap` holds decoded height images and nearest-sample lookup
//! - `terrain` builds the procedural terrain grid and its triangulation
//! - `normals` synthesizes per-vertex normals from a triangle list
//! - `cube` is the fixed colour cube geometry
//! - `model` contains vertex layouts, CPU mesh data and GPU meshes/models
//! - `texture` wraps GPU textures and depth buffers

pub mod cube;
pub mod heightmap;
pub mod model;
pub mod normals;
pub mod terrain;
pub mod texture;
