//! Error taxonomy for scene construction.
//!
//! Asset problems on cosmetic textures are handled where they happen (see
//! [`crate::resources::texture::load_image_or_fallback`]); everything that
//! reaches the caller as a [`SceneError`] aborts scene construction.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// An image or model could not be read or decoded.
    #[error("failed to load asset {path:?}: {reason}")]
    AssetLoad { path: PathBuf, reason: String },

    /// A shader module or pipeline failed validation.
    #[error("failed to build the {program} program: {message}")]
    ShaderBuild { program: String, message: String },

    /// Geometry that can never produce a triangle, rejected at construction.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The sky model does not map onto exactly six distinct cube faces.
    #[error("sky model faces: {0}")]
    SkyFaces(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SceneError {
    pub fn asset(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SceneError::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
