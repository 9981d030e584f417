use std::path::PathBuf;

use heightfield_scene::{SceneConfig, flow};

const DEFAULT_CONFIG: &str = "scene.toml";

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = SceneConfig::load(&path)?;
    flow::run(config)
}
