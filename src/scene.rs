//! Scene assembly.
//!
//! Building the scene is split in two. [`SceneAssets::load`] does all the CPU
//! work (file reads, decoding, terrain generation) concurrently on the tokio
//! runtime. [`Scene::upload`] then turns those assets into GPU models on the
//! render thread, in the fixed draw order Skybox, Cube, Terrain, LoadedModel.
//!
//! Either step fails as a whole: no partially built scene is ever returned.

use anyhow::Result;
use futures::future::try_join_all;

use crate::{
    config::SceneConfig,
    data_structures::{
        cube,
        heightmap::{HeightImage, HeightmapSampler},
        model::{MeshData, Model, ObjectKind},
        terrain::{TerrainMesh, TerrainMeshBuilder},
        texture::Texture,
    },
    error::SceneError,
    pipelines::BindLayouts,
    resources::{
        load_obj,
        mesh::{upload, upload_mesh_data},
        texture::{load_image, load_image_or_fallback},
    },
};

/// One face of the sky cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkyFace {
    Down,
    Right,
    Front,
    Up,
    Left,
    Back,
}

impl SkyFace {
    pub const ALL: [SkyFace; 6] = [
        SkyFace::Down,
        SkyFace::Right,
        SkyFace::Front,
        SkyFace::Up,
        SkyFace::Left,
        SkyFace::Back,
    ];

    /// Classifies a sky sub-mesh by the tokens of its name (`sky_up`,
    /// `Mar_U`, ...) and otherwise by the dominant axis of its centroid. A
    /// name naming two different faces is not classified at all.
    pub fn classify(mesh: &MeshData) -> Option<SkyFace> {
        match Self::name_faces(&mesh.name).as_slice() {
            [] => Self::from_centroid(mesh.centroid()),
            [face] => Some(*face),
            _ => None,
        }
    }

    /// The face named by `name`, or `None` when it names none or several.
    pub fn from_name(name: &str) -> Option<SkyFace> {
        match Self::name_faces(name).as_slice() {
            [face] => Some(*face),
            _ => None,
        }
    }

    fn name_faces(name: &str) -> Vec<SkyFace> {
        let mut faces = Vec::new();
        let lower = name.to_ascii_lowercase();
        let tokens = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|token| !token.is_empty());
        for token in tokens {
            let face = match token {
                "up" | "u" | "top" => SkyFace::Up,
                "down" | "d" | "bottom" => SkyFace::Down,
                "left" | "l" => SkyFace::Left,
                "right" | "r" => SkyFace::Right,
                "front" | "f" => SkyFace::Front,
                "back" | "b" => SkyFace::Back,
                _ => continue,
            };
            if !faces.contains(&face) {
                faces.push(face);
            }
        }
        faces
    }

    fn from_centroid([x, y, z]: [f32; 3]) -> Option<SkyFace> {
        let (ax, ay, az) = (x.abs(), y.abs(), z.abs());
        if ax.max(ay).max(az) <= f32::EPSILON {
            return None;
        }
        let face = if ay >= ax && ay >= az {
            if y > 0.0 { SkyFace::Up } else { SkyFace::Down }
        } else if ax >= az {
            if x > 0.0 { SkyFace::Right } else { SkyFace::Left }
        } else if z < 0.0 {
            SkyFace::Front
        } else {
            SkyFace::Back
        };
        Some(face)
    }
}

/// Pairs every sky sub-mesh with its face. Fails unless the model has
/// exactly six sub-meshes covering each face once.
pub fn map_sky_faces(meshes: Vec<MeshData>) -> Result<Vec<(SkyFace, MeshData)>, SceneError> {
    if meshes.len() != SkyFace::ALL.len() {
        return Err(SceneError::SkyFaces(format!(
            "expected 6 sub-meshes, found {}",
            meshes.len()
        )));
    }

    let mut mapped: Vec<(SkyFace, MeshData)> = Vec::with_capacity(meshes.len());
    for mesh in meshes {
        let Some(face) = SkyFace::classify(&mesh) else {
            return Err(SceneError::SkyFaces(format!(
                "cannot tell which face {:?} is",
                mesh.name
            )));
        };
        if let Some((_, other)) = mapped.iter().find(|(f, _)| *f == face) {
            return Err(SceneError::SkyFaces(format!(
                "{:?} and {:?} both map to {:?}",
                other.name, mesh.name, face
            )));
        }
        mapped.push((face, mesh));
    }
    Ok(mapped)
}

pub struct SkyFaceAsset {
    pub face: SkyFace,
    pub mesh: MeshData,
    pub texture: image::RgbaImage,
}

/// Everything the scene needs, decoded and generated but not yet on the GPU.
pub struct SceneAssets {
    pub sky: Vec<SkyFaceAsset>,
    pub terrain: TerrainMesh,
    pub terrain_texture: image::RgbaImage,
    pub vehicle: Vec<MeshData>,
    pub vehicle_texture: image::RgbaImage,
}

impl SceneAssets {
    /// Loads the sky, the terrain and the vehicle concurrently.
    pub async fn load(config: &SceneConfig) -> Result<Self> {
        config.validate()?;
        let (sky, (terrain, terrain_texture), (vehicle, vehicle_texture)) = futures::try_join!(
            load_sky(config),
            load_terrain(config),
            load_vehicle(config),
        )?;
        log::info!(
            "Scene assets ready: {} sky faces, {} terrain triangles, {} vehicle meshes",
            sky.len(),
            terrain.triangle_count(),
            vehicle.len()
        );
        Ok(Self {
            sky,
            terrain,
            terrain_texture,
            vehicle,
            vehicle_texture,
        })
    }
}

async fn load_sky(config: &SceneConfig) -> Result<Vec<SkyFaceAsset>> {
    let meshes = load_obj(&config.resolve(&config.sky_model)).await?;
    let faces = map_sky_faces(meshes)?;
    let fallback = config.resolve(&config.error_texture);
    let sky = try_join_all(faces.into_iter().map(|(face, mesh)| {
        let path = config.resolve(config.sky_faces.path(face));
        let fallback = fallback.clone();
        async move {
            let texture = load_image_or_fallback(&path, &fallback).await?;
            Ok::<_, SceneError>(SkyFaceAsset {
                face,
                mesh,
                texture,
            })
        }
    }))
    .await?;
    Ok(sky)
}

async fn load_terrain(config: &SceneConfig) -> Result<(TerrainMesh, image::RgbaImage)> {
    let heightmap_path = config.resolve(&config.heightmap);
    let texture_path = config.resolve(&config.terrain_texture);
    let fallback = config.resolve(&config.error_texture);

    let (heightmap, texture) = futures::try_join!(
        load_image(&heightmap_path),
        load_image_or_fallback(&texture_path, &fallback),
    )?;

    let terrain = &config.terrain;
    let builder =
        TerrainMeshBuilder::new(terrain.squares_x, terrain.squares_z)?.with_spacing(terrain.spacing);
    let (width, height) = heightmap.dimensions();
    let sampler = HeightmapSampler::new(HeightImage::from_rgba8(width, height, heightmap.into_raw())?)
        .with_divisor(terrain.height_divisor);

    let mesh = tokio::task::spawn_blocking(move || builder.build(&sampler)).await?;
    log::info!(
        "Generated terrain from {:?}: {}x{} vertices",
        heightmap_path,
        mesh.verts_x,
        mesh.verts_z
    );
    Ok((mesh, texture))
}

async fn load_vehicle(config: &SceneConfig) -> Result<(Vec<MeshData>, image::RgbaImage)> {
    let model_path = config.resolve(&config.vehicle_model);
    let texture_path = config.resolve(&config.vehicle_texture);
    let fallback = config.resolve(&config.error_texture);
    let (meshes, texture) = futures::try_join!(
        load_obj(&model_path),
        load_image_or_fallback(&texture_path, &fallback),
    )?;
    Ok((meshes, texture))
}

/// The uploaded scene. Model order is draw order.
pub struct Scene {
    pub models: Vec<Model>,
}

impl Scene {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layouts: &BindLayouts,
        assets: SceneAssets,
    ) -> Result<Self> {
        let texture_group = |img: &image::RgbaImage, label: &str| -> Result<wgpu::BindGroup> {
            let texture = Texture::from_rgba(device, queue, img, label)?;
            Ok(texture.bind_group(device, &layouts.texture, label))
        };

        let mut sky_meshes = Vec::with_capacity(assets.sky.len());
        for SkyFaceAsset {
            face,
            mesh,
            texture,
        } in &assets.sky
        {
            let label = format!("sky {:?}", face);
            let group = texture_group(texture, &label)?;
            sky_meshes.push(upload_mesh_data(device, mesh, Some(group)));
        }

        let cube_mesh = upload(device, "cube", &cube::vertices(), &cube::INDICES, None);

        let terrain_group = texture_group(&assets.terrain_texture, "terrain")?;
        let terrain_mesh = upload(
            device,
            "terrain",
            &assets.terrain.to_vertices(),
            &assets.terrain.indices,
            Some(terrain_group),
        );

        // One texture shared by every vehicle sub-mesh; each mesh owns a bind group onto it.
        let vehicle_texture = Texture::from_rgba(device, queue, &assets.vehicle_texture, "vehicle")?;
        let vehicle_meshes: Vec<_> = assets
            .vehicle
            .iter()
            .map(|mesh| {
                let group = vehicle_texture.bind_group(device, &layouts.texture, &mesh.name);
                upload_mesh_data(device, mesh, Some(group))
            })
            .collect();

        let transform = &layouts.transform;
        let models = vec![
            Model::new(device, transform, "skybox", ObjectKind::Skybox, sky_meshes),
            Model::new(device, transform, "cube", ObjectKind::Cube, vec![cube_mesh]),
            Model::new(device, transform, "terrain", ObjectKind::Terrain, vec![terrain_mesh]),
            Model::new(
                device,
                transform,
                "vehicle",
                ObjectKind::LoadedModel,
                vehicle_meshes,
            ),
        ];
        log::info!("Uploaded scene with {} models", models.len());
        Ok(Self { models })
    }

    /// Kind and mesh count of every model, in draw order.
    pub fn kinds(&self) -> impl Iterator<Item = (ObjectKind, usize)> + '_ {
        self.models.iter().map(|m| (m.kind, m.meshes.len()))
    }
}
