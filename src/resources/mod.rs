use std::{
    io::{BufReader, Cursor},
    path::Path,
};

use crate::{
    data_structures::{model::MeshData, normals},
    error::SceneError,
};

/**
 * This module contains all logic for loading models/textures from external files
 * and creating the GPU resources for them.
 */
pub mod mesh;
pub mod texture;

pub async fn load_binary(path: &Path) -> Result<Vec<u8>, SceneError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| SceneError::asset(path, e))
}

pub async fn load_string(path: &Path) -> Result<String, SceneError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SceneError::asset(path, e))
}

/// Loads an OBJ file into one [`MeshData`] per object/group.
///
/// Materials are not read: every scene object gets its textures from the
/// scene configuration. Sub-meshes without triangles are dropped; a file
/// without any usable sub-mesh is an error.
pub async fn load_obj(path: &Path) -> Result<Vec<MeshData>, SceneError> {
    let obj_text = load_string(path).await?;
    let meshes = parse_obj(&obj_text, path).await?;
    log::info!("Loaded model {:?} with {} meshes", path, meshes.len());
    Ok(meshes)
}

pub(crate) async fn parse_obj(obj_text: &str, path: &Path) -> Result<Vec<MeshData>, SceneError> {
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));

    let (models, _materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| async { tobj::MTLLoadResult::Err(tobj::LoadError::OpenFileFailed) },
    )
    .await
    .map_err(|e| SceneError::asset(path, e))?;

    let meshes: Vec<MeshData> = models
        .into_iter()
        .map(to_mesh_data)
        .filter(|mesh| {
            if !mesh.is_valid() {
                log::warn!("Dropping empty mesh {:?} from {:?}", mesh.name, path);
            }
            mesh.is_valid()
        })
        .collect();

    if meshes.is_empty() {
        return Err(SceneError::asset(path, "model contains no triangles"));
    }
    Ok(meshes)
}

fn to_mesh_data(m: tobj::Model) -> MeshData {
    let mesh = m.mesh;
    let vertex_count = mesh.positions.len() / 3;
    let positions: Vec<[f32; 3]> = (0..vertex_count)
        .map(|i| {
            [
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ]
        })
        .collect();

    // OBJ files without normals get them synthesized from their faces.
    let normals = if mesh.normals.len() == mesh.positions.len() {
        (0..vertex_count)
            .map(|i| {
                [
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                ]
            })
            .collect()
    } else {
        normals::synthesize(&positions, &mesh.indices)
    };

    let vertices = positions
        .into_iter()
        .zip(normals)
        .enumerate()
        .map(|(i, (position, normal))| crate::data_structures::model::ModelVertex {
            position,
            normal,
            tex_coords: [
                mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                1.0 - mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
            ],
        })
        .collect();

    MeshData {
        name: m.name,
        vertices,
        indices: mesh.indices,
    }
}
