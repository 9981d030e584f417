//! Procedural terrain grid.
//!
//! The grid has `verts_x * verts_z` vertices stored row-major: vertex
//! (`column`, `row`) lives at index `row * verts_x + column`. Columns advance
//! along world +Z and rows along world +X, which together with the fixed
//! winding below makes every triangle of a flat grid face +Y.
//!
//! Cells are split along alternating diagonals. The toggle flips after every
//! cell and once more at the end of every row, so on even-width grids each
//! row starts with the opposite diagonal of the row before.

use crate::{
    data_structures::{heightmap::HeightmapSampler, model::ModelVertex, normals},
    error::SceneError,
};

/// Cosmetic per-vertex colour carried alongside the terrain geometry.
pub const TERRAIN_COLOUR: [f32; 3] = [0.5, 0.0, 0.8];

/// Which diagonal splits a grid cell `(v, v+1, v+W+1, v+W)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagonal {
    /// Split along `v .. v+W+1`.
    Leading,
    /// Split along `v+1 .. v+W`.
    Trailing,
}

#[derive(Clone, Debug)]
pub struct TerrainMeshBuilder {
    squares_x: u32,
    squares_z: u32,
    spacing: f32,
}

/// CPU-side terrain geometry, ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    pub verts_x: u32,
    pub verts_z: u32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colours: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves position, normal and uv for the GPU vertex layout.
    pub fn to_vertices(&self) -> Vec<ModelVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), tex_coords)| ModelVertex {
                position: *position,
                normal: *normal,
                tex_coords: *tex_coords,
            })
            .collect()
    }
}

impl TerrainMeshBuilder {
    pub const DEFAULT_SPACING: f32 = 8.0;

    pub fn new(squares_x: u32, squares_z: u32) -> Result<Self, SceneError> {
        if squares_x == 0 || squares_z == 0 {
            return Err(SceneError::DegenerateGeometry(format!(
                "terrain needs at least one square per side, got {}x{}",
                squares_x, squares_z
            )));
        }
        let verts = (squares_x as u64 + 1) * (squares_z as u64 + 1);
        if verts > u32::MAX as u64 {
            return Err(SceneError::DegenerateGeometry(format!(
                "terrain of {}x{} squares exceeds the 32-bit index range",
                squares_x, squares_z
            )));
        }
        Ok(Self {
            squares_x,
            squares_z,
            spacing: Self::DEFAULT_SPACING,
        })
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn verts_x(&self) -> u32 {
        self.squares_x + 1
    }

    pub fn verts_z(&self) -> u32 {
        self.squares_z + 1
    }

    /// Diagonal chosen for every cell, in row-major cell order.
    pub fn diagonal_pattern(&self) -> Vec<Diagonal> {
        diagonal_pattern(self.squares_x, self.squares_z)
    }

    /// Index list for the grid, six indices per cell.
    pub fn triangulate(&self) -> Vec<u32> {
        triangulate(self.squares_x, self.squares_z)
    }

    pub fn build(&self, sampler: &HeightmapSampler) -> TerrainMesh {
        let heights = sampler.height_field(self.verts_x(), self.verts_z());
        self.build_with_heights(&heights)
    }

    /// Builds the grid from precomputed heights (`row * verts_x + column`).
    /// Missing entries are treated as zero.
    pub fn build_with_heights(&self, heights: &[f32]) -> TerrainMesh {
        let verts_x = self.verts_x();
        let verts_z = self.verts_z();
        let count = verts_x as usize * verts_z as usize;

        let mut positions = Vec::with_capacity(count);
        let mut uvs = Vec::with_capacity(count);
        for row in 0..verts_z {
            for column in 0..verts_x {
                let index = (row * verts_x + column) as usize;
                let height = heights.get(index).copied().unwrap_or(0.0);
                positions.push([
                    row as f32 * self.spacing,
                    height,
                    column as f32 * self.spacing,
                ]);
                uvs.push([
                    column as f32 / self.squares_x as f32,
                    row as f32 / self.squares_z as f32,
                ]);
            }
        }

        let indices = self.triangulate();
        let normals = normals::synthesize(&positions, &indices);
        log::debug!(
            "Built terrain: {} vertices, {} triangles",
            positions.len(),
            indices.len() / 3
        );

        TerrainMesh {
            verts_x,
            verts_z,
            positions,
            normals,
            uvs,
            colours: vec![TERRAIN_COLOUR; count],
            indices,
        }
    }
}

// Callers go through `TerrainMeshBuilder`, whose constructor bounds the grid
// so the vertex arithmetic below stays inside u32.
fn diagonal_pattern(squares_x: u32, squares_z: u32) -> Vec<Diagonal> {
    let mut pattern = Vec::with_capacity(squares_x as usize * squares_z as usize);
    let mut toggle = true;
    for _ in 0..squares_z {
        for _ in 0..squares_x {
            pattern.push(if toggle {
                Diagonal::Leading
            } else {
                Diagonal::Trailing
            });
            toggle = !toggle;
        }
        toggle = !toggle;
    }
    pattern
}

fn triangulate(squares_x: u32, squares_z: u32) -> Vec<u32> {
    let verts_x = squares_x + 1;
    let pattern = diagonal_pattern(squares_x, squares_z);
    let mut indices = Vec::with_capacity(pattern.len() * 6);
    for (cell, diagonal) in pattern.into_iter().enumerate() {
        let cell = cell as u32;
        let (row, column) = (cell / squares_x, cell % squares_x);
        let v = row * verts_x + column;
        match diagonal {
            Diagonal::Leading => indices.extend_from_slice(&[
                v,
                v + 1,
                v + verts_x + 1,
                v,
                v + verts_x + 1,
                v + verts_x,
            ]),
            Diagonal::Trailing => indices.extend_from_slice(&[
                v,
                v + 1,
                v + verts_x,
                v + 1,
                v + verts_x + 1,
                v + verts_x,
            ]),
        }
    }
    indices
}
