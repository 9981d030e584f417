//! Meshes, models and their GPU vertex layouts.
//!
//! A [`Model`] groups the meshes of one logical scene object. Its
//! [`ObjectKind`] is the only thing the dispatcher looks at when choosing a
//! program, depth policy and model transform.

use std::ops::Range;

use wgpu::util::DeviceExt;

/// Closed set of scene objects the renderer knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Skybox,
    Terrain,
    Cube,
    LoadedModel,
}

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Untextured vertex with a flat colour, used by the cube.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColourVertex {
    pub position: [f32; 3],
    pub colour: [f32; 3],
}

impl Vertex for ColourVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColourVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// CPU-side indexed triangle mesh as produced by the model loader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    pub fn centroid(&self) -> [f32; 3] {
        if self.vertices.is_empty() {
            return [0.0; 3];
        }
        let sum = self.vertices.iter().fold([0.0f32; 3], |acc, v| {
            [
                acc[0] + v.position[0],
                acc[1] + v.position[1],
                acc[2] + v.position[2],
            ]
        });
        let n = self.vertices.len() as f32;
        [sum[0] / n, sum[1] / n, sum[2] / n]
    }
}

/// Per-model uniform: the combined projection-view and the model matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub combined: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new(combined: cgmath::Matrix4<f32>, model: cgmath::Matrix4<f32>) -> Self {
        Self {
            combined: combined.into(),
            model: model.into(),
        }
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        use cgmath::SquareMatrix;
        Self::new(cgmath::Matrix4::identity(), cgmath::Matrix4::identity())
    }
}

/// GPU mesh. Owns every handle needed to draw it.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub texture: Option<wgpu::BindGroup>,
}

#[derive(Debug)]
pub struct Model {
    pub name: String,
    pub kind: ObjectKind,
    pub meshes: Vec<Mesh>,
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

impl Model {
    pub fn new(
        device: &wgpu::Device,
        transform_layout: &wgpu::BindGroupLayout,
        name: &str,
        kind: ObjectKind,
        meshes: Vec<Mesh>,
    ) -> Self {
        let transform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Transform Buffer", name)),
            contents: bytemuck::cast_slice(&[TransformUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} transform_bind_group", name)),
        });
        Self {
            name: name.to_string(),
            kind,
            meshes,
            transform_buffer,
            transform_bind_group,
        }
    }
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh, transform: &'a wgpu::BindGroup);
    fn draw_mesh_range(
        &mut self,
        mesh: &'a Mesh,
        elements: Range<u32>,
        transform: &'a wgpu::BindGroup,
    );
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh, transform: &'b wgpu::BindGroup) {
        self.draw_mesh_range(mesh, 0..mesh.num_elements, transform);
    }

    fn draw_mesh_range(
        &mut self,
        mesh: &'b Mesh,
        elements: Range<u32>,
        transform: &'b wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, transform, &[]);
        if let Some(texture) = &mesh.texture {
            self.set_bind_group(1, texture, &[]);
        }
        self.draw_indexed(elements, 0, 0..1);
    }
}
