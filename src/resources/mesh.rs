use wgpu::util::DeviceExt;

use crate::data_structures::model;

/// Uploads vertices and indices into a GPU [`model::Mesh`] that owns its buffers.
pub fn upload<V: bytemuck::Pod>(
    device: &wgpu::Device,
    name: &str,
    vertices: &[V],
    indices: &[u32],
    texture: Option<wgpu::BindGroup>,
) -> model::Mesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    model::Mesh {
        name: name.to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: indices.len() as u32,
        texture,
    }
}

pub fn upload_mesh_data(
    device: &wgpu::Device,
    data: &model::MeshData,
    texture: Option<wgpu::BindGroup>,
) -> model::Mesh {
    upload(device, &data.name, &data.vertices, &data.indices, texture)
}
