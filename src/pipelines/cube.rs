use crate::{
    data_structures::model::{ColourVertex, Vertex},
    dispatch::ProgramKind,
    pipelines::{BindLayouts, RasterState, mk_render_pipeline},
};

/// Vertex-coloured program for the cube. Uses the transform group only.
pub fn mk_cube_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &BindLayouts,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Cube Pipeline Layout"),
        bind_group_layouts: &[&layouts.transform],
        push_constant_ranges: &[],
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Cube Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("cube.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        "Cube Pipeline",
        &render_pipeline_layout,
        color_format,
        RasterState {
            depth: ProgramKind::Cube.depth_policy(),
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode,
        },
        &[ColourVertex::desc()],
        shader,
    )
}
