use crate::{
    data_structures::model::{ModelVertex, Vertex},
    dispatch::ProgramKind,
    pipelines::{BindLayouts, RasterState, mk_render_pipeline},
};

/// Textured, diffusely lit program shared by the terrain and loaded models.
pub fn mk_basic_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &BindLayouts,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Main Pipeline Layout"),
        bind_group_layouts: &[&layouts.transform, &layouts.texture],
        push_constant_ranges: &[],
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Main Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("basic.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        "Main Pipeline",
        &render_pipeline_layout,
        color_format,
        RasterState {
            depth: ProgramKind::Main.depth_policy(),
            cull_mode: Some(wgpu::Face::Back),
            polygon_mode,
        },
        &[ModelVertex::desc()],
        shader,
    )
}
