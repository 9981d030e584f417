use crate::{
    data_structures::model::{ModelVertex, Vertex},
    dispatch::ProgramKind,
    pipelines::{BindLayouts, RasterState, mk_render_pipeline},
};

/// Unlit textured program for the sky cube. The cube is seen from inside, so
/// nothing is culled, and it neither reads nor writes depth.
pub fn mk_sky_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &BindLayouts,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::RenderPipeline {
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Sky Pipeline Layout"),
        bind_group_layouts: &[&layouts.transform, &layouts.texture],
        push_constant_ranges: &[],
    });

    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Sky Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("sky.wgsl").into()),
    };

    mk_render_pipeline(
        device,
        "Sky Pipeline",
        &render_pipeline_layout,
        color_format,
        RasterState {
            depth: ProgramKind::Sky.depth_policy(),
            cull_mode: None,
            polygon_mode,
        },
        &[ModelVertex::desc()],
        shader,
    )
}
