//! Render programs.
//!
//! One [`Program`] per [`ProgramKind`]. Each bakes its depth policy and cull
//! mode into the pipeline state; when the device supports line rasterization
//! a second, wireframe variant is built alongside the filled one.

use std::collections::HashMap;

use crate::{
    data_structures::texture::Texture,
    dispatch::{DepthPolicy, ProgramKind},
    error::SceneError,
    resources::texture::{texture_layout, transform_layout},
};

pub mod basic;
pub mod cube;
pub mod sky;

/// Bind group layouts shared by the programs and the uploaded models.
#[derive(Debug)]
pub struct BindLayouts {
    /// Group 0: per-model transform uniform.
    pub transform: wgpu::BindGroupLayout,
    /// Group 1: diffuse texture and sampler.
    pub texture: wgpu::BindGroupLayout,
}

impl BindLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            transform: transform_layout(device),
            texture: texture_layout(device),
        }
    }
}

#[derive(Debug)]
pub struct Program {
    pub fill: wgpu::RenderPipeline,
    pub line: Option<wgpu::RenderPipeline>,
}

impl Program {
    /// The wireframe variant if asked for and available, the filled one otherwise.
    pub fn select(&self, wireframe: bool) -> &wgpu::RenderPipeline {
        match (&self.line, wireframe) {
            (Some(line), true) => line,
            _ => &self.fill,
        }
    }
}

#[derive(Debug, Default)]
pub struct Programs {
    programs: HashMap<ProgramKind, Program>,
}

impl Programs {
    /// Builds every program. Any validation error aborts the whole set.
    pub async fn build(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        layouts: &BindLayouts,
        line_mode: bool,
    ) -> Result<Self, SceneError> {
        let mut programs = HashMap::new();
        for kind in ProgramKind::ALL {
            let program = build_program(device, color_format, layouts, kind, line_mode).await?;
            log::info!("Built the {} program", kind.label());
            programs.insert(kind, program);
        }
        Ok(Self { programs })
    }

    pub fn get(&self, kind: ProgramKind) -> Option<&Program> {
        self.programs.get(&kind)
    }
}

async fn build_program(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    layouts: &BindLayouts,
    kind: ProgramKind,
    line_mode: bool,
) -> Result<Program, SceneError> {
    let make = |polygon_mode| match kind {
        ProgramKind::Sky => sky::mk_sky_pipeline(device, color_format, layouts, polygon_mode),
        ProgramKind::Main => basic::mk_basic_pipeline(device, color_format, layouts, polygon_mode),
        ProgramKind::Cube => cube::mk_cube_pipeline(device, color_format, layouts, polygon_mode),
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let fill = make(wgpu::PolygonMode::Fill);
    let line = line_mode.then(|| make(wgpu::PolygonMode::Line));
    if let Some(error) = device.pop_error_scope().await {
        log::error!("The {} program failed validation: {error}", kind.label());
        return Err(SceneError::ShaderBuild {
            program: kind.label().to_string(),
            message: error.to_string(),
        });
    }
    Ok(Program { fill, line })
}

/// Fixed-function state that differs between programs.
#[derive(Clone, Copy, Debug)]
pub struct RasterState {
    pub depth: DepthPolicy,
    pub cull_mode: Option<wgpu::Face>,
    pub polygon_mode: wgpu::PolygonMode,
}

impl RasterState {
    /// Depth state for the pipeline: compare `Less` when testing, `Always`
    /// otherwise.
    pub fn depth_stencil(&self) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: Texture::DEPTH_FORMAT,
            depth_write_enabled: self.depth.write,
            depth_compare: if self.depth.test {
                wgpu::CompareFunction::Less
            } else {
                wgpu::CompareFunction::Always
            },
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    raster: RasterState,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(shader);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: raster.cull_mode,
            polygon_mode: raster.polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(raster.depth_stencil()),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
