//! Frame rendering.
//!
//! [`Renderer`] owns the programs, the uploaded scene and the dispatcher. Each
//! frame it asks the dispatcher for a [`FramePlan`](crate::dispatch::FramePlan),
//! writes every model's transform uniform and replays the plan's draws inside
//! a single render pass.
//!
//! A draw whose program is missing, or whose mesh has nothing to draw, is
//! skipped rather than treated as an error.

use instant::Duration;

use crate::{
    config::SceneConfig,
    context::Context,
    data_structures::model::DrawMesh,
    dispatch::RenderDispatcher,
    pipelines::Programs,
    scene::Scene,
};

pub struct Renderer {
    pub programs: Programs,
    pub scene: Scene,
    pub dispatcher: RenderDispatcher,
}

impl Renderer {
    pub fn new(programs: Programs, scene: Scene, config: &SceneConfig) -> Self {
        Self {
            programs,
            scene,
            dispatcher: RenderDispatcher::new(config),
        }
    }

    pub fn render(&mut self, ctx: &Context, dt: Duration) -> Result<(), wgpu::SurfaceError> {
        let plan = self.dispatcher.plan(
            self.scene.kinds(),
            &ctx.camera,
            ctx.projection.aspect(),
            dt,
        );
        for (index, uniform) in &plan.transforms {
            if let Some(model) = self.scene.models.get(*index) {
                ctx.queue.write_buffer(
                    &model.transform_buffer,
                    0,
                    bytemuck::cast_slice(&[*uniform]),
                );
            }
        }

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Read once so the whole frame uses the same variant.
        let wireframe = ctx.wireframe && ctx.line_mode_supported;
        {
            let [r, g, b, a] = ctx.clear_colour;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let draws = plan.resolve(
                |kind| self.programs.get(kind).is_some(),
                |model, mesh| {
                    self.scene
                        .models
                        .get(model)
                        .and_then(|m| m.meshes.get(mesh))
                        .map(|m| m.num_elements)
                },
            );
            for draw in draws {
                let (Some(program), Some(model)) =
                    (self.programs.get(draw.program), self.scene.models.get(draw.model))
                else {
                    continue;
                };
                let Some(mesh) = model.meshes.get(draw.mesh) else {
                    continue;
                };
                render_pass.set_pipeline(program.select(wireframe));
                render_pass.draw_mesh(mesh, &model.transform_bind_group);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
