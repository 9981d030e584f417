//! Per-frame render dispatch.
//!
//! Every frame the [`RenderDispatcher`] walks the scene in order and, keyed
//! only on each model's [`ObjectKind`], picks the program, the view transform
//! and the model transform:
//!
//! | kind        | program | depth write/test | view            | model transform              |
//! |-------------|---------|------------------|-----------------|------------------------------|
//! | Skybox      | Sky     | off / off        | rotation only   | identity                     |
//! | Terrain     | Main    | on / on          | full            | identity                     |
//! | LoadedModel | Main    | on / on          | full            | scale, translate, yaw        |
//! | Cube        | Cube    | on / on          | full            | scale, translate, spin       |
//!
//! Planning is pure CPU work producing a [`FramePlan`]; [`crate::render`]
//! turns the plan into GPU commands.

use std::collections::HashMap;

use cgmath::{Matrix3, Matrix4, Rad, SquareMatrix, Vector3};
use instant::Duration;
use serde::Deserialize;

use crate::{
    camera::{Camera, OPENGL_TO_WGPU_MATRIX},
    config::{CubePlacement, SceneConfig, VehiclePlacement},
    data_structures::model::{ObjectKind, TransformUniform},
};

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 4000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    Sky,
    Main,
    Cube,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 3] = [ProgramKind::Sky, ProgramKind::Main, ProgramKind::Cube];

    pub fn depth_policy(self) -> DepthPolicy {
        match self {
            ProgramKind::Sky => DepthPolicy {
                write: false,
                test: false,
            },
            ProgramKind::Main | ProgramKind::Cube => DepthPolicy {
                write: true,
                test: true,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProgramKind::Sky => "sky",
            ProgramKind::Main => "main",
            ProgramKind::Cube => "cube",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthPolicy {
    pub write: bool,
    pub test: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Full,
    /// Camera translation stripped, so the object stays centred on the eye.
    RotationOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawState {
    pub program: ProgramKind,
    pub depth: DepthPolicy,
    pub view: ViewMode,
}

pub fn draw_state(kind: ObjectKind) -> DrawState {
    let (program, view) = match kind {
        ObjectKind::Skybox => (ProgramKind::Sky, ViewMode::RotationOnly),
        ObjectKind::Terrain | ObjectKind::LoadedModel => (ProgramKind::Main, ViewMode::Full),
        ObjectKind::Cube => (ProgramKind::Cube, ViewMode::Full),
    };
    DrawState {
        program,
        depth: program.depth_policy(),
        view,
    }
}

/// How fast the cube turns.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinRate {
    /// Fixed angle per rendered frame; speed depends on the frame rate.
    PerFrame(f32),
    /// Radians per second of elapsed time.
    PerSecond(f32),
}

impl SpinRate {
    pub fn step(self, dt: Duration) -> f32 {
        match self {
            SpinRate::PerFrame(step) => step,
            SpinRate::PerSecond(rate) => rate * dt.as_secs_f32(),
        }
    }
}

impl Default for SpinRate {
    /// 0.001 rad per frame at 60 fps.
    fn default() -> Self {
        SpinRate::PerSecond(0.06)
    }
}

/// Rotation state of one spinning object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub angle: f32,
    pub rotate_y: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            rotate_y: true,
        }
    }
}

impl AnimationState {
    pub fn rotation(&self) -> Matrix4<f32> {
        if self.rotate_y {
            Matrix4::from_angle_y(Rad(self.angle))
        } else {
            Matrix4::from_angle_x(Rad(self.angle))
        }
    }

    /// Adds `step` to the angle. Past a full turn the angle restarts at zero
    /// and the axis switches between Y and X.
    pub fn advance(&mut self, step: f32) {
        self.angle += step;
        if self.angle > std::f32::consts::TAU {
            self.angle = 0.0;
            self.rotate_y = !self.rotate_y;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub model: usize,
    pub mesh: usize,
    pub program: ProgramKind,
}

/// Everything the GPU side needs for one frame: one transform per model and
/// one draw per mesh, both in scene order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePlan {
    pub transforms: Vec<(usize, TransformUniform)>,
    pub draws: Vec<DrawCall>,
}

impl FramePlan {
    /// The draws that can actually be issued. A draw is dropped, with a
    /// warning, when `has_program` rejects its program or when
    /// `mesh_elements` reports its mesh as missing or empty. Dropping a draw
    /// never affects the others.
    pub fn resolve(
        &self,
        has_program: impl Fn(ProgramKind) -> bool,
        mesh_elements: impl Fn(usize, usize) -> Option<u32>,
    ) -> Vec<DrawCall> {
        self.draws
            .iter()
            .filter(|draw| {
                if !has_program(draw.program) {
                    log::warn!("No {} program, skipping draw", draw.program.label());
                    return false;
                }
                match mesh_elements(draw.model, draw.mesh) {
                    Some(0) => {
                        log::warn!(
                            "Mesh {} of model {} is empty, skipping draw",
                            draw.mesh,
                            draw.model
                        );
                        false
                    }
                    Some(_) => true,
                    None => {
                        log::warn!(
                            "Mesh {} of model {} does not exist, skipping draw",
                            draw.mesh,
                            draw.model
                        );
                        false
                    }
                }
            })
            .copied()
            .collect()
    }
}

pub fn projection_matrix(aspect: f32) -> Matrix4<f32> {
    let aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    OPENGL_TO_WGPU_MATRIX
        * cgmath::perspective(cgmath::Deg(FOV_Y_DEGREES), aspect, Z_NEAR, Z_FAR)
}

pub fn view_matrix(camera: &Camera) -> Matrix4<f32> {
    let eye = camera.position();
    Matrix4::look_at_rh(eye, eye + camera.look_vector(), camera.up_vector())
}

/// Keeps the rotational 3x3 part of `view` and drops its translation.
pub fn rotation_only(view: Matrix4<f32>) -> Matrix4<f32> {
    Matrix3::from_cols(view.x.truncate(), view.y.truncate(), view.z.truncate()).into()
}

#[derive(Debug)]
pub struct RenderDispatcher {
    cube: CubePlacement,
    vehicle: VehiclePlacement,
    animations: HashMap<usize, AnimationState>,
}

impl RenderDispatcher {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            cube: config.cube.clone(),
            vehicle: config.vehicle.clone(),
            animations: HashMap::new(),
        }
    }

    pub fn animation(&self, model: usize) -> Option<&AnimationState> {
        self.animations.get(&model)
    }

    /// Plans one frame. `models` yields each model's kind and mesh count in
    /// scene order. Cube animations advance exactly once per call.
    pub fn plan<I>(&mut self, models: I, camera: &Camera, aspect: f32, dt: Duration) -> FramePlan
    where
        I: IntoIterator<Item = (ObjectKind, usize)>,
    {
        let projection = projection_matrix(aspect);
        let view = view_matrix(camera);
        let sky_view = rotation_only(view);

        let mut plan = FramePlan::default();
        for (index, (kind, mesh_count)) in models.into_iter().enumerate() {
            let state = draw_state(kind);
            let combined = match state.view {
                ViewMode::Full => projection * view,
                ViewMode::RotationOnly => projection * sky_view,
            };
            let model = self.model_transform(index, kind, dt);
            plan.transforms
                .push((index, TransformUniform::new(combined, model)));
            plan.draws.extend((0..mesh_count).map(|mesh| DrawCall {
                model: index,
                mesh,
                program: state.program,
            }));
        }
        plan
    }

    fn model_transform(&mut self, index: usize, kind: ObjectKind, dt: Duration) -> Matrix4<f32> {
        match kind {
            ObjectKind::Skybox | ObjectKind::Terrain => Matrix4::identity(),
            ObjectKind::LoadedModel => {
                Matrix4::from_scale(self.vehicle.scale)
                    * Matrix4::from_translation(Vector3::from(self.vehicle.translation))
                    * Matrix4::from_angle_y(Rad(self.vehicle.yaw_radians))
            }
            ObjectKind::Cube => {
                let animation = self.animations.entry(index).or_default();
                let rotation = animation.rotation();
                animation.advance(self.cube.spin.step(dt));
                Matrix4::from_scale(self.cube.scale)
                    * Matrix4::from_translation(Vector3::from(self.cube.translation))
                    * rotation
            }
        }
    }
}
