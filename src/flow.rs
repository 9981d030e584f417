//! Application event loop.
//!
//! [`run`] opens the window and drives the scene with winit's
//! [`ApplicationHandler`]. The scene is constructed once, when the window is
//! first resumed:
//! 1. Create the GPU [`Context`]
//! 2. Build the programs and load the CPU-side assets concurrently
//! 3. Upload the scene
//!
//! If any step fails the error is logged, the event loop exits and [`run`]
//! returns the error. Afterwards every redraw moves the camera and renders
//! one frame.

use std::sync::Arc;

use anyhow::Result;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    config::SceneConfig,
    context::Context,
    pipelines::{BindLayouts, Programs},
    render::Renderer,
    scene::{Scene, SceneAssets},
};

pub struct AppState {
    pub(crate) ctx: Context,
    renderer: Renderer,
    mouse_look: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> Result<Self> {
        let ctx = Context::new(window, config).await?;
        let layouts = BindLayouts::new(&ctx.device);

        let (programs, assets) = futures::try_join!(
            async {
                Ok::<_, anyhow::Error>(
                    Programs::build(
                        &ctx.device,
                        ctx.config.format,
                        &layouts,
                        ctx.line_mode_supported,
                    )
                    .await?,
                )
            },
            SceneAssets::load(config),
        )?;
        let scene = Scene::upload(&ctx.device, &ctx.queue, &layouts, assets)?;

        Ok(Self {
            renderer: Renderer::new(programs, scene, config),
            ctx,
            mouse_look: false,
        })
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: SceneConfig,
    state: Option<AppState>,
    failure: Option<anyhow::Error>,
    last_time: Instant,
}

impl App {
    fn new(config: SceneConfig) -> Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            config,
            state: None,
            failure: None,
            last_time: Instant::now(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("Scene construction failed: {error:#}");
        self.failure = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes().with_title("Heightfield Scene");
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.config))
        {
            Ok(state) => {
                log::info!("Scene ready");
                state.ctx.window.request_redraw();
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if state.mouse_look {
                state.ctx.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        state.ctx.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::KeyF => state.ctx.toggle_wireframe(),
                KeyCode::Escape => event_loop.exit(),
                _ => {}
            },
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Right,
                ..
            } => state.mouse_look = button_state.is_pressed(),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                state.ctx.controller.update(&mut state.ctx.camera, dt);
                match state.renderer.render(&state.ctx, dt) {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.ctx.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory, exiting");
                        event_loop.exit();
                    }
                    Err(e) => log::error!("Unable to render {}", e),
                }
                state.ctx.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Opens the window and renders the scene described by `config` until the
/// window closes.
pub fn run(config: SceneConfig) -> Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
