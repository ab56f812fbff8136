//! Application shell: winit event loop, window, GPU setup and the per-frame
//! callback that drives camera, uniforms and rendering.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::{
    config::{Config, WindowConfig},
    data::Organisation,
    error::PlanetariumError,
    gfx::{
        picking::{pick_planet, Ray},
        rendering::FrameStatus,
        scene::Scene,
        RenderEngine,
    },
    layout::PlanetPlacement,
    performance::PerformanceMonitor,
    ui::{controls_help, organisation_panel, UiManager},
};

/// A press and release closer than this (in pixels) counts as a click.
const CLICK_SLOP: f64 = 4.0;

/// Longest step fed to the camera, so a stalled frame does not teleport it.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// The planetarium viewer
///
/// Built from already-fetched organisations and their placements; [`run`]
/// opens the window and renders until it is closed or Escape is pressed.
///
/// [`run`]: PlanetariumApp::run
pub struct PlanetariumApp {
    state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    organisations: Vec<Organisation>,
    performance: PerformanceMonitor,

    window_config: WindowConfig,
    star_radius: f32,
    seed: Option<u64>,

    last_frame: Instant,
    cursor_position: Option<PhysicalPosition<f64>>,
    press_position: Option<PhysicalPosition<f64>>,
    error: Option<PlanetariumError>,
}

impl PlanetariumApp {
    /// Builds the scene, one planet per organisation.
    ///
    /// `placements` must be index-aligned with `organisations`.
    pub fn new(
        config: &Config,
        organisations: Vec<Organisation>,
        placements: &[PlanetPlacement],
    ) -> Self {
        debug_assert_eq!(organisations.len(), placements.len());

        let scene = Scene::from_placements(
            config,
            placements,
            config.window.width,
            config.window.height,
        );
        let stats = scene.statistics();
        log::info!(
            "Scene built: {} planets, radius {:.2}..{:.2}, {:?} camera",
            stats.planet_count,
            stats.min_radius,
            stats.max_radius,
            scene.camera_rig.mode()
        );

        Self {
            state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                organisations,
                performance: PerformanceMonitor::new(),
                window_config: config.window.clone(),
                // Inside the far plane so the shell is never clipped.
                star_radius: config.camera.far * 0.8,
                seed: config.layout.seed,
                last_frame: Instant::now(),
                cursor_position: None,
                press_position: None,
                error: None,
            },
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.state.scene
    }

    /// Runs the event loop until the window closes
    ///
    /// Errors raised while creating the window or GPU device, or an
    /// unrecoverable surface error, end the loop and are returned here.
    pub fn run(mut self) -> Result<(), PlanetariumError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.state)?;

        match self.state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlanetariumError> {
        let attributes = WindowAttributes::default()
            .with_title(self.window_config.title.clone())
            .with_inner_size(LogicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);
        let (width, height) = window.inner_size().into();

        let mut renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.window_config.vsync,
        ))?;

        self.scene.camera_rig.resize(width, height);
        renderer.init_scene(&self.scene, self.star_radius, self.seed);

        if self.window_config.show_ui {
            self.ui_manager = Some(UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window,
            ));
        }

        self.render_engine = Some(renderer);
        self.window = Some(window);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlanetariumError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    /// The per-frame callback: step the camera, upload uniforms, draw.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_engine)) =
            (self.window.as_ref(), self.render_engine.as_mut())
        else {
            return;
        };

        let now = Instant::now();
        let frame_time = now - self.last_frame;
        self.last_frame = now;
        self.performance.record_frame(frame_time);

        self.scene
            .update(frame_time.min(MAX_FRAME_STEP).as_secs_f32());
        render_engine.update(&mut self.scene);
        self.performance.update_render_stats(
            self.scene.planets.len() as u32,
            render_engine.planet_triangle_count(),
        );

        let result = if let Some(ui_manager) = self.ui_manager.as_mut() {
            let scene = &mut self.scene;
            let organisations = &self.organisations;
            let performance = &self.performance;
            let help = scene.camera_rig.help_text();

            render_engine.render_frame(Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 color_attachment: &wgpu::TextureView| {
                    ui_manager.update_logic(window, |ui| {
                        organisation_panel(ui, scene, organisations);
                        performance.render_overlay(ui);
                        controls_help(ui, help);
                    });
                    ui_manager.render_display_only(device, queue, encoder, color_attachment);
                },
            ))
        } else {
            render_engine.render_frame(
                None::<
                    fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
                >,
            )
        };

        match result {
            Ok(FrameStatus::Presented) => {}
            Ok(FrameStatus::Skipped) => log::debug!("Frame skipped"),
            Err(error) => self.fail(event_loop, error.into()),
        }
    }

    fn handle_left_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => self.press_position = self.cursor_position,
            ElementState::Released => {
                let (Some(pressed), Some(released)) =
                    (self.press_position.take(), self.cursor_position)
                else {
                    return;
                };
                let (dx, dy) = (released.x - pressed.x, released.y - pressed.y);
                if dx * dx + dy * dy <= CLICK_SLOP * CLICK_SLOP {
                    self.pick_at(released);
                }
            }
        }
    }

    /// Selects the planet under the cursor; a miss clears the selection.
    fn pick_at(&mut self, position: PhysicalPosition<f64>) {
        let Some(render_engine) = self.render_engine.as_ref() else {
            return;
        };
        let (width, height) = render_engine.surface_size();

        let Some(ray) = Ray::from_screen(
            (position.x as f32, position.y as f32),
            (width as f32, height as f32),
            self.scene.inverse_view_proj(),
        ) else {
            return;
        };

        let hit = pick_planet(&ray, &self.scene.planets);
        if let Some(hit) = hit {
            if let Some(organisation) = self.organisations.get(hit.planet_index) {
                log::info!(
                    "Selected {} (score {}) at distance {:.1}",
                    organisation.ens_name,
                    organisation.score,
                    hit.distance
                );
            }
        }
        self.scene.select(hit.map(|hit| hit.planet_index));
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }

        if let Err(error) = self.init_graphics(event_loop) {
            self.fail(event_loop, error);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if let WindowEvent::CursorMoved { position, .. } = event {
            self.cursor_position = Some(position);
        }

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_window_event(&window, window_id, &event) {
                // Releases still reach the camera so a drag never sticks.
                if let WindowEvent::MouseInput {
                    state: ElementState::Released,
                    button,
                    ..
                } = event
                {
                    self.scene
                        .camera_rig
                        .process_mouse_button(button, ElementState::Released);
                    self.press_position = None;
                }
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape && state == ElementState::Pressed {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_rig.process_keyboard(key_code, state);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.scene.camera_rig.process_mouse_button(button, state);
                if button == MouseButton::Left {
                    self.handle_left_button(state);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scene.camera_rig.process_scroll(&delta);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width == 0 || height == 0 {
                    return;
                }
                self.scene.camera_rig.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        if let Some(ui_manager) = self.ui_manager.as_ref() {
            if ui_manager.wants_mouse() {
                return;
            }
        }

        if let DeviceEvent::MouseMotion { delta } = event {
            self.scene.camera_rig.process_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
