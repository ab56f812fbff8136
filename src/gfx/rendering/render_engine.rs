//! WGPU-based rendering engine for the planetarium
//!
//! Owns the surface, device and queue, the depth buffer and the global
//! uniforms, and draws the frame: sky, stars, planets, then the UI overlay.

use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use wgpu::{Device, TextureFormat};

use super::{
    backdrop::{SkyboxRenderer, StarfieldRenderer},
    pipeline_manager::{PipelineConfig, PipelineManager},
    planet_renderer::PlanetRenderer,
};
use crate::{
    error::RenderError,
    gfx::{
        geometry::{generate_sphere, generate_star_points, StarVertex},
        resources::{GlobalBindings, GlobalUBO, GlobalUBOContent, TextureResource},
        scene::{PlanetInstance, Scene, Vertex3D},
    },
};

const PLANET_PIPELINE: &str = "Planets";
const STARFIELD_PIPELINE: &str = "Starfield";
const SKYBOX_PIPELINE: &str = "Skybox";

/// Outcome of [`RenderEngine::render_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface was unavailable this frame; nothing was drawn.
    Skipped,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,

    planet_renderer: Option<PlanetRenderer>,
    starfield: Option<StarfieldRenderer>,
    skybox: Option<SkyboxRenderer>,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Present with `Fifo` instead of `Immediate`
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using GPU adapter '{}' ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::IncompatibleSurface)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync, &surface_capabilities.present_modes),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("planet", include_str!("planet.wgsl"));
        pipeline_manager.load_shader("starfield", include_str!("starfield.wgsl"));
        pipeline_manager.load_shader("skybox", include_str!("skybox.wgsl"));

        pipeline_manager.register_pipeline(
            PLANET_PIPELINE,
            PipelineConfig::default()
                .with_label("PLANETS")
                .with_shader("planet")
                .with_bind_group_layouts(vec![global_bindings.layout().clone()])
                .with_vertex_layouts(vec![Vertex3D::desc(), PlanetInstance::desc()])
                .with_depth(TextureResource::DEPTH_FORMAT, true, wgpu::CompareFunction::Less)
                .with_color_target(format, Some(wgpu::BlendState::REPLACE)),
        );

        // Stars sit behind everything but still hide behind planets.
        pipeline_manager.register_pipeline(
            STARFIELD_PIPELINE,
            PipelineConfig::default()
                .with_label("STARFIELD")
                .with_shader("starfield")
                .with_bind_group_layouts(vec![global_bindings.layout().clone()])
                .with_vertex_layouts(vec![StarVertex::desc()])
                .with_primitive_topology(wgpu::PrimitiveTopology::PointList)
                .with_cull_mode(None)
                .with_depth(
                    TextureResource::DEPTH_FORMAT,
                    false,
                    wgpu::CompareFunction::LessEqual,
                )
                .with_color_target(format, Some(wgpu::BlendState::REPLACE)),
        );

        pipeline_manager.register_pipeline(
            SKYBOX_PIPELINE,
            PipelineConfig::default()
                .with_label("SKYBOX")
                .with_shader("skybox")
                .with_bind_group_layouts(vec![global_bindings.layout().clone()])
                .with_cull_mode(None)
                .with_depth(TextureResource::DEPTH_FORMAT, false, wgpu::CompareFunction::Always)
                .with_color_target(format, None),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for error in errors {
                log::error!("{}", error);
            }
        }

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            planet_renderer: None,
            starfield: None,
            skybox: None,
            clear_color: wgpu::Color::BLACK,
        })
    }

    /// Builds the GPU resources for `scene`: the shared sphere mesh, the
    /// instance buffer and whichever backdrop passes are enabled.
    ///
    /// Stars are placed on a shell of `star_radius` around the camera,
    /// reproducibly when `seed` is set.
    pub fn init_scene(&mut self, scene: &Scene, star_radius: f32, seed: Option<u64>) {
        let backdrop = &scene.backdrop;
        let [longitude, latitude] = backdrop.sphere_segments;
        let sphere = generate_sphere(longitude, latitude);

        let mut planets = PlanetRenderer::new(&self.device, &sphere, scene.planets.len());
        planets.update_instances(&self.device, &self.queue, &scene.instances());
        self.planet_renderer = Some(planets);

        self.starfield = backdrop.starfield.then(|| {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
                None => StdRng::from_os_rng(),
            };
            let stars = generate_star_points(backdrop.star_count, star_radius, &mut rng);
            StarfieldRenderer::new(&self.device, &stars)
        });
        self.skybox = backdrop.skybox.then(SkyboxRenderer::new);

        let [r, g, b] = backdrop.clear_color;
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        log::info!(
            "Scene resources ready: {} planets, {} sphere triangles, {} stars, skybox {}",
            scene.planets.len(),
            sphere.triangle_count(),
            self.starfield.as_ref().map_or(0, |s| s.star_count()),
            if self.skybox.is_some() { "on" } else { "off" },
        );
    }

    /// Writes the camera, light and material uniforms and, when the scene
    /// reports a change, the planet instance data.
    pub fn update(&mut self, scene: &mut Scene) {
        let content = GlobalUBOContent::new(
            &scene.camera_uniform(),
            &scene.lighting,
            &scene.material,
            &scene.backdrop,
        );
        self.global_ubo.update_content(&self.queue, content);

        if scene.take_instances_dirty() {
            if let Some(planets) = self.planet_renderer.as_mut() {
                planets.update_instances(&self.device, &self.queue, &scene.instances());
            }
        }
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped, as is
    /// a timeout. Only out-of-memory and unknown surface errors are returned.
    pub fn render_frame<F>(
        &mut self,
        ui_callback: Option<F>,
    ) -> Result<FrameStatus, wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {:?}, reconfiguring", error);
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring surface texture, skipping frame");
                return Ok(FrameStatus::Skipped);
            }
            Err(error) => return Err(error),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            if let Some(skybox) = &self.skybox {
                if let Some(pipeline) = self.pipeline_manager.get_pipeline(SKYBOX_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    skybox.render(&mut render_pass);
                }
            }

            if let Some(starfield) = &self.starfield {
                if let Some(pipeline) = self.pipeline_manager.get_pipeline(STARFIELD_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    starfield.render(&mut render_pass);
                }
            }

            if let Some(planets) = &self.planet_renderer {
                if let Some(pipeline) = self.pipeline_manager.get_pipeline(PLANET_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    planets.render(&mut render_pass);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(FrameStatus::Presented)
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero sizes (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    ///
    /// Used for creating compatible render targets and UI systems.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Triangles submitted per frame for the planets.
    pub fn planet_triangle_count(&self) -> u32 {
        self.planet_renderer
            .as_ref()
            .map_or(0, |planets| planets.triangle_count())
    }
}

/// `Fifo` is always supported; without vsync prefer `Immediate`, then `Mailbox`.
fn present_mode(vsync: bool, supported: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
        .into_iter()
        .find(|mode| supported.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_mode_falls_back_to_fifo() {
        use wgpu::PresentMode::*;
        assert_eq!(present_mode(true, &[Immediate, Fifo]), Fifo);
        assert_eq!(present_mode(false, &[Immediate, Fifo]), Immediate);
        assert_eq!(present_mode(false, &[Mailbox, Fifo]), Mailbox);
        assert_eq!(present_mode(false, &[Fifo]), Fifo);
    }
}
