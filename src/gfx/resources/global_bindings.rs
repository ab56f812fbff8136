//! Global uniform bindings for camera, lighting and sky data
//!
//! Everything the shaders share for a frame lives in one uniform buffer bound
//! at group 0 of every pipeline.

use cgmath::{Matrix4, SquareMatrix};

use crate::{
    config::{LightingConfig, MaterialConfig, SceneConfig},
    gfx::camera::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly. Every member is a
/// vec4 or mat4 so the layout needs no manual padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    /// rgb = ambient colour * intensity
    pub ambient: [f32; 4],
    /// xyz = position, w = range (0 disables falloff)
    pub light_position: [f32; 4],
    /// rgb = colour * intensity
    pub light_color: [f32; 4],
    /// rgb = specular colour, w = shininess
    pub specular: [f32; 4],
    pub sky_zenith: [f32; 4],
    pub sky_horizon: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(
        camera: &CameraUniform,
        lighting: &LightingConfig,
        material: &MaterialConfig,
        backdrop: &SceneConfig,
    ) -> Self {
        let view_proj = Matrix4::from(camera.view_proj);
        let inv_view_proj = view_proj.invert().unwrap_or_else(Matrix4::identity);

        Self {
            view_proj: camera.view_proj,
            inv_view_proj: inv_view_proj.into(),
            view_position: camera.view_position,
            ambient: scaled(lighting.ambient_color, lighting.ambient_intensity),
            light_position: extend(lighting.light_position, lighting.light_range),
            light_color: scaled(lighting.light_color, lighting.light_intensity),
            specular: extend(material.specular, material.shininess),
            sky_zenith: extend(backdrop.sky_zenith, 1.0),
            sky_horizon: extend(backdrop.sky_horizon, 1.0),
        }
    }
}

fn extend(v: [f32; 3], w: f32) -> [f32; 4] {
    [v[0], v[1], v[2], w]
}

fn scaled(color: [f32; 3], intensity: f32) -> [f32; 4] {
    [
        color[0] * intensity,
        color[1] * intensity,
        color[2] * intensity,
        1.0,
    ]
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Bind group layout and bind group for the global uniforms (group 0).
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
