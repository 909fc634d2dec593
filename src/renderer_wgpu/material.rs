use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::camera::Transforms;
use crate::scene_core::scene::SceneLighting;

/// Matches `SceneUniforms` in `shaders/mesh.wgsl`; the vec3 fields share
/// their 16-byte slot with the following scalar.
#[repr(C)]
#[derive(Debug, Clone, Copy, Zeroable, Pod)]
pub struct SceneUniform {
    pub mv: [[f32; 4]; 4],
    pub mvp: [[f32; 4]; 4],
    pub direction_light: [f32; 3],
    pub shininess: f32,
    pub material_color: [f32; 3],
    pub _padding: f32,
}

impl SceneUniform {
    pub fn new(transforms: &Transforms, lighting: &SceneLighting) -> Self {
        Self {
            mv: transforms.mv.to_cols_array_2d(),
            mvp: transforms.mvp.to_cols_array_2d(),
            direction_light: lighting.direction_light.to_array(),
            shininess: lighting.shininess,
            material_color: lighting.material_color.to_array(),
            _padding: 0.0,
        }
    }
}

pub struct SceneBindGroup {
    pub layout: wgpu::BindGroupLayout,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl SceneBindGroup {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let initial = SceneUniform {
            mv: Mat4::IDENTITY.to_cols_array_2d(),
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
            direction_light: Vec3::Y.to_array(),
            shininess: 10.0,
            material_color: Vec3::ONE.to_array(),
            _padding: 0.0,
        };
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene-uniform-buffer"),
            contents: bytemuck::cast_slice(&[initial]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene-bind-group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            layout,
            buffer,
            bind_group,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: &SceneUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }
}
