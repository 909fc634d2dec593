use wgpu::util::DeviceExt;

use super::material::{SceneBindGroup, SceneUniform};
use super::pipeline::{create_mesh_pipeline, DepthTexture};
use crate::scene_core::stl::MeshData;

struct GpuMesh {
    position_buffer: wgpu::Buffer,
    normal_buffer: wgpu::Buffer,
    vertex_count: u32,
}

pub struct MeshRenderer {
    scene_bg: SceneBindGroup,
    pipeline: wgpu::RenderPipeline,
    depth: DepthTexture,
    mesh: Option<GpuMesh>,
}

impl MeshRenderer {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        mesh: &MeshData,
    ) -> Self {
        let scene_bg = SceneBindGroup::new(device);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh-pipeline-layout"),
            bind_group_layouts: &[&scene_bg.layout],
            push_constant_ranges: &[],
        });

        let pipeline =
            create_mesh_pipeline(device, config, &pipeline_layout, &shader, "mesh-pipeline");

        Self {
            scene_bg,
            pipeline,
            depth: DepthTexture::new(device, config, "mesh-depth"),
            mesh: upload_mesh(device, mesh),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) {
        self.depth = DepthTexture::new(device, config, "mesh-depth");
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.view
    }

    pub fn update_scene(&self, queue: &wgpu::Queue, uniform: &SceneUniform) {
        self.scene_bg.update(queue, uniform);
    }

    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        // Nothing to bind for an empty mesh; the pass still clears.
        let Some(mesh) = &self.mesh else {
            return;
        };

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.scene_bg.bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.position_buffer.slice(..));
        pass.set_vertex_buffer(1, mesh.normal_buffer.slice(..));
        pass.draw(0..mesh.vertex_count, 0..1);
    }
}

fn upload_mesh(device: &wgpu::Device, mesh: &MeshData) -> Option<GpuMesh> {
    if mesh.is_empty() {
        log::warn!("mesh has no triangles, skipping vertex upload");
        return None;
    }

    let position_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh-positions"),
        contents: bytemuck::cast_slice(&mesh.positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let normal_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("mesh-normals"),
        contents: bytemuck::cast_slice(&mesh.normals),
        usage: wgpu::BufferUsages::VERTEX,
    });

    Some(GpuMesh {
        position_buffer,
        normal_buffer,
        vertex_count: mesh.vertex_count(),
    })
}
