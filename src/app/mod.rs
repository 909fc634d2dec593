use std::time::Duration;

use anyhow::Result;
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::renderer_wgpu::camera::{ModelPose, ViewerCamera};
use crate::renderer_wgpu::gpu_context::GpuContext;
use crate::renderer_wgpu::material::SceneUniform;
use crate::renderer_wgpu::mesh::MeshRenderer;
use crate::scene_core::config::ViewerConfig;
use crate::scene_core::day_cycle::DayBand;
use crate::scene_core::scene::{SceneLighting, SceneState};
use crate::scene_core::stl::MeshData;

pub mod args;
mod event_loop;
pub mod input;
mod screenshot;

pub use event_loop::run_event_loop;

use input::TimeKeys;

pub struct AppState {
    window: &'static Window,
    gpu: GpuContext,
    mesh_renderer: MeshRenderer,
    camera: ViewerCamera,
    pose: ModelPose,
    scene: SceneState,
    time_keys: TimeKeys,
    title: String,
    frame_interval: Duration,
    last_band: Option<DayBand>,
    frame_index: u64,
    screenshot_pending: bool,
}

impl AppState {
    pub async fn new(
        window: &'static Window,
        config: &ViewerConfig,
        mesh: &MeshData,
    ) -> Result<Self> {
        let gpu = GpuContext::new(window).await?;
        let mesh_renderer = MeshRenderer::new(&gpu.device, &gpu.config, mesh);
        let scene = SceneState::new();

        Ok(Self {
            window,
            gpu,
            mesh_renderer,
            camera: ViewerCamera::new(&config.camera),
            pose: ModelPose::from(config.pose),
            last_band: scene.cycle().band(),
            scene,
            time_keys: TimeKeys::default(),
            title: config.window.title.clone(),
            frame_interval: config.frame_interval(),
            frame_index: 0,
            screenshot_pending: false,
        })
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    fn process_window_event(&mut self, event: &WindowEvent) {
        let _ = self.time_keys.process_window_event(event);

        if let WindowEvent::Focused(false) = event {
            self.time_keys.reset();
        }
    }

    fn request_screenshot(&mut self) {
        self.screenshot_pending = true;
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        self.mesh_renderer.resize(&self.gpu.device, &self.gpu.config);
    }

    fn update(&mut self) {
        if let Some(direction) = self.time_keys.direction() {
            self.scene.step(direction);
        }

        let lighting = self.scene.lighting();
        if lighting.band != self.last_band {
            log::debug!(
                "daytime {} entered {}",
                lighting.daytime,
                lighting.band.map_or("wrap", DayBand::label)
            );
            self.last_band = lighting.band;
        }

        let transforms = self.camera.transforms(self.gpu.aspect(), &self.pose);
        self.mesh_renderer
            .update_scene(&self.gpu.queue, &SceneUniform::new(&transforms, &lighting));

        self.window.set_title(&format!(
            "{} | {} | daytime: {} | shininess: {:.0}",
            self.title,
            lighting.band.map_or("wrap", DayBand::label),
            lighting.daytime,
            lighting.shininess,
        ));
        self.frame_index += 1;
    }

    fn render(&mut self) -> Result<(), SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("daycycle-render-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("mesh-render-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(&self.scene.lighting())),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.mesh_renderer.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.mesh_renderer.render(&mut pass);
        }

        if std::mem::take(&mut self.screenshot_pending) {
            self.handle_screenshot(&output.texture, encoder);
            output.present();
            return Ok(());
        }

        self.gpu.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn clear_color(lighting: &SceneLighting) -> wgpu::Color {
    let bg = lighting.background.as_dvec4();
    wgpu::Color {
        r: bg.x,
        g: bg.y,
        b: bg.z,
        a: bg.w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_uses_the_scene_background() {
        let lighting = SceneState::new().lighting();
        let color = clear_color(&lighting);
        assert!((color.r - 0.45).abs() < 1e-6);
        assert!((color.g - 0.8).abs() < 1e-6);
        assert_eq!(color.b, 1.0);
        assert_eq!(color.a, 1.0);
    }
}
