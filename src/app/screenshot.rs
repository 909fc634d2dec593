use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use super::AppState;

const CAPTURE_DIR: &str = "captures";

impl AppState {
    /// Submits `encoder` along with a copy of the frame and writes it as PNG.
    pub(super) fn handle_screenshot(
        &self,
        texture: &wgpu::Texture,
        mut encoder: wgpu::CommandEncoder,
    ) {
        let width = self.gpu.config.width;
        let height = self.gpu.config.height;
        let unpadded_row = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row = unpadded_row.div_ceil(align) * align;

        let staging = self.gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("screenshot-staging"),
            size: (padded_row * height) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.gpu.queue.submit(Some(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        if let Err(e) = self.gpu.device.poll(wgpu::PollType::wait_indefinitely()) {
            log::warn!("screenshot readback failed: {e}");
            return;
        }

        let mapped = rx
            .recv()
            .map_err(|_| anyhow!("map callback dropped"))
            .and_then(|r| r.map_err(|e| anyhow!("{e}")));

        let result = mapped.and_then(|()| {
            let data = slice.get_mapped_range();
            let bgra = is_bgra(self.gpu.config.format);
            let pixels = unpad_rows(&data, height, padded_row, unpadded_row, bgra);
            save_png(&pixels, width, height, self.frame_index)
        });

        match result {
            Ok(path) => log::info!("screenshot saved: {}", path.display()),
            Err(e) => log::warn!("screenshot failed: {e:#}"),
        }
    }
}

fn is_bgra(format: wgpu::TextureFormat) -> bool {
    matches!(
        format,
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
    )
}

/// Drops the row alignment padding and swizzles BGRA to RGBA when needed.
fn unpad_rows(
    data: &[u8],
    height: u32,
    padded_row: u32,
    unpadded_row: u32,
    bgra: bool,
) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((unpadded_row * height) as usize);
    for row in data.chunks(padded_row as usize).take(height as usize) {
        let row = &row[..unpadded_row as usize];
        if bgra {
            for px in row.chunks_exact(4) {
                pixels.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        } else {
            pixels.extend_from_slice(row);
        }
    }
    pixels
}

fn save_png(pixels: &[u8], width: u32, height: u32, frame: u64) -> Result<PathBuf> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let dir = Path::new(CAPTURE_DIR);
    std::fs::create_dir_all(dir).context("failed to create captures dir")?;

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let path = dir.join(format!("daycycle-{secs}-{frame}.png"));

    image::save_buffer(&path, pixels, width, height, image::ColorType::Rgba8)
        .context("failed to encode PNG")?;
    let _ = std::fs::copy(&path, dir.join("latest.png"));

    Ok(path)
}
