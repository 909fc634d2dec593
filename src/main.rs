use anyhow::Context;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::WindowBuilder;

use daycycle_viewer::app::args::LaunchArgs;
use daycycle_viewer::app::{self, AppState};
use daycycle_viewer::scene_core::config::ViewerConfig;
use daycycle_viewer::scene_core::stl::load_stl_file;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = LaunchArgs::from_env_args()?;
    let mut config = ViewerConfig::load(&args.config_path);
    if let Some(mesh_path) = args.mesh_path {
        config.mesh_path = mesh_path;
    }

    let mesh = load_stl_file(&config.mesh_path)?;
    log::info!(
        "loaded {} triangles from {}",
        mesh.triangle_count(),
        config.mesh_path.display()
    );

    let event_loop = EventLoop::new()?;

    let window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
            .build(&event_loop)
            .context("failed to create window")?,
    ));

    let app = pollster::block_on(AppState::new(window, &config, &mesh))?;

    app::run_event_loop(app, event_loop)
}
