pub mod camera;
pub mod gpu_context;
pub mod material;
pub mod mesh;
pub mod pipeline;
