pub mod mesh_loader;
pub mod gpu_uploader;

pub use mesh_loader::HalaMeshLoader;
pub use gpu_uploader::HalaMeshGPUUploader;
