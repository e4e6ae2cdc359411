pub mod backend;
pub mod mesh;

pub use backend::{
  HalaGpuBuffer,
  HalaRenderBackend,
};
pub use mesh::{
  HalaBufferMode,
  HalaBufferState,
  HalaMeshBuffers,
};
