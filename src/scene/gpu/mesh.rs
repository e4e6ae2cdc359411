use serde::{
  Deserialize,
  Serialize,
};

use super::backend::HalaGpuBuffer;

/// The draw path of a mesh.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HalaBufferMode {
  /// Vertices and indices are submitted from CPU memory every draw.
  #[default]
  Immediate,
  /// Vertices and indices live in device buffers, re-uploaded on invalidation.
  GpuResident,
}

/// The buffers of a mesh in the GPU.
pub struct HalaMeshBuffers {
  pub vertex_buffer: Box<dyn HalaGpuBuffer>,
  pub index_buffer: Box<dyn HalaGpuBuffer>,
  pub vertex_count: u32,
  pub index_count: u32,
}

impl std::fmt::Debug for HalaMeshBuffers {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HalaMeshBuffers")
      .field("vertex_buffer_size", &self.vertex_buffer.size())
      .field("index_buffer_size", &self.index_buffer.size())
      .field("vertex_count", &self.vertex_count)
      .field("index_count", &self.index_count)
      .finish()
  }
}

/// The buffer state of a mesh instance.
#[derive(Debug, Default)]
pub enum HalaBufferState {
  #[default]
  Immediate,
  GpuResident(HalaMeshBuffers),
}

impl HalaBufferState {

  pub fn mode(&self) -> HalaBufferMode {
    match self {
      HalaBufferState::Immediate => HalaBufferMode::Immediate,
      HalaBufferState::GpuResident(_) => HalaBufferMode::GpuResident,
    }
  }

}
