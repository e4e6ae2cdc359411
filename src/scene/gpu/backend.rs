use crate::error::HalaSkinningError;
use crate::scene::HalaSkinnedVertex;

/// A buffer allocated on the rendering device.
/// The buffer keeps whatever device handle it needs to upload itself.
pub trait HalaGpuBuffer {
  /// The size of the buffer in bytes.
  fn size(&self) -> usize;

  /// Upload the data into the buffer, starting at offset zero.
  /// param data: The bytes to upload.
  /// return: The result.
  fn upload(&mut self, data: &[u8]) -> Result<(), HalaSkinningError>;

  /// Get the concrete buffer, so the backend can recognize its own handles.
  fn as_any(&self) -> &dyn std::any::Any;
}

/// The render backend used to submit skinned meshes.
/// All calls must happen on the thread owning the render context.
pub trait HalaRenderBackend {
  /// Allocate a vertex buffer.
  /// param size: The size of the buffer in bytes.
  /// param debug_name: The debug name of the buffer.
  /// return: The buffer.
  fn allocate_vertex_buffer(&mut self, size: usize, debug_name: &str) -> Result<Box<dyn HalaGpuBuffer>, HalaSkinningError>;

  /// Allocate a 16-bit index buffer.
  /// param size: The size of the buffer in bytes.
  /// param debug_name: The debug name of the buffer.
  /// return: The buffer.
  fn allocate_index_buffer(&mut self, size: usize, debug_name: &str) -> Result<Box<dyn HalaGpuBuffer>, HalaSkinningError>;

  /// Bind the buffers and draw an indexed triangle list.
  /// param vertex_buffer: The vertex buffer.
  /// param index_buffer: The index buffer.
  /// param num_vertices: The number of vertices in the vertex buffer.
  /// param num_primitives: The number of triangles.
  /// return: The result.
  fn bind_and_draw(
    &mut self,
    vertex_buffer: &dyn HalaGpuBuffer,
    index_buffer: &dyn HalaGpuBuffer,
    num_vertices: u32,
    num_primitives: u32,
  ) -> Result<(), HalaSkinningError>;

  /// Draw an indexed triangle list directly from CPU memory.
  /// param vertices: The vertices.
  /// param indices: The indices.
  /// param num_primitives: The number of triangles.
  /// return: The result.
  fn draw_immediate(
    &mut self,
    vertices: &[HalaSkinnedVertex],
    indices: &[u16],
    num_primitives: u32,
  ) -> Result<(), HalaSkinningError>;
}
