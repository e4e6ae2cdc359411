use crate::{
  error::HalaSkinningError,
  scene::HalaSkinnedVertex,
};
use super::super::gpu::{
  HalaMeshBuffers,
  HalaRenderBackend,
};

/// Upload the mesh to the GPU from the CPU.
pub struct HalaMeshGPUUploader;

/// The implementation of the mesh uploader.
impl HalaMeshGPUUploader {
  /// Allocate the vertex and index buffers and upload both.
  /// param backend: The render backend.
  /// param vertices: The interleaved vertices.
  /// param indices: The triangle indices.
  /// return: The mesh buffers in the GPU.
  pub fn upload(
    backend: &mut dyn HalaRenderBackend,
    vertices: &[HalaSkinnedVertex],
    indices: &[u16],
  ) -> Result<HalaMeshBuffers, HalaSkinningError> {
    let vertex_data: &[u8] = bytemuck::cast_slice(vertices);
    let mut vertex_buffer = backend.allocate_vertex_buffer(vertex_data.len(), "skinned_mesh_vertex.buffer")?;
    vertex_buffer.upload(vertex_data)?;

    let index_data: &[u8] = bytemuck::cast_slice(indices);
    let mut index_buffer = backend.allocate_index_buffer(index_data.len(), "skinned_mesh_index.buffer")?;
    index_buffer.upload(index_data)?;

    Ok(HalaMeshBuffers {
      vertex_buffer,
      index_buffer,
      vertex_count: vertices.len() as u32,
      index_count: indices.len() as u32,
    })
  }

  /// Re-upload the whole vertex buffer.
  /// param buffers: The mesh buffers in the GPU.
  /// param vertices: The interleaved vertices.
  /// return: The result.
  pub fn update_vertices(
    buffers: &mut HalaMeshBuffers,
    vertices: &[HalaSkinnedVertex],
  ) -> Result<(), HalaSkinningError> {
    if vertices.len() as u32 != buffers.vertex_count {
      return Err(HalaSkinningError::backend(
        &format!("The vertex buffer holds {} vertices but {} are uploaded.", buffers.vertex_count, vertices.len()),
        None));
    }
    buffers.vertex_buffer.upload(bytemuck::cast_slice(vertices))
  }
}
