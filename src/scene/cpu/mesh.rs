use std::ops::Range;
use std::sync::Arc;

use glam::Vec3;

use crate::error::HalaSkinningError;
use crate::scene::{
  HalaBounds,
  HalaMeshVertex,
  HalaSkinParams,
  HalaSkinnedVertex,
  HALA_UNBOUND_BONE_INDEX,
};
use crate::scene::gpu::{
  HalaBufferMode,
  HalaBufferState,
  HalaRenderBackend,
};
use crate::scene::loader::HalaMeshGPUUploader;

/// The vertex ranges owned by one bone.
/// The ranges are stored as read from the file and may be negative or out of bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct HalaBoneBinding {
  pub bone_index: u32,
  pub bone_name: String,
  pub first_primary_vertex: i32,
  pub primary_vertex_count: i32,
  pub first_seam_vertex: i32,
  pub seam_vertex_count: i32,
}

impl HalaBoneBinding {

  /// The primary vertex range, None if it cannot be addressed.
  pub fn primary_range(&self) -> Option<Range<usize>> {
    Self::to_range(self.first_primary_vertex, self.primary_vertex_count)
  }

  /// The seam vertex range, None if it cannot be addressed.
  pub fn seam_range(&self) -> Option<Range<usize>> {
    Self::to_range(self.first_seam_vertex, self.seam_vertex_count)
  }

  fn to_range(first: i32, count: i32) -> Option<Range<usize>> {
    // An empty range owns nothing wherever it starts.
    if count == 0 {
      return Some(0..0);
    }
    let first = usize::try_from(first).ok()?;
    let count = usize::try_from(count).ok()?;
    Some(first..first.checked_add(count)?)
  }

}

/// Links a seam vertex to the primary vertex receiving its blend.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HalaBlendLink {
  pub weight: f32,
  pub target_primary_vertex: i32,
}

/// A seam vertex as stored in the mesh file.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HalaSeamVertex {
  pub position: Vec3,
  /// Stored in the file but not consumed by skinning.
  pub reserved_normal: Vec3,
}

/// The geometry of a mesh, shared by every instance and never mutated after loading.
#[derive(Debug)]
pub struct HalaMeshGeometry {
  pub version: i32,
  pub bone_names: Vec<String>,
  pub indices: Vec<u16>,
  pub bone_bindings: Vec<HalaBoneBinding>,
  pub blend_links: Vec<HalaBlendLink>,
  pub vertices: Vec<HalaMeshVertex>,
  pub seam_vertices: Vec<HalaSeamVertex>,
  pub bounds: HalaBounds,
}

/// The Drop implementation of the mesh geometry.
impl Drop for HalaMeshGeometry {
  fn drop(&mut self) {
    log::debug!("A HalaMeshGeometry with {} vertices dropped.", self.vertices.len());
  }
}

/// The implementation of the mesh geometry.
impl HalaMeshGeometry {

  /// return: The number of triangles.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// return: The number of primary vertices.
  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  /// return: The number of seam vertices.
  pub fn seam_count(&self) -> usize {
    self.blend_links.len()
  }

  /// Find the first binding whose bone name matches, case-insensitively.
  /// param bone_name: The bone name.
  /// return: The index of the binding if found.
  pub fn find_binding_index(&self, bone_name: &str) -> Option<usize> {
    self.bone_bindings.iter().position(|binding| binding.bone_name.eq_ignore_ascii_case(bone_name))
  }

}

/// A mesh instance owned by one actor.
/// The geometry is shared, the skinning state belongs to this instance only.
#[derive(Debug)]
pub struct HalaMesh {
  pub(crate) geometry: Arc<HalaMeshGeometry>,
  pub(crate) skin_params: Vec<HalaSkinParams>,
  pub(crate) blend_origins: Vec<Vec3>,
  pub(crate) seam_bone_indices: Vec<u32>,
  pub(crate) render_vertices: Vec<HalaSkinnedVertex>,
  pub(crate) is_dirty: bool,
  pub(crate) buffers: HalaBufferState,
}

/// Clones get their own skinning state and start unbound in immediate mode.
impl Clone for HalaMesh {
  fn clone(&self) -> Self {
    Self::new(Arc::clone(&self.geometry))
  }
}

/// The implementation of the mesh instance.
impl HalaMesh {

  /// Create a new unbound instance of the geometry.
  /// param geometry: The shared geometry.
  /// return: The mesh instance.
  pub fn new(geometry: Arc<HalaMeshGeometry>) -> Self {
    let vertex_count = geometry.vertex_count();
    let seam_count = geometry.seam_count();
    Self {
      geometry,
      skin_params: vec![HalaSkinParams::default(); vertex_count],
      blend_origins: vec![Vec3::ZERO; vertex_count],
      seam_bone_indices: vec![HALA_UNBOUND_BONE_INDEX; seam_count],
      render_vertices: Vec::new(),
      is_dirty: true,
      buffers: HalaBufferState::Immediate,
    }
  }

  /// return: The geometry shared with the clones of this instance.
  pub fn geometry(&self) -> &Arc<HalaMeshGeometry> {
    &self.geometry
  }

  /// return: The skin parameters, one per primary vertex.
  pub fn skin_params(&self) -> &[HalaSkinParams] {
    &self.skin_params
  }

  /// The seam positions written into the primary vertices they blend into.
  /// return: The blend origins, one per primary vertex.
  pub fn blend_origins(&self) -> &[Vec3] {
    &self.blend_origins
  }

  /// return: The bone index assigned to each seam vertex by the last bind.
  pub fn seam_bone_indices(&self) -> &[u32] {
    &self.seam_bone_indices
  }

  /// return: True if the render vertices are out of date.
  pub fn is_dirty(&self) -> bool {
    self.is_dirty
  }

  /// return: The current buffer mode.
  pub fn mode(&self) -> HalaBufferMode {
    self.buffers.mode()
  }

  /// return: The number of triangles.
  pub fn triangle_count(&self) -> usize {
    self.geometry.triangle_count()
  }

  /// return: The number of primary vertices.
  pub fn vertex_count(&self) -> usize {
    self.geometry.vertex_count()
  }

  /// Reset all skinning state to unbound.
  pub(crate) fn reset_skinning(&mut self) {
    self.skin_params.fill(HalaSkinParams::default());
    self.blend_origins.fill(Vec3::ZERO);
    self.seam_bone_indices.fill(HALA_UNBOUND_BONE_INDEX);
    self.is_dirty = true;
  }

  /// Get the interleaved vertices, rebuilding them if the skinning state changed.
  /// return: The vertices.
  pub fn render_vertices(&mut self) -> &[HalaSkinnedVertex] {
    if self.is_dirty || self.render_vertices.len() != self.geometry.vertex_count() {
      self.rebuild_render_vertices();
    }
    &self.render_vertices
  }

  fn rebuild_render_vertices(&mut self) {
    self.render_vertices.clear();
    self.render_vertices.extend(
      self.geometry.vertices.iter()
        .zip(self.skin_params.iter())
        .zip(self.blend_origins.iter())
        .map(|((vertex, params), blend_position)| HalaSkinnedVertex::new(vertex, params, *blend_position))
    );
  }

  /// Move the vertex and index buffers to the GPU.
  /// Call once per resource lifetime.
  /// param backend: The render backend.
  /// return: The result.
  pub fn store_on_gpu(&mut self, backend: &mut dyn HalaRenderBackend) -> Result<(), HalaSkinningError> {
    if let HalaBufferState::GpuResident(_) = self.buffers {
      log::warn!("The mesh is already stored on the GPU, the buffers will be recreated.");
    }
    self.render_vertices();
    let buffers = HalaMeshGPUUploader::upload(backend, &self.render_vertices, &self.geometry.indices)?;
    self.buffers = HalaBufferState::GpuResident(buffers);
    self.is_dirty = false;
    log::debug!("A HalaMesh with {} vertices stored on the GPU.", self.geometry.vertex_count());
    Ok(())
  }

  /// Drop the GPU buffers and go back to immediate mode.
  pub fn release_gpu(&mut self) {
    if let HalaBufferState::GpuResident(_) = std::mem::take(&mut self.buffers) {
      log::debug!("A HalaMesh released its GPU buffers.");
    }
  }

  /// Push the current skinning state to the GPU buffer.
  /// In immediate mode there is nothing to upload.
  /// return: The result.
  pub fn invalidate(&mut self) -> Result<(), HalaSkinningError> {
    self.render_vertices();
    if let HalaBufferState::GpuResident(buffers) = &mut self.buffers {
      HalaMeshGPUUploader::update_vertices(buffers, &self.render_vertices)?;
    }
    self.is_dirty = false;
    Ok(())
  }

  /// Draw the mesh.
  /// param backend: The render backend.
  /// return: The result.
  pub fn draw(&mut self, backend: &mut dyn HalaRenderBackend) -> Result<(), HalaSkinningError> {
    if self.is_dirty {
      self.invalidate()?;
    }
    let num_primitives = self.geometry.triangle_count() as u32;
    match &self.buffers {
      HalaBufferState::GpuResident(buffers) => backend.bind_and_draw(
        buffers.vertex_buffer.as_ref(),
        buffers.index_buffer.as_ref(),
        buffers.vertex_count,
        num_primitives,
      ),
      HalaBufferState::Immediate => backend.draw_immediate(
        &self.render_vertices,
        &self.geometry.indices,
        num_primitives,
      ),
    }
  }

  /// Apply the buffer mode requested by the configuration.
  /// param config: The configuration.
  /// param backend: The render backend.
  /// return: The result.
  pub fn apply_config(
    &mut self,
    config: &crate::config::HalaSkinningConfig,
    backend: &mut dyn HalaRenderBackend,
  ) -> Result<(), HalaSkinningError> {
    match (config.buffer_mode, self.mode()) {
      (HalaBufferMode::GpuResident, HalaBufferMode::Immediate) => self.store_on_gpu(backend),
      (HalaBufferMode::Immediate, HalaBufferMode::GpuResident) => {
        self.release_gpu();
        Ok(())
      },
      _ => Ok(()),
    }
  }

}
