use glam::{
  Vec2,
  Vec3,
};

/// The bone index written into skin parameters that no bone has claimed.
pub const HALA_UNBOUND_BONE_INDEX: u32 = u32::MAX;

/// The static vertex geometry shared by every instance of a mesh.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HalaMeshVertex {
  pub position: Vec3,
  pub normal: Vec3,
  pub tex_coord: Vec2,
}

/// The per-instance skin parameters of a primary vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HalaSkinParams {
  pub primary_bone_index: u32,
  pub secondary_bone_index: u32,
  pub secondary_weight: f32,
}

impl Default for HalaSkinParams {
  fn default() -> Self {
    Self {
      primary_bone_index: HALA_UNBOUND_BONE_INDEX,
      secondary_bone_index: HALA_UNBOUND_BONE_INDEX,
      secondary_weight: 0.0,
    }
  }
}

impl HalaSkinParams {

  pub fn has_primary(&self) -> bool {
    self.primary_bone_index != HALA_UNBOUND_BONE_INDEX
  }

  pub fn has_secondary(&self) -> bool {
    self.secondary_bone_index != HALA_UNBOUND_BONE_INDEX
  }

  /// Pack the parameters for the vertex shader. Unbound bones become -1.
  /// return: The packed parameters.
  pub fn to_shader_params(&self) -> [f32; 3] {
    let pack = |index: u32| if index == HALA_UNBOUND_BONE_INDEX { -1.0 } else { index as f32 };
    [
      pack(self.primary_bone_index),
      pack(self.secondary_bone_index),
      self.secondary_weight,
    ]
  }

}

/// The interleaved vertex submitted to the renderer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HalaSkinnedVertex {
  pub position: Vec3,
  pub normal: Vec3,
  pub tex_coord: Vec2,
  pub skin_params: [f32; 3],
  pub blend_position: Vec3,
}

impl HalaSkinnedVertex {

  /// Layer the instance state onto the static geometry.
  /// param vertex: The static vertex.
  /// param params: The skin parameters.
  /// param blend_position: The blend origin of the vertex.
  /// return: The interleaved vertex.
  pub fn new(vertex: &HalaMeshVertex, params: &HalaSkinParams, blend_position: Vec3) -> Self {
    Self {
      position: vertex.position,
      normal: vertex.normal,
      tex_coord: vertex.tex_coord,
      skin_params: params.to_shader_params(),
      blend_position,
    }
  }

}
