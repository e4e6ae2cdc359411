use glam::{
  Mat4,
  Vec3,
};
use rayon::prelude::*;

use crate::config::HalaSkinningConfig;
use crate::scene::{
  HalaMeshVertex,
  HalaSkinParams,
};
use super::mesh::HalaMesh;

/// The deformed positions and normals of a mesh instance.
#[derive(Debug, Clone, Default)]
pub struct HalaSkinnedPose {
  pub positions: Vec<Vec3>,
  pub normals: Vec<Vec3>,
}

/// Two-bone linear blend skinning on the CPU.
pub struct HalaCpuSkinner;

/// The implementation of the CPU skinner.
impl HalaCpuSkinner {
  /// Deform the mesh instance with the bone matrices.
  /// The primary bone moves the vertex, then the result is blended toward the
  /// blend origin moved by the secondary bone. Unbound or missing bones act as identity.
  /// param mesh: The bound mesh instance.
  /// param bone_matrices: The bone matrices indexed by bone index.
  /// param config: The configuration.
  /// return: The deformed pose.
  pub fn skin(mesh: &HalaMesh, bone_matrices: &[Mat4], config: &HalaSkinningConfig) -> HalaSkinnedPose {
    let geometry = mesh.geometry();
    let (positions, normals): (Vec<Vec3>, Vec<Vec3>) = if geometry.vertex_count() >= config.parallel_skinning_threshold {
      geometry.vertices.par_iter()
        .zip(mesh.skin_params().par_iter())
        .zip(mesh.blend_origins().par_iter())
        .map(|((vertex, params), blend_origin)| Self::skin_vertex(vertex, params, *blend_origin, bone_matrices))
        .unzip()
    } else {
      geometry.vertices.iter()
        .zip(mesh.skin_params().iter())
        .zip(mesh.blend_origins().iter())
        .map(|((vertex, params), blend_origin)| Self::skin_vertex(vertex, params, *blend_origin, bone_matrices))
        .unzip()
    };

    HalaSkinnedPose { positions, normals }
  }

  fn skin_vertex(
    vertex: &HalaMeshVertex,
    params: &HalaSkinParams,
    blend_origin: Vec3,
    bone_matrices: &[Mat4],
  ) -> (Vec3, Vec3) {
    let primary = Self::get_matrix(bone_matrices, params.primary_bone_index);
    let position = primary.transform_point3(vertex.position);
    let normal = primary.transform_vector3(vertex.normal).normalize_or_zero();
    if !params.has_secondary() {
      return (position, normal);
    }

    let secondary = Self::get_matrix(bone_matrices, params.secondary_bone_index);
    let blended = position.lerp(secondary.transform_point3(blend_origin), params.secondary_weight);
    (blended, normal)
  }

  fn get_matrix(bone_matrices: &[Mat4], bone_index: u32) -> Mat4 {
    bone_matrices.get(bone_index as usize).copied().unwrap_or(Mat4::IDENTITY)
  }
}
