use std::sync::Arc;

use glam::Vec3;

use crate::config::{
  HalaSkinningConfig,
  HALA_DEFAULT_ROOT_BONE_NAME,
};
use crate::error::HalaSkinningError;
use crate::scene::HALA_UNBOUND_BONE_INDEX;
use super::mesh::HalaMesh;
use super::skeleton::HalaSkeletonNode;

/// Assigns bones and blend weights to the vertices of a mesh instance.
pub struct HalaBoneBinder;

/// The implementation of the bone binder.
impl HalaBoneBinder {
  /// Bind the mesh to the skeleton.
  /// Every bone is visited once in depth-first pre-order. Bones whose name matches
  /// a binding claim its primary and seam ranges. Once a bone named `root_bone_name`
  /// has been seen and the whole tree visited, the seam links are resolved into the
  /// secondary bone, weight and blend origin of their target vertices.
  /// Bindings without a matching bone stay unbound.
  /// param mesh: The mesh instance.
  /// param skeleton: The skeleton root.
  /// param root_bone_name: The reserved root bone name, compared case-insensitively.
  /// return: The result of invalidating the mesh buffers.
  pub fn bind<N: HalaSkeletonNode>(
    mesh: &mut HalaMesh,
    skeleton: &N,
    root_bone_name: &str,
  ) -> Result<(), HalaSkinningError> {
    let geometry = Arc::clone(&mesh.geometry);
    mesh.reset_skinning();

    let mut is_root_reached = false;
    let mut is_binding_matched = vec![false; geometry.bone_bindings.len()];
    let mut stack = vec![skeleton];
    while let Some(bone) = stack.pop() {
      if let Some(binding_index) = geometry.find_binding_index(bone.name()) {
        let binding = &geometry.bone_bindings[binding_index];
        is_binding_matched[binding_index] = true;
        log::trace!("Bone \"{}\" claims binding of \"{}\".", bone.name(), binding.bone_name);

        match binding.primary_range().and_then(|range| mesh.skin_params.get_mut(range)) {
          Some(params) => params.iter_mut().for_each(|p| p.primary_bone_index = bone.index()),
          None => log::warn!(
            "The primary range {} + {} of bone \"{}\" is outside {} vertices, skipped.",
            binding.first_primary_vertex, binding.primary_vertex_count, binding.bone_name, geometry.vertex_count()),
        }

        match binding.seam_range().and_then(|range| mesh.seam_bone_indices.get_mut(range)) {
          Some(indices) => indices.fill(bone.index()),
          None => log::warn!(
            "The seam range {} + {} of bone \"{}\" is outside {} seam vertices, skipped.",
            binding.first_seam_vertex, binding.seam_vertex_count, binding.bone_name, geometry.seam_count()),
        }
      }

      if bone.name().eq_ignore_ascii_case(root_bone_name) {
        is_root_reached = true;
      }

      stack.extend(bone.children().iter().rev());
    }

    for (binding, is_matched) in geometry.bone_bindings.iter().zip(is_binding_matched) {
      if !is_matched {
        log::warn!("The binding of bone \"{}\" is not matched by the skeleton.", binding.bone_name);
      }
    }

    if is_root_reached {
      Self::resolve_seams(mesh);
    } else {
      log::warn!("The root bone \"{}\" is not in the skeleton, seams are not resolved.", root_bone_name);
    }

    mesh.invalidate()
  }

  /// Write the seam bones and weights into their target vertices.
  /// A seam without a bone writes the unbound sentinel, dropping any blend set by an earlier seam.
  /// param mesh: The mesh instance.
  fn resolve_seams(mesh: &mut HalaMesh) {
    let geometry = Arc::clone(&mesh.geometry);
    for (seam_index, (link, seam_vertex)) in geometry.blend_links.iter().zip(geometry.seam_vertices.iter()).enumerate() {
      let bone_index = mesh.seam_bone_indices[seam_index];
      let target = usize::try_from(link.target_primary_vertex)
        .ok()
        .filter(|target| *target < mesh.skin_params.len());
      let Some(target) = target else {
        log::warn!(
          "The seam vertex {} targets vertex {} out of {}, skipped.",
          seam_index, link.target_primary_vertex, geometry.vertex_count());
        continue;
      };

      let params = &mut mesh.skin_params[target];
      params.secondary_bone_index = bone_index;
      if bone_index == HALA_UNBOUND_BONE_INDEX {
        params.secondary_weight = 0.0;
        mesh.blend_origins[target] = Vec3::ZERO;
      } else {
        params.secondary_weight = link.weight;
        mesh.blend_origins[target] = seam_vertex.position;
      }
    }
  }
}

/// The binding entry points of the mesh instance.
impl HalaMesh {

  /// Bind the mesh to the skeleton using the default root bone name.
  /// param skeleton: The skeleton root.
  /// return: The result.
  pub fn bind<N: HalaSkeletonNode>(&mut self, skeleton: &N) -> Result<(), HalaSkinningError> {
    HalaBoneBinder::bind(self, skeleton, HALA_DEFAULT_ROOT_BONE_NAME)
  }

  /// Bind the mesh to the skeleton using the configured root bone name.
  /// param skeleton: The skeleton root.
  /// param config: The configuration.
  /// return: The result.
  pub fn bind_with_config<N: HalaSkeletonNode>(
    &mut self,
    skeleton: &N,
    config: &HalaSkinningConfig,
  ) -> Result<(), HalaSkinningError> {
    HalaBoneBinder::bind(self, skeleton, &config.root_bone_name)
  }

}
