use std::io::{
  BufReader,
  Cursor,
  Read,
};
use std::path::Path;
use std::sync::Arc;

use byteorder::{
  LittleEndian,
  ReadBytesExt,
};
use glam::{
  Vec2,
  Vec3,
};

use crate::error::HalaSkinningError;
use crate::scene::{
  HalaBounds,
  HalaMeshVertex,
};
use super::super::cpu::mesh::{
  HalaBlendLink,
  HalaBoneBinding,
  HalaMesh,
  HalaMeshGeometry,
  HalaSeamVertex,
};

/// The fixed-point scale of the blend weights.
const BLEND_WEIGHT_SCALE: f32 = 32768.0;

/// Upper bound of the capacity reserved up front from counts read off the stream.
const MAX_RESERVED_ELEMENTS: usize = 1 << 16;

/// The binary mesh loader.
pub struct HalaMeshLoader;

/// The implementation of the binary mesh loader.
impl HalaMeshLoader {
  /// Load a mesh from the given path.
  /// param path: The path of the mesh file.
  /// return: The loaded mesh instance.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<HalaMesh, HalaSkinningError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
      .map_err(|err| HalaSkinningError::new(
        crate::error::HalaSkinningErrorKind::Io,
        &format!("Open mesh file \"{:?}\" failed.", path),
        Some(Box::new(err))))?;
    let mesh = Self::load_from_reader(&mut BufReader::new(file))?;
    log::debug!("A HalaMesh loaded from \"{:?}\".", path);
    Ok(mesh)
  }

  /// Load a mesh from an in-memory buffer.
  /// param bytes: The mesh file content.
  /// return: The loaded mesh instance.
  pub fn load_from_bytes(bytes: &[u8]) -> Result<HalaMesh, HalaSkinningError> {
    Self::load_from_reader(&mut Cursor::new(bytes))
  }

  /// Load a mesh from a reader.
  /// param reader: The reader.
  /// return: The loaded mesh instance.
  pub fn load_from_reader<R: Read>(reader: &mut R) -> Result<HalaMesh, HalaSkinningError> {
    let geometry = Self::read_geometry(reader)?;
    Ok(HalaMesh::new(Arc::new(geometry)))
  }

  /// Read the mesh geometry from a reader.
  /// Only the layout is checked, the binding ranges and blend targets are taken as stored.
  /// param reader: The reader.
  /// return: The geometry.
  pub fn read_geometry<R: Read>(reader: &mut R) -> Result<HalaMeshGeometry, HalaSkinningError> {
    let mut stream = MeshStream { reader };

    let version = stream.read_i32("version")?;

    let bone_count = stream.read_count("bone count")?;
    let mut bone_names = Vec::with_capacity(bone_count.min(MAX_RESERVED_ELEMENTS));
    for _ in 0..bone_count {
      bone_names.push(stream.read_string("bone name")?);
    }

    let face_count = stream.read_count("face count")?;
    let mut indices = Vec::with_capacity(face_count.saturating_mul(3).min(MAX_RESERVED_ELEMENTS));
    for _ in 0..face_count.saturating_mul(3) {
      // Indices are stored as int32 but addressed with 16 bits.
      indices.push(stream.read_i32("triangle index")? as u16);
    }

    let binding_count = stream.read_count("bone binding count")?;
    let mut bone_bindings = Vec::with_capacity(binding_count.min(MAX_RESERVED_ELEMENTS));
    for binding_index in 0..binding_count {
      let bone_index = stream.read_i32("bone binding bone index")?;
      let first_primary_vertex = stream.read_i32("bone binding first primary vertex")?;
      let primary_vertex_count = stream.read_i32("bone binding primary vertex count")?;
      let first_seam_vertex = stream.read_i32("bone binding first seam vertex")?;
      let seam_vertex_count = stream.read_i32("bone binding seam vertex count")?;

      let bone_name = usize::try_from(bone_index)
        .ok()
        .and_then(|index| bone_names.get(index))
        .ok_or_else(|| HalaSkinningError::index(&format!(
          "The bone binding {} references bone {} but only {} bones exist.",
          binding_index, bone_index, bone_names.len())))?
        .clone();

      bone_bindings.push(HalaBoneBinding {
        bone_index: bone_index as u32,
        bone_name,
        first_primary_vertex,
        primary_vertex_count,
        first_seam_vertex,
        seam_vertex_count,
      });
    }

    let vertex_count = stream.read_count("primary vertex count")?;
    let mut tex_coords = Vec::with_capacity(vertex_count.min(MAX_RESERVED_ELEMENTS));
    for _ in 0..vertex_count {
      let u = stream.read_f32("texture coordinate")?;
      let v = stream.read_f32("texture coordinate")?;
      tex_coords.push(Vec2::new(u, v));
    }

    let seam_count = stream.read_count("seam vertex count")?;
    let mut blend_links = Vec::with_capacity(seam_count.min(MAX_RESERVED_ELEMENTS));
    for _ in 0..seam_count {
      let weight_raw = stream.read_i32("blend weight")?;
      let target_primary_vertex = stream.read_i32("blend target vertex")?;
      blend_links.push(HalaBlendLink {
        weight: weight_raw as f32 / BLEND_WEIGHT_SCALE,
        target_primary_vertex,
      });
    }

    let vertex_count2 = stream.read_count("second primary vertex count")?;
    if vertex_count2 != vertex_count {
      return Err(HalaSkinningError::format(
        &format!("The first primary vertex count {} does not match the second primary vertex count {}.", vertex_count, vertex_count2),
        None));
    }

    let mut vertices = Vec::with_capacity(vertex_count.min(MAX_RESERVED_ELEMENTS));
    for tex_coord in tex_coords {
      let position = stream.read_flipped_vec3("primary vertex position")?;
      let normal = stream.read_flipped_vec3("primary vertex normal")?;
      vertices.push(HalaMeshVertex {
        position,
        normal,
        tex_coord,
      });
    }

    let mut seam_vertices = Vec::with_capacity(seam_count.min(MAX_RESERVED_ELEMENTS));
    for _ in 0..seam_count {
      let position = stream.read_flipped_vec3("seam vertex position")?;
      let reserved_normal = stream.read_flipped_vec3("seam vertex normal")?;
      seam_vertices.push(HalaSeamVertex {
        position,
        reserved_normal,
      });
    }

    let bounds = HalaBounds::from_points(vertices.iter().map(|vertex| vertex.position));

    log::debug!(
      "Mesh version {} read: {} bones, {} triangles, {} bindings, {} vertices, {} seam vertices.",
      version, bone_names.len(), indices.len() / 3, bone_bindings.len(), vertices.len(), seam_vertices.len());

    Ok(HalaMeshGeometry {
      version,
      bone_names,
      indices,
      bone_bindings,
      blend_links,
      vertices,
      seam_vertices,
      bounds,
    })
  }
}

/// Little-endian primitive reads with format errors naming the field.
struct MeshStream<'a, R: Read> {
  reader: &'a mut R,
}

impl<'a, R: Read> MeshStream<'a, R> {

  fn read_i32(&mut self, what: &str) -> Result<i32, HalaSkinningError> {
    self.reader.read_i32::<LittleEndian>()
      .map_err(|err| Self::truncated(what, err))
  }

  fn read_f32(&mut self, what: &str) -> Result<f32, HalaSkinningError> {
    self.reader.read_f32::<LittleEndian>()
      .map_err(|err| Self::truncated(what, err))
  }

  /// Read an int32 element count, which must not be negative.
  fn read_count(&mut self, what: &str) -> Result<usize, HalaSkinningError> {
    let value = self.read_i32(what)?;
    usize::try_from(value)
      .map_err(|err| HalaSkinningError::format(&format!("The {} {} is negative.", what, value), Some(Box::new(err))))
  }

  /// Read a string prefixed by its length in one byte.
  fn read_string(&mut self, what: &str) -> Result<String, HalaSkinningError> {
    let length = self.reader.read_u8()
      .map_err(|err| Self::truncated(what, err))?;
    let mut bytes = vec![0u8; length as usize];
    self.reader.read_exact(&mut bytes)
      .map_err(|err| Self::truncated(what, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
  }

  /// Read three floats and negate X to convert to our coordinate system.
  fn read_flipped_vec3(&mut self, what: &str) -> Result<Vec3, HalaSkinningError> {
    let x = self.read_f32(what)?;
    let y = self.read_f32(what)?;
    let z = self.read_f32(what)?;
    Ok(Vec3::new(-x, y, z))
  }

  fn truncated(what: &str, err: std::io::Error) -> HalaSkinningError {
    HalaSkinningError::format(&format!("Read {} failed.", what), Some(Box::new(err)))
  }

}
