#![allow(dead_code)]

use std::any::Any;
use std::cell::{
  Cell,
  RefCell,
};
use std::rc::Rc;

use byteorder::{
  LittleEndian,
  WriteBytesExt,
};

use hala_skinning::prelude::*;

pub fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

/// A binary mesh file written field by field.
#[derive(Debug, Clone)]
pub struct MeshFile {
  pub version: i32,
  pub bone_names: Vec<String>,
  pub faces: Vec<[i32; 3]>,
  /// bone index, first primary, primary count, first seam, seam count.
  pub bindings: Vec<[i32; 5]>,
  pub tex_coords: Vec<[f32; 2]>,
  /// raw weight, target primary vertex.
  pub blend_links: Vec<(i32, i32)>,
  pub second_vertex_count: Option<i32>,
  /// position, normal.
  pub vertices: Vec<([f32; 3], [f32; 3])>,
  /// position, normal.
  pub seam_vertices: Vec<([f32; 3], [f32; 3])>,
}

impl MeshFile {

  /// Two bones ROOT and ARM, four primary vertices split between them and one seam
  /// vertex owned by ARM blending half into vertex 1.
  pub fn root_arm() -> Self {
    Self {
      version: 2,
      bone_names: vec!["ROOT".to_owned(), "ARM".to_owned()],
      faces: vec![[0, 1, 2], [1, 3, 2]],
      bindings: vec![
        [0, 0, 2, 0, 0],
        [1, 2, 2, 0, 1],
      ],
      tex_coords: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
      blend_links: vec![(16384, 1)],
      second_vertex_count: None,
      vertices: vec![
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([2.0, 0.5, -1.0], [1.0, 0.0, 0.0]),
        ([-3.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 2.0, 4.0], [-1.0, 0.0, 0.0]),
      ],
      seam_vertices: vec![
        ([2.5, 0.5, -1.0], [0.0, 1.0, 0.0]),
      ],
    }
  }

  pub fn encode(&self) -> Vec<u8> {
    let mut out = Vec::new();
    out.write_i32::<LittleEndian>(self.version).unwrap();

    out.write_i32::<LittleEndian>(self.bone_names.len() as i32).unwrap();
    for name in self.bone_names.iter() {
      out.write_u8(name.len() as u8).unwrap();
      out.extend_from_slice(name.as_bytes());
    }

    out.write_i32::<LittleEndian>(self.faces.len() as i32).unwrap();
    for face in self.faces.iter() {
      for index in face {
        out.write_i32::<LittleEndian>(*index).unwrap();
      }
    }

    out.write_i32::<LittleEndian>(self.bindings.len() as i32).unwrap();
    for binding in self.bindings.iter() {
      for value in binding {
        out.write_i32::<LittleEndian>(*value).unwrap();
      }
    }

    out.write_i32::<LittleEndian>(self.tex_coords.len() as i32).unwrap();
    for [u, v] in self.tex_coords.iter() {
      out.write_f32::<LittleEndian>(*u).unwrap();
      out.write_f32::<LittleEndian>(*v).unwrap();
    }

    out.write_i32::<LittleEndian>(self.blend_links.len() as i32).unwrap();
    for (weight, target) in self.blend_links.iter() {
      out.write_i32::<LittleEndian>(*weight).unwrap();
      out.write_i32::<LittleEndian>(*target).unwrap();
    }

    let second_vertex_count = self.second_vertex_count.unwrap_or(self.tex_coords.len() as i32);
    out.write_i32::<LittleEndian>(second_vertex_count).unwrap();
    for (position, normal) in self.vertices.iter().chain(self.seam_vertices.iter()) {
      for value in position.iter().chain(normal.iter()) {
        out.write_f32::<LittleEndian>(*value).unwrap();
      }
    }
    out
  }

}

/// ROOT with a single ARM child, indices 0 and 1.
pub fn root_arm_skeleton() -> HalaBone {
  HalaBone::new("ROOT", 0).with_child(HalaBone::new("ARM", 1))
}

/// What reached the renderer in one draw call, whichever path it took.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedDraw {
  pub is_gpu_resident: bool,
  pub vertices: Vec<HalaSkinnedVertex>,
  pub indices: Vec<u16>,
  pub num_primitives: u32,
}

pub struct MockBuffer {
  pub size: usize,
  pub contents: Rc<RefCell<Vec<u8>>>,
  pub uploads: Rc<Cell<usize>>,
}

impl HalaGpuBuffer for MockBuffer {
  fn size(&self) -> usize {
    self.size
  }

  fn upload(&mut self, data: &[u8]) -> Result<(), HalaSkinningError> {
    if data.len() > self.size {
      return Err(HalaSkinningError::backend("upload exceeds buffer size", None));
    }
    *self.contents.borrow_mut() = data.to_vec();
    self.uploads.set(self.uploads.get() + 1);
    Ok(())
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// A render backend recording every allocation, upload and draw.
#[derive(Default)]
pub struct MockBackend {
  pub fail_allocation: bool,
  pub vertex_uploads: Vec<Rc<Cell<usize>>>,
  pub index_uploads: Vec<Rc<Cell<usize>>>,
  pub draws: Vec<SubmittedDraw>,
}

impl MockBackend {

  pub fn total_vertex_uploads(&self) -> usize {
    self.vertex_uploads.iter().map(|count| count.get()).sum()
  }

  pub fn total_index_uploads(&self) -> usize {
    self.index_uploads.iter().map(|count| count.get()).sum()
  }

  fn allocate(&mut self, size: usize, is_vertex: bool) -> Result<Box<dyn HalaGpuBuffer>, HalaSkinningError> {
    if self.fail_allocation {
      return Err(HalaSkinningError::backend("out of device memory", None));
    }
    let uploads = Rc::new(Cell::new(0));
    if is_vertex {
      self.vertex_uploads.push(Rc::clone(&uploads));
    } else {
      self.index_uploads.push(Rc::clone(&uploads));
    }
    Ok(Box::new(MockBuffer {
      size,
      contents: Rc::new(RefCell::new(Vec::new())),
      uploads,
    }))
  }

}

fn contents_of(buffer: &dyn HalaGpuBuffer) -> Vec<u8> {
  buffer.as_any()
    .downcast_ref::<MockBuffer>()
    .map(|buffer| buffer.contents.borrow().clone())
    .unwrap_or_default()
}

impl HalaRenderBackend for MockBackend {
  fn allocate_vertex_buffer(&mut self, size: usize, _debug_name: &str) -> Result<Box<dyn HalaGpuBuffer>, HalaSkinningError> {
    self.allocate(size, true)
  }

  fn allocate_index_buffer(&mut self, size: usize, _debug_name: &str) -> Result<Box<dyn HalaGpuBuffer>, HalaSkinningError> {
    self.allocate(size, false)
  }

  fn bind_and_draw(
    &mut self,
    vertex_buffer: &dyn HalaGpuBuffer,
    index_buffer: &dyn HalaGpuBuffer,
    num_vertices: u32,
    num_primitives: u32,
  ) -> Result<(), HalaSkinningError> {
    let vertices: Vec<HalaSkinnedVertex> = contents_of(vertex_buffer)
      .chunks_exact(std::mem::size_of::<HalaSkinnedVertex>())
      .map(bytemuck::pod_read_unaligned)
      .collect();
    assert_eq!(vertices.len(), num_vertices as usize);
    let indices = contents_of(index_buffer)
      .chunks_exact(2)
      .map(|bytes| u16::from_ne_bytes([bytes[0], bytes[1]]))
      .collect();
    self.draws.push(SubmittedDraw {
      is_gpu_resident: true,
      vertices,
      indices,
      num_primitives,
    });
    Ok(())
  }

  fn draw_immediate(
    &mut self,
    vertices: &[HalaSkinnedVertex],
    indices: &[u16],
    num_primitives: u32,
  ) -> Result<(), HalaSkinningError> {
    self.draws.push(SubmittedDraw {
      is_gpu_resident: false,
      vertices: vertices.to_vec(),
      indices: indices.to_vec(),
      num_primitives,
    });
    Ok(())
  }
}
