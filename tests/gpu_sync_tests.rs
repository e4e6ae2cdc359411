mod common;

use hala_skinning::prelude::*;

use common::{
  MockBackend,
  MeshFile,
  root_arm_skeleton,
};

fn load() -> HalaMesh {
  HalaMeshLoader::load_from_bytes(&MeshFile::root_arm().encode()).unwrap()
}

#[test]
fn store_on_gpu_uploads_both_buffers() -> anyhow::Result<()> {
  common::init_logger();
  let mut backend = MockBackend::default();
  let mut mesh = load();
  assert_eq!(mesh.mode(), HalaBufferMode::Immediate);

  mesh.store_on_gpu(&mut backend)?;
  assert_eq!(mesh.mode(), HalaBufferMode::GpuResident);
  assert_eq!(backend.total_vertex_uploads(), 1);
  assert_eq!(backend.total_index_uploads(), 1);
  Ok(())
}

#[test]
fn invalidate_is_noop_in_immediate_mode() -> anyhow::Result<()> {
  let mut backend = MockBackend::default();
  let mut mesh = load();
  mesh.bind(&root_arm_skeleton())?;
  mesh.invalidate()?;
  mesh.draw(&mut backend)?;
  assert_eq!(backend.total_vertex_uploads(), 0);
  assert_eq!(backend.draws.len(), 1);
  Ok(())
}

#[test]
fn binding_reuploads_resident_vertices() -> anyhow::Result<()> {
  let mut backend = MockBackend::default();
  let mut mesh = load();
  mesh.store_on_gpu(&mut backend)?;

  mesh.bind(&root_arm_skeleton())?;
  assert_eq!(backend.total_vertex_uploads(), 2);
  assert_eq!(backend.total_index_uploads(), 1);

  mesh.invalidate()?;
  assert_eq!(backend.total_vertex_uploads(), 3);

  mesh.draw(&mut backend)?;
  let draw = &backend.draws[0];
  assert!(draw.is_gpu_resident);
  assert_eq!(draw.vertices[2].skin_params, [1.0, -1.0, 0.0]);
  assert_eq!(draw.vertices[1].skin_params, [0.0, 1.0, 0.5]);
  Ok(())
}

#[test]
fn both_draw_paths_submit_the_same_mesh() -> anyhow::Result<()> {
  let mut backend = MockBackend::default();
  let mut immediate = load();
  let mut resident = immediate.clone();
  immediate.bind(&root_arm_skeleton())?;
  resident.bind(&root_arm_skeleton())?;
  resident.store_on_gpu(&mut backend)?;

  immediate.draw(&mut backend)?;
  resident.draw(&mut backend)?;

  let (first, second) = (&backend.draws[0], &backend.draws[1]);
  assert!(!first.is_gpu_resident);
  assert!(second.is_gpu_resident);
  assert_eq!(first.num_primitives, 2);
  assert_eq!(first.num_primitives, second.num_primitives);
  assert_eq!(first.indices, second.indices);
  assert_eq!(first.vertices, second.vertices);
  Ok(())
}

#[test]
fn allocation_failure_propagates() {
  let mut backend = MockBackend {
    fail_allocation: true,
    ..Default::default()
  };
  let mut mesh = load();
  let err = mesh.store_on_gpu(&mut backend).unwrap_err();
  assert_eq!(err.kind(), HalaSkinningErrorKind::Backend);
  assert_eq!(mesh.mode(), HalaBufferMode::Immediate);
}

#[test]
fn release_returns_to_immediate_mode() -> anyhow::Result<()> {
  let mut backend = MockBackend::default();
  let mut mesh = load();
  mesh.store_on_gpu(&mut backend)?;
  mesh.release_gpu();
  assert_eq!(mesh.mode(), HalaBufferMode::Immediate);

  mesh.bind(&root_arm_skeleton())?;
  assert_eq!(backend.total_vertex_uploads(), 1);
  mesh.draw(&mut backend)?;
  assert!(!backend.draws[0].is_gpu_resident);
  Ok(())
}

#[test]
fn config_selects_draw_path() -> anyhow::Result<()> {
  let mut backend = MockBackend::default();
  let mut mesh = load();

  let resident = HalaSkinningConfig::from_json_str(r#"{ "buffer_mode": "gpu_resident" }"#)?;
  mesh.apply_config(&resident, &mut backend)?;
  assert_eq!(mesh.mode(), HalaBufferMode::GpuResident);
  mesh.apply_config(&resident, &mut backend)?;
  assert_eq!(backend.total_vertex_uploads(), 1);

  mesh.apply_config(&HalaSkinningConfig::default(), &mut backend)?;
  assert_eq!(mesh.mode(), HalaBufferMode::Immediate);
  Ok(())
}
