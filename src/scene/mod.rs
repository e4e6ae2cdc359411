pub mod loader;
pub mod vertex;
pub mod bounds;
pub mod cpu;
pub mod gpu;

pub use vertex::{
  HALA_UNBOUND_BONE_INDEX,
  HalaMeshVertex,
  HalaSkinParams,
  HalaSkinnedVertex,
};
pub use bounds::HalaBounds;
