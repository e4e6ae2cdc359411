pub mod skeleton;
pub mod mesh;
pub mod binder;
pub mod skinner;

pub use skeleton::{
  HalaSkeletonNode,
  HalaBone,
};
pub use mesh::{
  HalaBoneBinding,
  HalaBlendLink,
  HalaSeamVertex,
  HalaMeshGeometry,
  HalaMesh,
};
pub use binder::HalaBoneBinder;
pub use skinner::{
  HalaCpuSkinner,
  HalaSkinnedPose,
};
