pub use crate::error::{
  HalaSkinningError,
  HalaSkinningErrorKind,
};
pub use crate::config::{
  HalaSkinningConfig,
  HALA_DEFAULT_ROOT_BONE_NAME,
};
pub use crate::scene::{
  HALA_UNBOUND_BONE_INDEX,
  HalaBounds,
  HalaMeshVertex,
  HalaSkinParams,
  HalaSkinnedVertex,
};
pub use crate::scene::cpu::{
  HalaSkeletonNode,
  HalaBone,
  HalaBoneBinding,
  HalaBlendLink,
  HalaSeamVertex,
  HalaMeshGeometry,
  HalaMesh,
  HalaBoneBinder,
  HalaCpuSkinner,
  HalaSkinnedPose,
};
pub use crate::scene::gpu::{
  HalaBufferMode,
  HalaGpuBuffer,
  HalaRenderBackend,
};
pub use crate::scene::loader::{
  HalaMeshLoader,
  HalaMeshGPUUploader,
};
