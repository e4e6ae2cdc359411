use std::path::Path;

use serde::{
  Deserialize,
  Serialize,
};

use crate::error::HalaSkinningError;
use crate::scene::gpu::HalaBufferMode;

/// The name of the bone whose arrival finishes the seam pass.
pub const HALA_DEFAULT_ROOT_BONE_NAME: &str = "ROOT";

fn default_root_bone_name() -> String {
  HALA_DEFAULT_ROOT_BONE_NAME.to_owned()
}

fn default_parallel_skinning_threshold() -> usize {
  4096
}

/// The skinning configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HalaSkinningConfig {
  #[serde(default = "default_root_bone_name")]
  pub root_bone_name: String,
  #[serde(default)]
  pub buffer_mode: HalaBufferMode,
  #[serde(default = "default_parallel_skinning_threshold")]
  pub parallel_skinning_threshold: usize,
}

impl Default for HalaSkinningConfig {
  fn default() -> Self {
    Self {
      root_bone_name: default_root_bone_name(),
      buffer_mode: HalaBufferMode::default(),
      parallel_skinning_threshold: default_parallel_skinning_threshold(),
    }
  }
}

/// The implementation of the skinning configuration.
impl HalaSkinningConfig {
  /// Load the configuration from a JSON file.
  /// param path: The path to the JSON file.
  /// return: The configuration.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HalaSkinningError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|err| HalaSkinningError::new(
        crate::error::HalaSkinningErrorKind::Io,
        &format!("Read configuration file \"{:?}\" failed.", path),
        Some(Box::new(err))))?;
    let config = Self::from_json_str(&content)?;
    log::debug!("Skinning configuration loaded from \"{:?}\".", path);
    Ok(config)
  }

  /// Parse the configuration from a JSON string.
  /// param content: The JSON string.
  /// return: The configuration.
  pub fn from_json_str(content: &str) -> Result<Self, HalaSkinningError> {
    Ok(serde_json::from_str(content)?)
  }
}
