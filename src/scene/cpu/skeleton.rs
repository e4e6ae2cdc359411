/// A node of the skeleton tree a mesh is bound to.
/// The tree is assumed to be acyclic.
pub trait HalaSkeletonNode {
  /// The bone name.
  fn name(&self) -> &str;
  /// The bone index written into the skin parameters.
  fn index(&self) -> u32;
  /// The ordered children.
  fn children(&self) -> &[Self] where Self: Sized;
}

/// A bone is a named node of a skeleton with children.
#[derive(Debug, Clone, PartialEq)]
pub struct HalaBone {
  pub name: String,
  pub index: u32,
  pub children: Vec<HalaBone>,
}

/// The implementation of the bone.
impl HalaBone {
  /// Create a new bone without children.
  /// param name: The name of the bone.
  /// param index: The index of the bone.
  /// return: The bone.
  pub fn new(name: &str, index: u32) -> Self {
    Self {
      name: name.to_owned(),
      index,
      children: Vec::new(),
    }
  }

  /// Append a child bone.
  /// param child: The child bone.
  /// return: The bone.
  pub fn with_child(mut self, child: HalaBone) -> Self {
    self.children.push(child);
    self
  }
}

impl HalaSkeletonNode for HalaBone {
  fn name(&self) -> &str {
    &self.name
  }

  fn index(&self) -> u32 {
    self.index
  }

  fn children(&self) -> &[Self] {
    &self.children
  }
}
