use thiserror::Error;

/// The kind of the error of the hala-skinning crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalaSkinningErrorKind {
  /// The mesh stream is truncated or structurally inconsistent.
  Format,
  /// A bone binding references a bone outside the bone name table.
  Index,
  /// The render backend failed to allocate or upload a buffer.
  Backend,
  /// The configuration could not be parsed.
  Config,
  /// A file could not be opened or read.
  Io,
}

/// The error type of the hala-skinning crate.
#[derive(Error, Debug)]
pub struct HalaSkinningError {
  kind: HalaSkinningErrorKind,
  msg: String,
  #[source]
  source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// The implementation of the error type of the hala-skinning crate.
impl HalaSkinningError {
  /// Create a new error.
  /// param kind: The kind of the error.
  /// param msg: The message of the error.
  /// param source: The source of the error.
  /// return: The error.
  pub fn new(kind: HalaSkinningErrorKind, msg: &str, source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self {
      kind,
      msg: msg.to_string(),
      source,
    }
  }

  /// Create a new format error.
  /// param msg: The message of the error.
  /// param source: The source of the error.
  /// return: The error.
  pub fn format(msg: &str, source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self::new(HalaSkinningErrorKind::Format, msg, source)
  }

  /// Create a new index error.
  /// param msg: The message of the error.
  /// return: The error.
  pub fn index(msg: &str) -> Self {
    Self::new(HalaSkinningErrorKind::Index, msg, None)
  }

  /// Create a new render backend error.
  /// param msg: The message of the error.
  /// param source: The source of the error.
  /// return: The error.
  pub fn backend(msg: &str, source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Self {
    Self::new(HalaSkinningErrorKind::Backend, msg, source)
  }

  /// Get the kind of the error.
  /// return: The kind.
  pub fn kind(&self) -> HalaSkinningErrorKind {
    self.kind
  }

  /// Get the message of the error.
  /// return: The message.
  pub fn message(&self) -> &str {
    &self.msg
  }
}

impl std::convert::From<std::io::Error> for HalaSkinningError {
  fn from(err: std::io::Error) -> Self {
    Self {
      kind: HalaSkinningErrorKind::Io,
      msg: err.to_string(),
      source: Some(Box::new(err)),
    }
  }
}

impl std::convert::From<serde_json::Error> for HalaSkinningError {
  fn from(err: serde_json::Error) -> Self {
    Self {
      kind: HalaSkinningErrorKind::Config,
      msg: format!("Parse configuration failed: {}", err),
      source: Some(Box::new(err)),
    }
  }
}

/// The implementation Display trait for the error type of the hala-skinning crate.
impl std::fmt::Display for HalaSkinningError {
  /// Format the error.
  /// param f: The formatter.
  /// return: The result.
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.msg)
  }
}
