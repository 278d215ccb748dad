use std::path::Path;

use arcstr::ArcStr;

use super::module_id::stabilize_module_id;

/// What a `resolveId` hook hands back to the bundler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
  pub id: ArcStr,
  /// The bundler leaves the import in place and references `id` at runtime.
  pub is_external: bool,
}

impl ResolvedId {
  pub fn internal(id: impl Into<ArcStr>) -> Self {
    Self { id: id.into(), is_external: false }
  }

  pub fn external(id: impl Into<ArcStr>) -> Self {
    Self { id: id.into(), is_external: true }
  }

  pub fn debug_id(&self, cwd: &Path) -> String {
    if self.id.trim_start().starts_with("data:") {
      return format!("<{}>", self.id);
    }
    stabilize_module_id(&self.id, cwd)
  }
}
