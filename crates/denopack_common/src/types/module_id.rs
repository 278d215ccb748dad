use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

/// `ModuleId` is the string a bundler knows a module by.
/// - For modules owned by the deno plugin it is derived from the module's true specifier,
///   see `denopack::bundler_id`.
/// - It is what the bundler hands back as `importer` and as the argument of `load`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  pub fn inner(&self) -> &ArcStr {
    &self.0
  }

  pub fn stabilize(&self, cwd: &Path) -> String {
    stabilize_module_id(self, cwd)
  }
}

/// Renders an id relative to `cwd` when it is an absolute path, so logs stay
/// readable and machine independent.
pub fn stabilize_module_id(module_id: &str, cwd: &Path) -> String {
  if module_id.as_path().is_absolute() {
    module_id.relative(cwd).as_path().to_slash_lossy().into_owned()
  } else {
    module_id.to_string()
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl std::borrow::Borrow<str> for ModuleId {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl From<String> for ModuleId {
  fn from(value: String) -> Self {
    Self::new(value)
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

#[test]
#[cfg(not(target_os = "windows"))]
fn test_stabilize() {
  let cwd = Path::new("/proj");
  assert_eq!(ModuleId::from("/proj/src/main.ts").stabilize(cwd), "src/main.ts");
  assert_eq!(ModuleId::from("https://deno.land/x/mod.ts").stabilize(cwd), "https://deno.land/x/mod.ts");
  assert_eq!(ModuleId::from("node:events").stabilize(cwd), "node:events");
}
