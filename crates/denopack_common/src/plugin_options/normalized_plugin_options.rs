use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct NormalizedDenoPluginOptions {
  pub cwd: PathBuf,
  pub sloppy_imports: bool,
  pub builtin_externals: bool,
}
