use arcstr::ArcStr;
use denopack_common::ModuleType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookLoadOutput {
  pub code: ArcStr,
  /// Lets the bundler skip guessing the loader from the id's extension.
  pub module_type: Option<ModuleType>,
}
