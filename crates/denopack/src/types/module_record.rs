use arcstr::ArcStr;
use denopack_common::MediaType;

/// A module known to the bundler under a bundler-facing id. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
  /// The specifier the resolver/loader reported, e.g. `file:///proj/util.ts`.
  pub specifier: ArcStr,
  pub media_type: MediaType,
  pub source: ArcStr,
}
