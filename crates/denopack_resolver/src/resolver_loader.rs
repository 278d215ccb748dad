use arcstr::ArcStr;
use async_trait::async_trait;
use denopack_common::{LoadResponse, ResolutionMode};

/// Creates a [`ResolverLoader`] for one build.
#[async_trait]
pub trait ResolverLoaderFactory: Send + Sync {
  /// Fails when an entrypoint or the surrounding workspace configuration is invalid.
  async fn open(&self, entrypoints: &[String]) -> anyhow::Result<Box<dyn ResolverLoader>>;
}

/// Resolves and loads modules addressed by URL.
///
/// A handle returned from [`ResolverLoaderFactory::open`] owns resources that
/// [`ResolverLoader::dispose`] releases. The owner calls `dispose` exactly once
/// and never uses the handle afterwards.
#[async_trait]
pub trait ResolverLoader: Send + Sync {
  /// Returns the true specifier `specifier` points to when imported from `importer`.
  /// No importer means `specifier` is an entrypoint.
  async fn resolve(
    &self,
    specifier: &str,
    importer: Option<&str>,
    mode: ResolutionMode,
  ) -> anyhow::Result<ArcStr>;

  /// `Ok(None)` means the specifier is valid but nothing can be loaded for it.
  async fn load(&self, specifier: &str) -> anyhow::Result<Option<LoadResponse>>;

  fn dispose(&self) {}
}
