use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use arcstr::ArcStr;
use dashmap::DashMap;
use denopack_common::{
  stabilize_module_id, ImportKind, LoadResponse, ModuleId, ResolutionMode, ResolvedId,
};
use denopack_error::DenoPluginError;
use denopack_resolver::{ResolverLoader, ResolverLoaderFactory};
use rustc_hash::FxBuildHasher;
use tokio::sync::OnceCell;

use crate::{bundler_id, ModuleRecord};

/// Outcome of loading one resolved specifier, shared by every import that resolves to it.
#[derive(Debug)]
enum LoadedModule {
  Absent,
  External(ArcStr),
  Internal(ModuleId),
}

/// A failed load, shared by every resolution that waited on it.
#[derive(Debug, Clone)]
struct LoadError(Arc<anyhow::Error>);

impl std::fmt::Display for LoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    std::fmt::Display::fmt(&*self.0, f)
  }
}

impl std::error::Error for LoadError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    self.0.source()
  }
}

/// State of one build: the resolver/loader handle and what has been loaded through it.
///
/// Dropping the session disposes the resolver/loader, so the handle is released
/// on every path out of a build, including errors and cancelled futures.
pub struct Session {
  cwd: PathBuf,
  entrypoints: Vec<String>,
  resolver_loader: Box<dyn ResolverLoader>,
  /// Resolved specifier -> its load. An entry is registered before the load is
  /// awaited, so concurrent resolutions of the same specifier share one load,
  /// including its failure. A failed entry is removed so that later resolutions retry.
  pending_loads: DashMap<ArcStr, Arc<OnceCell<Result<LoadedModule, LoadError>>>, FxBuildHasher>,
  /// Bundler-facing id -> module. Also maps importers back to their true specifier.
  modules: DashMap<ModuleId, ModuleRecord, FxBuildHasher>,
}

impl Session {
  pub async fn open(
    factory: &dyn ResolverLoaderFactory,
    entrypoints: Vec<String>,
    cwd: PathBuf,
  ) -> anyhow::Result<Self> {
    let resolver_loader = factory.open(&entrypoints).await?;
    tracing::info!(?entrypoints, "deno session opened");
    Ok(Self {
      cwd,
      entrypoints,
      resolver_loader,
      pending_loads: DashMap::default(),
      modules: DashMap::default(),
    })
  }

  pub async fn resolve(
    &self,
    source: &str,
    importer: Option<&str>,
    kind: ImportKind,
  ) -> anyhow::Result<ResolvedId> {
    let mode = ResolutionMode::try_from(kind)?;
    let referrer = importer.map(|importer| self.true_specifier(importer));

    let resolved = self
      .resolver_loader
      .resolve(source, referrer.as_deref(), mode)
      .await
      .with_context(|| DenoPluginError::ResolveFailed {
        specifier: source.to_string(),
        importer: importer.map(ToString::to_string),
      })?;

    let pending = Arc::clone(self.pending_loads.entry(resolved.clone()).or_default().value());
    let loaded = pending
      .get_or_init(|| async {
        self.load_module(&resolved).await.map_err(|err| LoadError(Arc::new(err)))
      })
      .await;
    let loaded = match loaded {
      Ok(loaded) => loaded,
      Err(err) => {
        self.pending_loads.remove_if(&resolved, |_, cell| Arc::ptr_eq(cell, &pending));
        return Err(err.clone().into());
      }
    };

    let resolved_id = match loaded {
      LoadedModule::Absent => ResolvedId::internal(resolved),
      LoadedModule::External(specifier) => ResolvedId::external(specifier.clone()),
      LoadedModule::Internal(id) => ResolvedId::internal(id.inner().clone()),
    };
    tracing::debug!(
      source,
      importer = importer.map(|importer| stabilize_module_id(importer, &self.cwd)),
      id = resolved_id.debug_id(&self.cwd),
      external = resolved_id.is_external,
      "resolved"
    );
    Ok(resolved_id)
  }

  /// Modules this session did not produce are `None`, leaving them to other plugins.
  pub fn load(&self, id: &str) -> Option<ModuleRecord> {
    self.modules.get(id).map(|record| record.value().clone())
  }

  /// Importers the session doesn't know, such as entrypoints, pass through unchanged.
  fn true_specifier(&self, importer: &str) -> ArcStr {
    self.modules.get(importer).map_or_else(|| importer.into(), |record| record.specifier.clone())
  }

  async fn load_module(&self, specifier: &ArcStr) -> anyhow::Result<LoadedModule> {
    let Some(response) = self.resolver_loader.load(specifier).await? else {
      tracing::debug!(%specifier, "nothing to load");
      return Ok(LoadedModule::Absent);
    };

    match response {
      LoadResponse::External { specifier } => Ok(LoadedModule::External(specifier)),
      LoadResponse::Internal { specifier, media_type, source } => {
        let id = bundler_id(&specifier, media_type);
        let source = match String::from_utf8(source) {
          Ok(source) => source,
          Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        tracing::trace!(%specifier, %media_type, id = id.stabilize(&self.cwd), "loaded");
        // Redirects can lead two resolved specifiers to the same module, the first record wins.
        self
          .modules
          .entry(id.clone())
          .or_insert_with(|| ModuleRecord { specifier, media_type, source: source.into() });
        Ok(LoadedModule::Internal(id))
      }
    }
  }
}

impl Drop for Session {
  fn drop(&mut self) {
    self.resolver_loader.dispose();
    tracing::info!(modules = self.modules.len(), "deno session disposed");
  }
}

impl std::fmt::Debug for Session {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Session")
      .field("entrypoints", &self.entrypoints)
      .field("pending_loads", &self.pending_loads.len())
      .field("modules", &self.modules.len())
      .finish_non_exhaustive()
  }
}
