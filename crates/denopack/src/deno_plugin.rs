use std::sync::Arc;

use async_trait::async_trait;
use denopack_common::{DenoPluginOptions, ModuleType, NormalizedDenoPluginOptions};
use denopack_error::DenoPluginError;
use denopack_fs::{FileSystem, OsFileSystem};
use denopack_plugin::{
  HookBuildStartArgs, HookBuildStartReturn, HookLoadArgs, HookLoadOutput, HookLoadReturn,
  HookNoopReturn, HookResolveIdArgs, HookResolveIdReturn, Plugin,
};
use denopack_resolver::{FsResolverLoaderFactory, ResolverLoaderFactory};
use parking_lot::Mutex;

use crate::{normalize_options, types::SharedResolverLoaderFactory, Session};

/// Lets a bundler consume modules resolved and loaded the way Deno does.
///
/// `buildStart` opens a [`Session`], `buildEnd` closes it. Starting a build again
/// replaces the session and releases the previous one.
pub struct DenoPlugin {
  options: Arc<NormalizedDenoPluginOptions>,
  factory: SharedResolverLoaderFactory,
  session: Mutex<Option<Arc<Session>>>,
}

impl DenoPlugin {
  pub fn new(options: DenoPluginOptions) -> anyhow::Result<Self> {
    Self::with_fs(options, OsFileSystem)
  }

  pub fn with_fs<F: FileSystem + Clone>(options: DenoPluginOptions, fs: F) -> anyhow::Result<Self> {
    let options = normalize_options(options)?;
    let factory = FsResolverLoaderFactory::new(options.clone(), fs);
    Ok(Self::with_factory(Arc::new(factory), options))
  }

  pub fn with_factory(
    factory: Arc<dyn ResolverLoaderFactory>,
    options: NormalizedDenoPluginOptions,
  ) -> Self {
    Self { options: Arc::new(options), factory, session: Mutex::new(None) }
  }

  fn session(&self) -> Option<Arc<Session>> {
    self.session.lock().clone()
  }
}

#[async_trait]
impl Plugin for DenoPlugin {
  fn name(&self) -> &'static str {
    "deno"
  }

  async fn build_start(&self, args: &HookBuildStartArgs<'_>) -> HookBuildStartReturn {
    // Release the previous build's resolver before acquiring a new one.
    drop(self.session.lock().take());

    let entrypoints = args.input.iter().map(|item| item.import.clone()).collect();
    let session = Session::open(&*self.factory, entrypoints, self.options.cwd.clone()).await?;
    *self.session.lock() = Some(Arc::new(session));
    Ok(())
  }

  async fn resolve_id(&self, args: &HookResolveIdArgs<'_>) -> HookResolveIdReturn {
    let session = self.session().ok_or(DenoPluginError::SessionNotStarted)?;
    let resolved = session.resolve(args.source, args.importer, args.kind).await?;
    Ok(Some(resolved))
  }

  async fn load(&self, args: &HookLoadArgs<'_>) -> HookLoadReturn {
    let Some(session) = self.session() else {
      return Ok(None);
    };
    Ok(session.load(args.id).map(|record| HookLoadOutput {
      code: record.source,
      module_type: Some(ModuleType::from(record.media_type)),
    }))
  }

  async fn build_end(&self, _error: Option<&str>) -> HookNoopReturn {
    drop(self.session.lock().take());
    Ok(())
  }
}

impl std::fmt::Debug for DenoPlugin {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DenoPlugin")
      .field("options", &self.options)
      .field("session", &self.session.lock())
      .finish_non_exhaustive()
  }
}
