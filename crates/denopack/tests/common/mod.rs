#![allow(dead_code)]

use std::{
  path::PathBuf,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
};

use arcstr::ArcStr;
use async_trait::async_trait;
use denopack::{LoadResponse, MediaType, NormalizedDenoPluginOptions, ResolutionMode};
use denopack_resolver::{ResolverLoader, ResolverLoaderFactory};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Counts everything the core asks of its resolver/loader.
#[derive(Debug, Default)]
pub struct Calls {
  pub opens: AtomicUsize,
  pub disposes: AtomicUsize,
  pub loads: Mutex<FxHashMap<String, usize>>,
  pub referrers: Mutex<Vec<Option<String>>>,
  pub modes: Mutex<Vec<ResolutionMode>>,
}

impl Calls {
  pub fn loads_of(&self, specifier: &str) -> usize {
    self.loads.lock().get(specifier).copied().unwrap_or_default()
  }

  pub fn total_loads(&self) -> usize {
    self.loads.lock().values().sum()
  }

  pub fn opens(&self) -> usize {
    self.opens.load(Ordering::SeqCst)
  }

  pub fn disposes(&self) -> usize {
    self.disposes.load(Ordering::SeqCst)
  }
}

/// A resolver/loader backed by fixed tables. `source` resolves to `resolutions[source]`
/// regardless of the importer, and loading a specifier yields `modules[specifier]`.
#[derive(Debug, Default, Clone)]
pub struct MockFactory {
  pub calls: Arc<Calls>,
  pub resolutions: FxHashMap<String, String>,
  pub modules: FxHashMap<String, Option<LoadResponse>>,
  pub open_error: Option<String>,
}

impl MockFactory {
  pub fn resolution(mut self, source: &str, specifier: &str) -> Self {
    self.resolutions.insert(source.to_string(), specifier.to_string());
    self
  }

  pub fn module(mut self, specifier: &str, media_type: MediaType, source: &str) -> Self {
    let response = LoadResponse::Internal {
      specifier: specifier.into(),
      media_type,
      source: source.as_bytes().to_vec(),
    };
    self.modules.insert(specifier.to_string(), Some(response));
    self
  }

  pub fn external(mut self, specifier: &str) -> Self {
    self.modules.insert(specifier.to_string(), Some(LoadResponse::External { specifier: specifier.into() }));
    self
  }

  pub fn absent(mut self, specifier: &str) -> Self {
    self.modules.insert(specifier.to_string(), None);
    self
  }

  pub fn options() -> NormalizedDenoPluginOptions {
    NormalizedDenoPluginOptions { cwd: PathBuf::from("/proj"), sloppy_imports: true, builtin_externals: true }
  }
}

#[async_trait]
impl ResolverLoaderFactory for MockFactory {
  async fn open(&self, _entrypoints: &[String]) -> anyhow::Result<Box<dyn ResolverLoader>> {
    tokio::task::yield_now().await;
    if let Some(error) = &self.open_error {
      anyhow::bail!("{error}");
    }
    self.calls.opens.fetch_add(1, Ordering::SeqCst);
    Ok(Box::new(MockResolverLoader { factory: self.clone() }))
  }
}

pub struct MockResolverLoader {
  factory: MockFactory,
}

#[async_trait]
impl ResolverLoader for MockResolverLoader {
  async fn resolve(
    &self,
    specifier: &str,
    importer: Option<&str>,
    mode: ResolutionMode,
  ) -> anyhow::Result<ArcStr> {
    self.factory.calls.referrers.lock().push(importer.map(ToString::to_string));
    self.factory.calls.modes.lock().push(mode);
    tokio::task::yield_now().await;
    match self.factory.resolutions.get(specifier) {
      Some(resolved) => Ok(resolved.as_str().into()),
      None => anyhow::bail!("Module not found \"{specifier}\""),
    }
  }

  async fn load(&self, specifier: &str) -> anyhow::Result<Option<LoadResponse>> {
    *self.factory.calls.loads.lock().entry(specifier.to_string()).or_default() += 1;
    // Give every other pending resolution a chance to run while this load is in flight.
    for _ in 0..8 {
      tokio::task::yield_now().await;
    }
    match self.factory.modules.get(specifier) {
      Some(response) => Ok(response.clone()),
      None => anyhow::bail!("Failed to read \"{specifier}\""),
    }
  }

  fn dispose(&self) {
    self.factory.calls.disposes.fetch_add(1, Ordering::SeqCst);
  }
}
