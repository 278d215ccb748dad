use denopack_common::{ImportKind, InputItem};
use denopack_error::{BuildError, BuildResult};
use futures::future::join_all;

use crate::{
  HookBuildStartArgs, HookLoadArgs, HookLoadOutput, HookResolveIdArgs, HookResolveIdOutput,
  SharedPlugin,
};

/// Runs plugin hooks the way a rollup compatible bundler does.
pub struct PluginDriver {
  plugins: Vec<SharedPlugin>,
}

impl PluginDriver {
  pub fn new(plugins: Vec<SharedPlugin>) -> Self {
    Self { plugins }
  }

  pub fn plugins(&self) -> &[SharedPlugin] {
    &self.plugins
  }

  pub async fn build_start(&self, input: &[InputItem]) -> BuildResult<()> {
    let args = HookBuildStartArgs { input };
    let results = join_all(self.plugins.iter().map(|plugin| plugin.build_start(&args))).await;
    collect_errors(results)
  }

  pub async fn resolve_id(
    &self,
    source: &str,
    importer: Option<&str>,
    kind: ImportKind,
  ) -> BuildResult<Option<HookResolveIdOutput>> {
    let args = HookResolveIdArgs { source, importer, kind };
    for plugin in &self.plugins {
      if let Some(resolved) = plugin.resolve_id(&args).await? {
        tracing::trace!(plugin = plugin.name(), source, id = %resolved.id, "resolveId");
        return Ok(Some(resolved));
      }
    }
    Ok(None)
  }

  pub async fn load(&self, id: &str) -> BuildResult<Option<HookLoadOutput>> {
    let args = HookLoadArgs { id };
    for plugin in &self.plugins {
      if let Some(loaded) = plugin.load(&args).await? {
        tracing::trace!(plugin = plugin.name(), id, "load");
        return Ok(Some(loaded));
      }
    }
    Ok(None)
  }

  pub async fn build_end(&self, error: Option<&BuildError>) -> BuildResult<()> {
    let error = error.map(ToString::to_string);
    let results =
      join_all(self.plugins.iter().map(|plugin| plugin.build_end(error.as_deref()))).await;
    collect_errors(results)
  }
}

fn collect_errors(results: Vec<anyhow::Result<()>>) -> BuildResult<()> {
  let errors = results.into_iter().filter_map(Result::err).collect::<Vec<_>>();
  if errors.is_empty() {
    Ok(())
  } else {
    Err(errors.into())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use async_trait::async_trait;

  use super::*;
  use crate::{HookLoadReturn, HookNoopReturn, HookResolveIdReturn, Plugin};

  #[derive(Debug, Default)]
  struct Alias {
    build_ends: AtomicUsize,
  }

  #[async_trait]
  impl Plugin for Alias {
    fn name(&self) -> &'static str {
      "alias"
    }

    async fn resolve_id(&self, args: &HookResolveIdArgs<'_>) -> HookResolveIdReturn {
      Ok((args.source == "react").then(|| HookResolveIdOutput::internal("/vendor/preact.js")))
    }

    async fn build_end(&self, _error: Option<&str>) -> HookNoopReturn {
      self.build_ends.fetch_add(1, Ordering::Relaxed);
      Ok(())
    }
  }

  #[derive(Debug)]
  struct Fallback;

  #[async_trait]
  impl Plugin for Fallback {
    fn name(&self) -> &'static str {
      "fallback"
    }

    async fn build_start(&self, _args: &HookBuildStartArgs<'_>) -> HookNoopReturn {
      Err(anyhow::anyhow!("fallback refused to start"))
    }

    async fn resolve_id(&self, args: &HookResolveIdArgs<'_>) -> HookResolveIdReturn {
      Ok(Some(HookResolveIdOutput::external(args.source)))
    }

    async fn load(&self, args: &HookLoadArgs<'_>) -> HookLoadReturn {
      Ok(Some(HookLoadOutput { code: format!("// {}", args.id).into(), module_type: None }))
    }
  }

  #[tokio::test]
  async fn first_hooks_stop_at_the_first_answer() {
    let alias = Arc::new(Alias::default());
    let driver = PluginDriver::new(vec![Arc::clone(&alias) as SharedPlugin, Arc::new(Fallback)]);

    let resolved = driver.resolve_id("react", None, ImportKind::Import).await.unwrap();
    assert_eq!(resolved, Some(HookResolveIdOutput::internal("/vendor/preact.js")));

    let resolved = driver.resolve_id("vue", None, ImportKind::Import).await.unwrap();
    assert_eq!(resolved, Some(HookResolveIdOutput::external("vue")));

    let loaded = driver.load("/a.js").await.unwrap().unwrap();
    assert_eq!(loaded.code, "// /a.js");
  }

  #[tokio::test]
  async fn parallel_hooks_run_every_plugin() {
    let alias = Arc::new(Alias::default());
    let driver = PluginDriver::new(vec![Arc::clone(&alias) as SharedPlugin, Arc::new(Fallback)]);

    let err = driver.build_start(&[InputItem::from("main.ts")]).await.unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.to_string(), "fallback refused to start");

    driver.build_end(Some(&err)).await.unwrap();
    assert_eq!(alias.build_ends.load(Ordering::Relaxed), 1);
  }
}
