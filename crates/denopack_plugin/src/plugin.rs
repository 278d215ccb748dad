use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{HookBuildStartArgs, HookLoadArgs, HookLoadOutput, HookResolveIdArgs, HookResolveIdOutput};

pub type HookNoopReturn = anyhow::Result<()>;
pub type HookBuildStartReturn = HookNoopReturn;
pub type HookResolveIdReturn = anyhow::Result<Option<HookResolveIdOutput>>;
pub type HookLoadReturn = anyhow::Result<Option<HookLoadOutput>>;

pub type SharedPlugin = Arc<dyn Plugin>;

// Align to https://rollupjs.org/plugin-development/#build-hooks
#[async_trait]
pub trait Plugin: Debug + Send + Sync + 'static {
  fn name(&self) -> &'static str;

  // --- Build hooks ---

  /// async, parallel
  async fn build_start(&self, _args: &HookBuildStartArgs<'_>) -> HookBuildStartReturn {
    Ok(())
  }

  /// async, first
  async fn resolve_id(&self, _args: &HookResolveIdArgs<'_>) -> HookResolveIdReturn {
    Ok(None)
  }

  /// async, first
  async fn load(&self, _args: &HookLoadArgs<'_>) -> HookLoadReturn {
    Ok(None)
  }

  /// async, parallel. Called on success and on failure, `error` carries the
  /// rendered build error in the latter case.
  async fn build_end(&self, _error: Option<&str>) -> HookNoopReturn {
    Ok(())
  }
}
