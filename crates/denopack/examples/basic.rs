#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use denopack::{DenoPlugin, DenoPluginOptions, ImportKind, InputOption};
use denopack_plugin::{PluginDriver, SharedPlugin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples/basic");

  let plugin = DenoPlugin::new(DenoPluginOptions { cwd: Some(root), ..Default::default() })?;
  let driver = PluginDriver::new(vec![Arc::new(plugin) as SharedPlugin]);
  driver.build_start(&InputOption::from("./main.ts").into_input_items()).await?;

  let Some(entry) = driver.resolve_id("./main.ts", None, ImportKind::Import).await? else {
    anyhow::bail!("entry was not resolved");
  };
  for source in ["./util", "node:events"] {
    if let Some(resolved) = driver.resolve_id(source, Some(entry.id.as_str()), ImportKind::Import).await? {
      println!("{source} -> {} (external: {})", resolved.id, resolved.is_external);
    }
  }
  if let Some(loaded) = driver.load(&entry.id).await? {
    println!("{}", loaded.code);
  }

  driver.build_end(None).await?;
  Ok(())
}
