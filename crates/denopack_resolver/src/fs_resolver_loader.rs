use std::{
  path::Path,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
};

use arcstr::ArcStr;
use async_trait::async_trait;
use denopack_common::{
  is_existing_node_builtin_modules, LoadResponse, MediaType, NormalizedDenoPluginOptions,
  ResolutionMode,
};
use denopack_fs::{FileSystem, OsFileSystem};
use oxc_resolver::{FsCache, ResolveError, ResolveOptions as OxcResolverOptions, ResolverGeneric};
use sugar_path::SugarPath;
use url::Url;

use crate::{
  specifier::{file_url_to_path, parse_entrypoint, parse_referrer, path_to_file_url},
  ResolverLoader, ResolverLoaderFactory,
};

/// Tried in order when a sloppy import names a file without its extension.
const SLOPPY_EXTENSIONS: [&str; 9] =
  [".ts", ".tsx", ".mts", ".js", ".jsx", ".mjs", ".cts", ".cjs", ".json"];

/// Files a sloppy directory import may mean, each tried with every extension above.
const SLOPPY_MAIN_FILES: [&str; 2] = ["index", "mod"];

/// Opens [`FsResolverLoader`]s that read local modules through `F`.
pub struct FsResolverLoaderFactory<F: FileSystem + Clone = OsFileSystem> {
  options: Arc<NormalizedDenoPluginOptions>,
  fs: F,
}

impl<F: FileSystem + Clone> FsResolverLoaderFactory<F> {
  pub fn new(options: NormalizedDenoPluginOptions, fs: F) -> Self {
    Self { options: Arc::new(options), fs }
  }
}

#[async_trait]
impl<F: FileSystem + Clone> ResolverLoaderFactory for FsResolverLoaderFactory<F> {
  async fn open(&self, entrypoints: &[String]) -> anyhow::Result<Box<dyn ResolverLoader>> {
    let loader = FsResolverLoader::new(Arc::clone(&self.options), self.fs.clone());
    for entrypoint in entrypoints {
      let root = loader.resolve_entrypoint(entrypoint, ResolutionMode::Import)?;
      if root.scheme() == "file" && !self.fs.exists(&file_url_to_path(&root)?) {
        anyhow::bail!("Module not found \"{root}\".");
      }
      tracing::debug!(entrypoint, root = %root, "resolved entrypoint");
    }
    tracing::info!(entrypoints = entrypoints.len(), "opened file system resolver");
    Ok(Box::new(loader))
  }
}

/// Resolves `file:` modules against a [`FileSystem`] and treats node builtins as externals.
///
/// Local paths, sloppy imports and packages in `node_modules` are resolved by
/// `oxc_resolver`. Remote modules resolve to their URL but are never fetched, `load`
/// reports them as absent so another plugin can provide them.
pub struct FsResolverLoader<F: FileSystem + Clone = OsFileSystem> {
  options: Arc<NormalizedDenoPluginOptions>,
  fs: F,
  import_resolver: ResolverGeneric<FsCache<F>>,
  require_resolver: ResolverGeneric<FsCache<F>>,
  disposed: AtomicBool,
}

impl<F: FileSystem + Clone> FsResolverLoader<F> {
  pub fn new(options: Arc<NormalizedDenoPluginOptions>, fs: F) -> Self {
    let (extensions, main_files) = if options.sloppy_imports {
      (SLOPPY_EXTENSIONS.map(String::from).to_vec(), SLOPPY_MAIN_FILES.map(String::from).to_vec())
    } else {
      (vec![], vec![])
    };

    let import_options = OxcResolverOptions {
      extensions,
      main_files,
      builtin_modules: options.builtin_externals,
      condition_names: ["deno", "import", "module", "default"].map(String::from).to_vec(),
      main_fields: vec!["module".to_string(), "main".to_string()],
      ..Default::default()
    };
    let require_options = OxcResolverOptions {
      condition_names: ["deno", "require", "default"].map(String::from).to_vec(),
      ..import_options.clone()
    };

    let import_resolver =
      ResolverGeneric::new_with_cache(Arc::new(FsCache::new(fs.clone())), import_options);
    let require_resolver = import_resolver.clone_with_options(require_options);

    Self { options, fs, import_resolver, require_resolver, disposed: AtomicBool::new(false) }
  }

  pub fn is_disposed(&self) -> bool {
    self.disposed.load(Ordering::Acquire)
  }

  fn ensure_open(&self) -> anyhow::Result<()> {
    if self.is_disposed() {
      anyhow::bail!("The resolver was used after it has been disposed");
    }
    Ok(())
  }

  fn resolve_entrypoint(&self, entrypoint: &str, mode: ResolutionMode) -> anyhow::Result<Url> {
    let url = parse_entrypoint(entrypoint, &self.options.cwd)?;
    if url.scheme() != "file" {
      return Ok(url);
    }
    let path = file_url_to_path(&url)?;
    self.resolve_path(path.parent().unwrap_or(self.options.cwd.as_path()), &path.to_string_lossy(), mode)
  }

  fn resolve_specifier(
    &self,
    specifier: &str,
    referrer: &Url,
    mode: ResolutionMode,
  ) -> anyhow::Result<Url> {
    if let Some(name) = specifier.strip_prefix("node:") {
      if !is_existing_node_builtin_modules(name) {
        anyhow::bail!("Unknown built-in \"node:\" module: {name}");
      }
      return Ok(Url::parse(specifier)?);
    }

    if let Ok(url) = Url::parse(specifier) {
      return match url.scheme() {
        "file" => {
          let path = file_url_to_path(&url)?;
          self.resolve_path(path.parent().unwrap_or(path.as_path()), &path.to_string_lossy(), mode)
        }
        "http" | "https" | "data" => Ok(url),
        scheme => anyhow::bail!(
          "\"{scheme}:\" specifiers are not supported by the file system resolver: {specifier}"
        ),
      };
    }

    if referrer.scheme() != "file" {
      // Remote modules only ever import relative to their own URL.
      if is_path_like(specifier) {
        return Ok(referrer.join(specifier)?);
      }
      anyhow::bail!("Import \"{specifier}\" not a dependency and not in import map from \"{referrer}\"");
    }

    let referrer_path = file_url_to_path(referrer)?;
    let dir = referrer_path.parent().unwrap_or(self.options.cwd.as_path());
    self.resolve_path(dir, specifier, mode).map_err(|err| {
      err.context(format!("Import \"{specifier}\" could not be resolved from \"{referrer}\""))
    })
  }

  /// A path-like specifier that matches nothing still resolves, so that loading
  /// it reports the module as absent.
  fn resolve_path(&self, dir: &Path, specifier: &str, mode: ResolutionMode) -> anyhow::Result<Url> {
    let resolver = match mode {
      ResolutionMode::Import => &self.import_resolver,
      ResolutionMode::Require => &self.require_resolver,
    };
    match resolver.resolve(dir, specifier) {
      Ok(resolution) => {
        if resolution.path().to_string_lossy() != specifier {
          tracing::trace!(specifier, to = %resolution.path().display(), "sloppy import");
        }
        path_to_file_url(resolution.path())
      }
      Err(ResolveError::Builtin { resolved, .. }) => Ok(Url::parse(&resolved)?),
      Err(ResolveError::NotFound(_)) if is_path_like(specifier) => {
        path_to_file_url(&dir.join(specifier).normalize())
      }
      Err(ResolveError::NotFound(_)) => {
        anyhow::bail!("Import \"{specifier}\" not a dependency and not in import map")
      }
      Err(err) => Err(err.into()),
    }
  }
}

fn is_path_like(specifier: &str) -> bool {
  specifier.starts_with("./")
    || specifier.starts_with("../")
    || specifier.starts_with('/')
    || Path::new(specifier).is_absolute()
}

#[async_trait]
impl<F: FileSystem + Clone> ResolverLoader for FsResolverLoader<F> {
  async fn resolve(
    &self,
    specifier: &str,
    importer: Option<&str>,
    mode: ResolutionMode,
  ) -> anyhow::Result<ArcStr> {
    self.ensure_open()?;
    let resolved = match importer {
      Some(importer) => {
        let referrer = parse_referrer(importer, &self.options.cwd)?;
        self.resolve_specifier(specifier, &referrer, mode)?
      }
      None => self.resolve_entrypoint(specifier, mode)?,
    };
    tracing::trace!(specifier, importer, ?mode, resolved = %resolved, "resolved");
    Ok(resolved.as_str().into())
  }

  async fn load(&self, specifier: &str) -> anyhow::Result<Option<LoadResponse>> {
    self.ensure_open()?;
    let url = Url::parse(specifier)?;
    match url.scheme() {
      "node" => Ok(Some(LoadResponse::External { specifier: specifier.into() })),
      "file" => {
        let path = file_url_to_path(&url)?;
        if !self.fs.exists(&path) {
          return Ok(None);
        }
        let media_type = MediaType::from_path(&path);
        if media_type == MediaType::Wasm {
          anyhow::bail!("Wasm is not supported.");
        }
        let source = self.fs.read(&path)?;
        Ok(Some(LoadResponse::Internal { specifier: url.as_str().into(), media_type, source }))
      }
      "http" | "https" | "data" => {
        tracing::debug!(specifier, "remote modules are not fetched by the file system loader");
        Ok(None)
      }
      scheme => anyhow::bail!("Unsupported scheme \"{scheme}\" for module {specifier}"),
    }
  }

  fn dispose(&self) {
    if !self.disposed.swap(true, Ordering::AcqRel) {
      tracing::info!("disposed file system resolver");
    }
  }
}

#[cfg(test)]
#[cfg(not(target_os = "windows"))]
mod tests {
  use std::path::PathBuf;

  use denopack_fs::MemoryFileSystem;

  use super::*;

  fn factory(sloppy_imports: bool) -> FsResolverLoaderFactory<MemoryFileSystem> {
    let fs = MemoryFileSystem::default();
    fs.add_file("/proj/main.ts", "import './util'").unwrap();
    fs.add_file("/proj/util.ts", "export const util = 1;").unwrap();
    fs.add_file("/proj/lib/index.tsx", "export default <div />;").unwrap();
    fs.add_file("/proj/types.d.ts", "export type A = string;").unwrap();
    fs.add_file("/proj/std/mod.ts", "export * from './path.ts';").unwrap();
    fs.add_file("/proj/add.wasm", b"\0asm\x01\0\0\0").unwrap();
    fs.add_file(
      "/proj/node_modules/pkg/package.json",
      r#"{ "name": "pkg", "exports": { "import": "./esm.js", "require": "./cjs.cjs" } }"#,
    )
    .unwrap();
    fs.add_file("/proj/node_modules/pkg/esm.js", "export default 1;").unwrap();
    fs.add_file("/proj/node_modules/pkg/cjs.cjs", "module.exports = 1;").unwrap();
    let options =
      NormalizedDenoPluginOptions { cwd: PathBuf::from("/proj"), sloppy_imports, builtin_externals: true };
    FsResolverLoaderFactory::new(options, fs)
  }

  async fn open(sloppy_imports: bool) -> Box<dyn ResolverLoader> {
    factory(sloppy_imports).open(&["./main.ts".to_string()]).await.unwrap()
  }

  #[tokio::test]
  async fn open_rejects_missing_entrypoints() {
    let err = factory(true).open(&["./missing.ts".to_string()]).await.err().unwrap();
    assert_eq!(err.to_string(), "Module not found \"file:///proj/missing.ts\".");
  }

  #[tokio::test]
  async fn resolves_sloppy_imports() {
    let loader = open(true).await;
    let importer = Some("file:///proj/main.ts");
    let resolved = loader.resolve("./util", importer, ResolutionMode::Import).await.unwrap();
    assert_eq!(resolved, "file:///proj/util.ts");

    let resolved = loader.resolve("./lib", importer, ResolutionMode::Import).await.unwrap();
    assert_eq!(resolved, "file:///proj/lib/index.tsx");

    let resolved = loader.resolve("./std", importer, ResolutionMode::Import).await.unwrap();
    assert_eq!(resolved, "file:///proj/std/mod.ts");

    let loader = open(false).await;
    let resolved = loader.resolve("./util", importer, ResolutionMode::Import).await.unwrap();
    assert_eq!(resolved, "file:///proj/util");
    assert_eq!(loader.load(&resolved).await.unwrap(), None);
  }

  #[tokio::test]
  async fn importer_paths_are_accepted() {
    let loader = open(true).await;
    let resolved = loader.resolve("./util.ts", Some("/proj/main.ts"), ResolutionMode::Require).await;
    assert_eq!(resolved.unwrap(), "file:///proj/util.ts");
  }

  #[tokio::test]
  async fn builtins_are_external() {
    let loader = open(true).await;
    let importer = Some("file:///proj/main.ts");
    assert_eq!(loader.resolve("node:events", importer, ResolutionMode::Import).await.unwrap(), "node:events");
    assert_eq!(loader.resolve("fs", importer, ResolutionMode::Require).await.unwrap(), "node:fs");
    assert_eq!(
      loader.load("node:events").await.unwrap(),
      Some(LoadResponse::External { specifier: "node:events".into() })
    );
    assert!(loader.resolve("node:nope", importer, ResolutionMode::Import).await.is_err());
    assert!(loader.resolve("react", importer, ResolutionMode::Import).await.is_err());
  }

  #[tokio::test]
  async fn loads_local_files_with_their_media_type() {
    let loader = open(true).await;
    let Some(LoadResponse::Internal { specifier, media_type, source }) =
      loader.load("file:///proj/types.d.ts").await.unwrap()
    else {
      panic!("expected an internal module");
    };
    assert_eq!(specifier, "file:///proj/types.d.ts");
    assert_eq!(media_type, MediaType::Dts);
    assert_eq!(source, b"export type A = string;");
  }

  #[tokio::test]
  async fn remote_modules_are_absent() {
    let loader = open(true).await;
    let importer = Some("file:///proj/main.ts");
    let resolved =
      loader.resolve("https://deno.land/std/path/mod.ts", importer, ResolutionMode::Import).await.unwrap();
    assert_eq!(loader.load(&resolved).await.unwrap(), None);
  }

  #[tokio::test]
  async fn refuses_work_after_dispose() {
    let loader = open(true).await;
    loader.dispose();
    loader.dispose();
    assert!(loader.load("file:///proj/util.ts").await.is_err());
  }

  #[tokio::test]
  async fn packages_follow_the_resolution_mode() {
    let loader = open(true).await;
    let importer = Some("file:///proj/main.ts");
    let resolved = loader.resolve("pkg", importer, ResolutionMode::Import).await.unwrap();
    assert_eq!(resolved, "file:///proj/node_modules/pkg/esm.js");
    let resolved = loader.resolve("pkg", importer, ResolutionMode::Require).await.unwrap();
    assert_eq!(resolved, "file:///proj/node_modules/pkg/cjs.cjs");
  }

  #[tokio::test]
  async fn builtins_stay_bare_when_not_external() {
    let options =
      NormalizedDenoPluginOptions { cwd: PathBuf::from("/proj"), sloppy_imports: true, builtin_externals: false };
    let fs = MemoryFileSystem::default();
    fs.add_file("/proj/main.ts", "").unwrap();
    let loader = FsResolverLoaderFactory::new(options, fs).open(&["./main.ts".to_string()]).await.unwrap();
    let importer = Some("file:///proj/main.ts");
    assert!(loader.resolve("fs", importer, ResolutionMode::Import).await.is_err());
    assert_eq!(loader.resolve("node:fs", importer, ResolutionMode::Import).await.unwrap(), "node:fs");
  }

  #[tokio::test]
  async fn wasm_modules_are_rejected() {
    let loader = open(true).await;
    let resolved = loader.resolve("./add.wasm", Some("/proj/main.ts"), ResolutionMode::Import).await;
    assert_eq!(resolved.unwrap(), "file:///proj/add.wasm");
    let err = loader.load("file:///proj/add.wasm").await.unwrap_err();
    assert_eq!(err.to_string(), "Wasm is not supported.");
  }
}
