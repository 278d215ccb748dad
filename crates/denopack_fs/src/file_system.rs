use std::{io, path::Path};

use oxc_resolver::FileSystem as OxcResolverFileSystem;

/// The file system modules are resolved and loaded from. Resolution inspects it
/// through `oxc_resolver`, loading reads module sources with [`FileSystem::read`].
pub trait FileSystem: OxcResolverFileSystem + Send + Sync + 'static {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn exists(&self, path: &Path) -> bool;
}
