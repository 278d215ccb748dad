use std::{
  io,
  path::{Path, PathBuf},
};

use oxc_resolver::{FileMetadata, FileSystem as OxcResolverFileSystem};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }
}

impl OxcResolverFileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
    let metadata = std::fs::metadata(path)?;
    Ok(FileMetadata::new(metadata.is_file(), metadata.is_dir(), metadata.is_symlink()))
  }

  fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
    let metadata = std::fs::symlink_metadata(path)?;
    Ok(FileMetadata::new(metadata.is_file(), metadata.is_dir(), metadata.is_symlink()))
  }

  fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
    std::fs::read_link(path)
  }
}
