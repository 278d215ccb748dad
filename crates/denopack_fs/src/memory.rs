use std::{
  io::{self, Read, Write},
  path::{Path, PathBuf},
};

use oxc_resolver::{FileMetadata, FileSystem as OxcResolverFileSystem};
use vfs::{MemoryFS, VfsFileType, VfsPath};

use crate::FileSystem;

/// An in-memory file system for tests. Paths are interpreted from the root,
/// so `/proj/main.ts` and `proj/main.ts` name the same file.
#[derive(Debug, Clone)]
pub struct MemoryFileSystem {
  root: VfsPath,
}

impl Default for MemoryFileSystem {
  fn default() -> Self {
    Self { root: VfsPath::new(MemoryFS::new()) }
  }
}

impl MemoryFileSystem {
  pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> io::Result<()> {
    let file = self.vfs_path(path.as_ref())?;
    file.parent().create_dir_all().map_err(io::Error::other)?;
    let mut writer = file.create_file().map_err(io::Error::other)?;
    writer.write_all(content.as_ref())?;
    writer.flush()
  }

  fn vfs_path(&self, path: &Path) -> io::Result<VfsPath> {
    let path = path.to_string_lossy();
    let path = path.replace('\\', "/");
    let relative = path.trim_start_matches('/');
    if relative.is_empty() {
      return Ok(self.root.clone());
    }
    self.root.join(relative).map_err(io::Error::other)
  }

  fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
  }
}

impl FileSystem for MemoryFileSystem {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    let file = self.vfs_path(path)?;
    if !file.is_file().unwrap_or(false) {
      return Err(Self::not_found(path));
    }
    let mut buf = Vec::new();
    file.open_file().map_err(io::Error::other)?.read_to_end(&mut buf)?;
    Ok(buf)
  }

  fn exists(&self, path: &Path) -> bool {
    self.vfs_path(path).is_ok_and(|entry| entry.exists().unwrap_or(false))
  }
}

impl OxcResolverFileSystem for MemoryFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let bytes = self.read(path)?;
    String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
  }

  fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
    let metadata = self.vfs_path(path)?.metadata().map_err(|_| Self::not_found(path))?;
    let is_file = metadata.file_type == VfsFileType::File;
    Ok(FileMetadata::new(is_file, !is_file, false))
  }

  fn symlink_metadata(&self, path: &Path) -> io::Result<FileMetadata> {
    self.metadata(path)
  }

  fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
    Err(io::Error::new(io::ErrorKind::InvalidInput, format!("{} is not a symlink", path.display())))
  }
}
