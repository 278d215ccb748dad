// The service the deno plugin delegates module resolution and loading to, plus a
// file system backed implementation of it.

mod fs_resolver_loader;
mod resolver_loader;
mod specifier;

pub use crate::{
  fs_resolver_loader::{FsResolverLoader, FsResolverLoaderFactory},
  resolver_loader::{ResolverLoader, ResolverLoaderFactory},
  specifier::{parse_entrypoint, parse_referrer},
};
