mod deno_plugin;
mod session;
mod types;
mod utils;

pub use crate::{
  deno_plugin::DenoPlugin,
  session::Session,
  types::module_record::ModuleRecord,
  utils::{
    bundler_id::{bundler_id, MEDIA_TYPE_MARKER},
    normalize_options::normalize_options,
  },
};
pub use denopack_common::*;
