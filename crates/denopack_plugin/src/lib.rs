mod plugin;
mod plugin_driver;
mod types;

pub use crate::{
  plugin::{
    HookBuildStartReturn, HookLoadReturn, HookNoopReturn, HookResolveIdReturn, Plugin,
    SharedPlugin,
  },
  plugin_driver::PluginDriver,
  types::{
    hook_build_start_args::HookBuildStartArgs, hook_load_args::HookLoadArgs,
    hook_load_output::HookLoadOutput, hook_resolve_id_args::HookResolveIdArgs,
    hook_resolve_id_output::HookResolveIdOutput,
  },
};
