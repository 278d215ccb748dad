mod plugin_options;
mod types;

pub use crate::{
  plugin_options::{
    input_option::{InputItem, InputOption},
    module_type::ModuleType,
    normalized_plugin_options::NormalizedDenoPluginOptions,
    DenoPluginOptions,
  },
  types::{
    import_kind::ImportKind,
    load_response::LoadResponse,
    media_type::MediaType,
    module_id::{stabilize_module_id, ModuleId},
    node_builtins::is_existing_node_builtin_modules,
    resolution_mode::ResolutionMode,
    resolved_id::ResolvedId,
  },
};
