pub mod hook_build_start_args;
pub mod hook_load_args;
pub mod hook_load_output;
pub mod hook_resolve_id_args;
pub mod hook_resolve_id_output;
