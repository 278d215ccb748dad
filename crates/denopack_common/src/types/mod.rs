pub mod import_kind;
pub mod load_response;
pub mod media_type;
pub mod module_id;
pub mod node_builtins;
pub mod resolution_mode;
pub mod resolved_id;
