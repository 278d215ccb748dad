pub mod bundler_id;
pub mod normalize_options;
