pub mod module_record;

use std::sync::Arc;

use denopack_resolver::ResolverLoaderFactory;

pub type SharedResolverLoaderFactory = Arc<dyn ResolverLoaderFactory>;
