pub mod input_option;
pub mod module_type;
pub mod normalized_plugin_options;

use std::path::PathBuf;

use serde::Deserialize;

/// User facing options of the deno plugin. Everything is optional, see
/// `denopack::normalize_options` for the defaults.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DenoPluginOptions {
  /// Directory relative entrypoints are resolved against.
  pub cwd: Option<PathBuf>,
  /// Resolve `./util` to `./util.ts` and friends when the exact file is missing.
  pub sloppy_imports: Option<bool>,
  /// Treat bare node builtin names such as `fs` as `node:fs` externals.
  pub builtin_externals: Option<bool>,
}

#[test]
fn test_deserialize_camel_case() {
  let options: DenoPluginOptions =
    serde_json::from_str(r#"{ "cwd": "/proj", "sloppyImports": false }"#).unwrap();
  assert_eq!(options.cwd, Some(PathBuf::from("/proj")));
  assert_eq!(options.sloppy_imports, Some(false));
  assert_eq!(options.builtin_externals, None);

  assert!(serde_json::from_str::<DenoPluginOptions>(r#"{ "sloppy": true }"#).is_err());
}
