use denopack_common::{DenoPluginOptions, NormalizedDenoPluginOptions};
use sugar_path::SugarPath;

pub fn normalize_options(raw_options: DenoPluginOptions) -> anyhow::Result<NormalizedDenoPluginOptions> {
  let current_dir = std::env::current_dir()?;
  let cwd = raw_options.cwd.map_or_else(
    || current_dir.clone(),
    |cwd| if cwd.is_absolute() { cwd.normalize() } else { current_dir.join(cwd).normalize() },
  );

  Ok(NormalizedDenoPluginOptions {
    cwd,
    sloppy_imports: raw_options.sloppy_imports.unwrap_or(true),
    builtin_externals: raw_options.builtin_externals.unwrap_or(true),
  })
}

#[test]
fn test_defaults() {
  let options = normalize_options(DenoPluginOptions::default()).unwrap();
  assert_eq!(options.cwd, std::env::current_dir().unwrap());
  assert!(options.sloppy_imports);
  assert!(options.builtin_externals);

  let options = normalize_options(DenoPluginOptions {
    cwd: Some("fixtures/../proj".into()),
    sloppy_imports: Some(false),
    builtin_externals: None,
  })
  .unwrap();
  assert_eq!(options.cwd, std::env::current_dir().unwrap().join("proj"));
  assert!(!options.sloppy_imports);
}
