use crate::MediaType;

/// The loader a bundler should run for a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
  Js,
  Jsx,
  Ts,
  Tsx,
  Json,
  Css,
  Text,
  Binary,
}

impl ModuleType {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Js => "js",
      Self::Jsx => "jsx",
      Self::Ts => "ts",
      Self::Tsx => "tsx",
      Self::Json => "json",
      Self::Css => "css",
      Self::Text => "text",
      Self::Binary => "binary",
    }
  }
}

impl From<MediaType> for ModuleType {
  fn from(media_type: MediaType) -> Self {
    match media_type {
      // Unknown sources are most likely scripts served without an extension.
      MediaType::JavaScript | MediaType::Mjs | MediaType::Cjs | MediaType::Unknown => Self::Js,
      MediaType::Jsx => Self::Jsx,
      MediaType::TypeScript
      | MediaType::Mts
      | MediaType::Cts
      | MediaType::Dts
      | MediaType::Dmts
      | MediaType::Dcts => Self::Ts,
      MediaType::Tsx => Self::Tsx,
      MediaType::Json | MediaType::SourceMap => Self::Json,
      MediaType::Css => Self::Css,
      MediaType::Html | MediaType::Sql => Self::Text,
      MediaType::Wasm => Self::Binary,
    }
  }
}

#[test]
fn test_module_type_from_media_type() {
  assert_eq!(ModuleType::from(MediaType::Dts).as_str(), "ts");
  assert_eq!(ModuleType::from(MediaType::Mjs).as_str(), "js");
  assert_eq!(ModuleType::from(MediaType::SourceMap).as_str(), "json");
  assert_eq!(ModuleType::from(MediaType::Wasm).as_str(), "binary");
}
