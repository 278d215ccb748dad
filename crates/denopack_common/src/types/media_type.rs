use std::{fmt::Display, path::Path};

use denopack_error::DenoPluginError;

/// The declared content type of a module, independent of how its specifier is spelled.
///
/// The set is closed: the resolver/loader service only ever reports one of
/// these, and every table over it below is an exhaustive `match`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MediaType {
  JavaScript,
  Jsx,
  Mjs,
  Cjs,
  TypeScript,
  Mts,
  Cts,
  Dts,
  Dmts,
  Dcts,
  Tsx,
  Css,
  Json,
  Html,
  Sql,
  Wasm,
  SourceMap,
  Unknown,
}

impl MediaType {
  /// The extension a bundler needs to see to treat a module of this type correctly.
  /// `Unknown` maps to the empty string, which every id already ends with.
  pub fn extension(self) -> &'static str {
    match self {
      Self::JavaScript => ".js",
      Self::Jsx => ".jsx",
      Self::Mjs => ".mjs",
      Self::Cjs => ".cjs",
      Self::TypeScript => ".ts",
      Self::Mts => ".mts",
      Self::Cts => ".cts",
      Self::Dts => ".d.ts",
      Self::Dmts => ".d.mts",
      Self::Dcts => ".d.cts",
      Self::Tsx => ".tsx",
      Self::Css => ".css",
      Self::Json => ".json",
      Self::Html => ".html",
      Self::Sql => ".sql",
      Self::Wasm => ".wasm",
      Self::SourceMap => ".map",
      Self::Unknown => "",
    }
  }

  /// Wire value used when the media type crosses a language boundary.
  pub fn as_u8(self) -> u8 {
    match self {
      Self::JavaScript => 0,
      Self::Jsx => 1,
      Self::Mjs => 2,
      Self::Cjs => 3,
      Self::TypeScript => 4,
      Self::Mts => 5,
      Self::Cts => 6,
      Self::Dts => 7,
      Self::Dmts => 8,
      Self::Dcts => 9,
      Self::Tsx => 10,
      Self::Css => 11,
      Self::Json => 12,
      Self::Html => 13,
      Self::Sql => 14,
      Self::Wasm => 15,
      Self::SourceMap => 16,
      Self::Unknown => 17,
    }
  }

  pub fn from_path(path: &Path) -> Self {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      return Self::Unknown;
    };
    let is_declaration = path
      .file_stem()
      .and_then(|stem| stem.to_str())
      .is_some_and(|stem| stem.to_ascii_lowercase().ends_with(".d"));

    match ext.to_ascii_lowercase().as_str() {
      "ts" if is_declaration => Self::Dts,
      "mts" if is_declaration => Self::Dmts,
      "cts" if is_declaration => Self::Dcts,
      "ts" => Self::TypeScript,
      "mts" => Self::Mts,
      "cts" => Self::Cts,
      "tsx" => Self::Tsx,
      "js" => Self::JavaScript,
      "jsx" => Self::Jsx,
      "mjs" => Self::Mjs,
      "cjs" => Self::Cjs,
      "json" | "jsonc" => Self::Json,
      "css" => Self::Css,
      "html" => Self::Html,
      "sql" => Self::Sql,
      "wasm" => Self::Wasm,
      "map" => Self::SourceMap,
      _ => Self::Unknown,
    }
  }
}

impl TryFrom<u8> for MediaType {
  type Error = DenoPluginError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::JavaScript,
      1 => Self::Jsx,
      2 => Self::Mjs,
      3 => Self::Cjs,
      4 => Self::TypeScript,
      5 => Self::Mts,
      6 => Self::Cts,
      7 => Self::Dts,
      8 => Self::Dmts,
      9 => Self::Dcts,
      10 => Self::Tsx,
      11 => Self::Css,
      12 => Self::Json,
      13 => Self::Html,
      14 => Self::Sql,
      15 => Self::Wasm,
      16 => Self::SourceMap,
      17 => Self::Unknown,
      _ => return Err(DenoPluginError::UnknownMediaType(value)),
    })
  }
}

impl Display for MediaType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      Self::JavaScript => "JavaScript",
      Self::Jsx => "JSX",
      Self::Mjs => "Mjs",
      Self::Cjs => "Cjs",
      Self::TypeScript => "TypeScript",
      Self::Mts => "Mts",
      Self::Cts => "Cts",
      Self::Dts => "Dts",
      Self::Dmts => "Dmts",
      Self::Dcts => "Dcts",
      Self::Tsx => "TSX",
      Self::Css => "Css",
      Self::Json => "Json",
      Self::Html => "Html",
      Self::Sql => "Sql",
      Self::Wasm => "Wasm",
      Self::SourceMap => "SourceMap",
      Self::Unknown => "Unknown",
    };
    f.write_str(name)
  }
}
