use std::fmt::Display;

use denopack_error::DenoPluginError;

/// How an import was written, as reported by the bundler.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ImportKind {
  /// import foo from 'foo'
  Import,
  /// `import('foo')`
  DynamicImport,
  /// `require('foo')`
  Require,
  /// `@import 'foo.css'`
  AtImport,
  /// `url('foo.png')`
  UrlImport,
  /// `new URL('foo', import.meta.url)`
  NewUrl,
}

impl TryFrom<&str> for ImportKind {
  type Error = DenoPluginError;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    match value {
      "import-statement" => Ok(Self::Import),
      "dynamic-import" => Ok(Self::DynamicImport),
      "require-call" => Ok(Self::Require),
      "at-import" => Ok(Self::AtImport),
      "url-import" => Ok(Self::UrlImport),
      "new-url" => Ok(Self::NewUrl),
      _ => Err(DenoPluginError::UnsupportedResolveKind { kind: value.to_string() }),
    }
  }
}

impl Display for ImportKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    // https://github.com/evanw/esbuild/blob/d34e79e2a998c21bb71d57b92b0017ca11756912/internal/ast/ast.go#L42
    match self {
      Self::Import => write!(f, "import-statement"),
      Self::DynamicImport => write!(f, "dynamic-import"),
      Self::Require => write!(f, "require-call"),
      Self::AtImport => write!(f, "at-import"),
      Self::UrlImport => write!(f, "url-import"),
      Self::NewUrl => write!(f, "new-url"),
    }
  }
}

#[test]
fn test_import_kind_round_trips_through_its_name() {
  for kind in [
    ImportKind::Import,
    ImportKind::DynamicImport,
    ImportKind::Require,
    ImportKind::AtImport,
    ImportKind::UrlImport,
    ImportKind::NewUrl,
  ] {
    assert_eq!(ImportKind::try_from(kind.to_string().as_str()).ok(), Some(kind));
  }
  assert!(matches!(
    ImportKind::try_from("unknown-kind"),
    Err(DenoPluginError::UnsupportedResolveKind { kind }) if kind == "unknown-kind"
  ));
}
