use denopack_error::DenoPluginError;

use super::import_kind::ImportKind;

/// The module system a specifier is resolved for. Decides which `exports`
/// conditions apply when the resolver walks into a package.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ResolutionMode {
  Import,
  Require,
}

impl TryFrom<ImportKind> for ResolutionMode {
  type Error = DenoPluginError;

  fn try_from(kind: ImportKind) -> Result<Self, Self::Error> {
    match kind {
      ImportKind::Import | ImportKind::DynamicImport => Ok(Self::Import),
      ImportKind::Require => Ok(Self::Require),
      ImportKind::AtImport | ImportKind::UrlImport | ImportKind::NewUrl => {
        Err(DenoPluginError::UnsupportedResolveKind { kind: kind.to_string() })
      }
    }
  }
}

#[test]
fn test_resolution_mode_from_import_kind() {
  assert_eq!(ResolutionMode::try_from(ImportKind::Import).ok(), Some(ResolutionMode::Import));
  assert_eq!(ResolutionMode::try_from(ImportKind::DynamicImport).ok(), Some(ResolutionMode::Import));
  assert_eq!(ResolutionMode::try_from(ImportKind::Require).ok(), Some(ResolutionMode::Require));

  let err = ResolutionMode::try_from(ImportKind::AtImport).unwrap_err();
  assert!(matches!(err, DenoPluginError::UnsupportedResolveKind { kind } if kind == "at-import"));
}
