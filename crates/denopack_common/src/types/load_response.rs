use arcstr::ArcStr;

use super::media_type::MediaType;

/// A module the resolver/loader service was able to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResponse {
  Internal {
    /// The canonical specifier, which may differ from the requested one after redirects.
    specifier: ArcStr,
    media_type: MediaType,
    source: Vec<u8>,
  },
  /// Must not be bundled. Referenced verbatim at runtime.
  External { specifier: ArcStr },
}

impl LoadResponse {
  pub fn specifier(&self) -> &ArcStr {
    match self {
      Self::Internal { specifier, .. } | Self::External { specifier } => specifier,
    }
  }

  pub fn is_external(&self) -> bool {
    matches!(self, Self::External { .. })
  }
}
