use thiserror::Error;

/// Diagnostics raised by the deno plugin itself.
///
/// Failures coming from the resolver/loader service are never replaced by one
/// of these. Where a variant describes such a failure it is attached as
/// `anyhow` context, so `{:#}` still prints the original message and
/// `downcast_ref::<DenoPluginError>()` recovers the kind.
#[derive(Debug, Error)]
pub enum DenoPluginError {
  #[error("Unsupported resolution kind {kind:?}, expected one of \"import-statement\", \"dynamic-import\" or \"require-call\"")]
  UnsupportedResolveKind { kind: String },

  #[error("Failed to resolve {specifier:?} from {}", .importer.as_deref().unwrap_or("<entry>"))]
  ResolveFailed { specifier: String, importer: Option<String> },

  #[error("Invalid entrypoint {entrypoint:?}")]
  InvalidEntrypoint { entrypoint: String },

  #[error("Unknown media type {0}")]
  UnknownMediaType(u8),

  #[error("The deno plugin was used before `buildStart` opened a session")]
  SessionNotStarted,
}

#[test]
fn test_resolve_failed_names_both_inputs() {
  let err = DenoPluginError::ResolveFailed {
    specifier: "./util".to_string(),
    importer: Some("/proj/main.ts".to_string()),
  };
  assert_eq!(err.to_string(), "Failed to resolve \"./util\" from /proj/main.ts");

  let err = DenoPluginError::ResolveFailed { specifier: "./main.ts".to_string(), importer: None };
  assert_eq!(err.to_string(), "Failed to resolve \"./main.ts\" from <entry>");
}
