mod plugin_error;

use std::ops::{Deref, DerefMut};

pub use crate::plugin_error::DenoPluginError;

/// Errors collected from one build phase. Hooks that run across every plugin
/// keep going after a failure, so a phase can report more than one error.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Finds the first typed plugin diagnostic, looking through `anyhow` context layers.
  pub fn plugin_error(&self) -> Option<&DenoPluginError> {
    self.0.iter().find_map(|err| err.downcast_ref::<DenoPluginError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (idx, err) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{err:#}")?;
    }
    Ok(())
  }
}

impl std::error::Error for BuildError {}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<DenoPluginError> for BuildError {
  fn from(error: DenoPluginError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_display_joins_every_error() {
  let err = BuildError::from(vec![anyhow::anyhow!("first"), anyhow::anyhow!("second")]);
  assert_eq!(err.to_string(), "first\nsecond");
  assert_eq!(err.len(), 2);
}

#[test]
fn test_plugin_error_is_found_behind_context() {
  use anyhow::Context;

  let cause: anyhow::Result<()> = Err(anyhow::anyhow!("Module not found"));
  let err = cause
    .context(DenoPluginError::ResolveFailed {
      specifier: "./missing".to_string(),
      importer: None,
    })
    .unwrap_err();
  let build_error = BuildError::from(vec![anyhow::anyhow!("unrelated"), err]);

  assert!(matches!(build_error.plugin_error(), Some(DenoPluginError::ResolveFailed { .. })));
  assert!(build_error.to_string().ends_with("Module not found"));
}
