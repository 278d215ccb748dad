use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputItem {
  pub name: Option<String>,
  pub import: String,
}

impl From<&str> for InputItem {
  fn from(value: &str) -> Self {
    Self { name: None, import: value.to_string() }
  }
}

impl From<String> for InputItem {
  fn from(value: String) -> Self {
    Self { name: None, import: value }
  }
}

/// The `input` option as a user writes it: `"main.ts"`, `["a.ts", "b.ts"]` or `{ "a": "a.ts" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InputOption {
  Single(String),
  Multiple(Vec<String>),
  Named(IndexMap<String, String>),
}

impl InputOption {
  /// Order is preserved, including the insertion order of named inputs.
  pub fn into_input_items(self) -> Vec<InputItem> {
    match self {
      Self::Single(import) => vec![import.into()],
      Self::Multiple(imports) => imports.into_iter().map(InputItem::from).collect(),
      Self::Named(named) => named
        .into_iter()
        .map(|(name, import)| InputItem { name: Some(name), import })
        .collect(),
    }
  }
}

impl From<&str> for InputOption {
  fn from(value: &str) -> Self {
    Self::Single(value.to_string())
  }
}

impl From<Vec<String>> for InputOption {
  fn from(value: Vec<String>) -> Self {
    Self::Multiple(value)
  }
}

impl From<IndexMap<String, String>> for InputOption {
  fn from(value: IndexMap<String, String>) -> Self {
    Self::Named(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn imports(option: InputOption) -> Vec<String> {
    option.into_input_items().into_iter().map(|item| item.import).collect()
  }

  #[test]
  fn accepts_every_input_shape() {
    let single: InputOption = serde_json::from_str(r#""main.ts""#).unwrap();
    assert_eq!(imports(single), ["main.ts"]);

    let multiple: InputOption = serde_json::from_str(r#"["a.ts", "b.ts"]"#).unwrap();
    assert_eq!(imports(multiple), ["a.ts", "b.ts"]);

    let named: InputOption = serde_json::from_str(r#"{ "z": "z.ts", "a": "a.ts" }"#).unwrap();
    assert_eq!(imports(named), ["z.ts", "a.ts"]);
  }

  #[test]
  fn named_inputs_keep_their_names() {
    let named = InputOption::from(IndexMap::from([("app".to_string(), "./app.tsx".to_string())]));
    assert_eq!(
      named.into_input_items(),
      vec![InputItem { name: Some("app".to_string()), import: "./app.tsx".to_string() }]
    );
  }
}
