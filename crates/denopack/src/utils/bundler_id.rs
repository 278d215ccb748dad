use std::borrow::Cow;

use denopack_common::{MediaType, ModuleId};
use url::Url;

/// Separates a specifier from the extension appended to it. NUL never occurs in a
/// URL or a file path, so ids carrying the marker can't collide with real specifiers.
pub const MEDIA_TYPE_MARKER: &str = "\0deno";

/// Derives the id a bundler sees for a module from its true specifier and media type.
///
/// Bundlers pick a module's loader from the id's extension, so the id always ends with
/// the extension of `media_type`. `file:` specifiers become plain paths unless they
/// carry a query, a fragment or an escape the path can't reproduce.
///
/// - `file:///proj/util.ts` + TypeScript -> `/proj/util.ts`
/// - `https://host/mod` + TypeScript -> `https://host/mod\0deno.ts`
/// - `https://host/data.json` + JavaScript -> `https://host/data.json\0deno.js`
pub fn bundler_id(specifier: &str, media_type: MediaType) -> ModuleId {
  let extension = media_type.extension();
  let base = file_url_to_path(specifier).map_or(Cow::Borrowed(specifier), Cow::Owned);
  if base.ends_with(extension) {
    ModuleId::new(base.into_owned())
  } else {
    ModuleId::new(format!("{base}{MEDIA_TYPE_MARKER}{extension}"))
  }
}

fn file_url_to_path(specifier: &str) -> Option<String> {
  if !specifier.starts_with("file:") {
    return None;
  }
  let path = Url::parse(specifier).ok()?.to_file_path().ok()?;
  // Only a specifier that is exactly the URL of its path may become that path. Queries,
  // fragments and unusual escapes keep the URL form so no two specifiers share an id.
  if Url::from_file_path(&path).ok()?.as_str() != specifier {
    return None;
  }
  let path = path.to_str()?;
  // A decoded `%00` would smuggle the marker into a path.
  (!path.contains('\0')).then(|| path.to_string())
}
