use std::path::{Path, PathBuf};

use anyhow::Context;
use denopack_error::DenoPluginError;
use sugar_path::SugarPath;
use url::Url;

const URL_ENTRYPOINT_PREFIXES: [&str; 6] = ["jsr:", "npm:", "node:", "http:", "https:", "file:"];

/// Entrypoints are either URLs or paths relative to `cwd`.
pub fn parse_entrypoint(entrypoint: &str, cwd: &Path) -> anyhow::Result<Url> {
  let invalid = || DenoPluginError::InvalidEntrypoint { entrypoint: entrypoint.to_string() };
  if URL_ENTRYPOINT_PREFIXES.iter().any(|prefix| entrypoint.starts_with(prefix)) {
    Url::parse(entrypoint).with_context(invalid)
  } else {
    let path = cwd.join(entrypoint).normalize();
    path_to_file_url(&path).with_context(invalid)
  }
}

/// Importers handed back by a bundler are either remote/file URLs or plain paths.
pub fn parse_referrer(referrer: &str, cwd: &Path) -> anyhow::Result<Url> {
  if ["http:", "https:", "file:"].iter().any(|prefix| referrer.starts_with(prefix)) {
    Ok(Url::parse(referrer)?)
  } else {
    path_to_file_url(&cwd.join(referrer).normalize())
  }
}

pub(crate) fn path_to_file_url(path: &Path) -> anyhow::Result<Url> {
  Url::from_file_path(path)
    .map_err(|()| anyhow::anyhow!("{} can not be converted to a file URL", path.display()))
}

pub(crate) fn file_url_to_path(url: &Url) -> anyhow::Result<PathBuf> {
  url.to_file_path().map_err(|()| anyhow::anyhow!("{url} is not a valid file URL"))
}

#[cfg(test)]
#[cfg(not(target_os = "windows"))]
mod tests {
  use super::*;

  #[test]
  fn entrypoint_paths_are_joined_onto_cwd() {
    let cwd = Path::new("/proj");
    assert_eq!(parse_entrypoint("./src/../main.ts", cwd).unwrap().as_str(), "file:///proj/main.ts");
    assert_eq!(parse_entrypoint("/abs/main.ts", cwd).unwrap().as_str(), "file:///abs/main.ts");
    assert_eq!(
      parse_entrypoint("https://deno.land/x/mod.ts", cwd).unwrap().as_str(),
      "https://deno.land/x/mod.ts"
    );
    assert_eq!(parse_entrypoint("jsr:@std/path", cwd).unwrap().as_str(), "jsr:@std/path");
  }

  #[test]
  fn invalid_url_entrypoint_is_reported() {
    let err = parse_entrypoint("https://", Path::new("/proj")).unwrap_err();
    assert!(matches!(
      err.downcast_ref::<DenoPluginError>(),
      Some(DenoPluginError::InvalidEntrypoint { entrypoint }) if entrypoint == "https://"
    ));
  }

  #[test]
  fn referrer_paths_become_file_urls() {
    let cwd = Path::new("/proj");
    assert_eq!(parse_referrer("/proj/main.ts", cwd).unwrap().as_str(), "file:///proj/main.ts");
    assert_eq!(parse_referrer("file:///proj/a.ts", cwd).unwrap().as_str(), "file:///proj/a.ts");
    assert_eq!(parse_referrer("https://esm.sh/x.js", cwd).unwrap().as_str(), "https://esm.sh/x.js");
  }
}
