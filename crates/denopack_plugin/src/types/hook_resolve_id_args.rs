use denopack_common::ImportKind;

#[derive(Debug, Clone, Copy)]
pub struct HookResolveIdArgs<'a> {
  pub source: &'a str,
  /// The id of the module containing the import, as previously returned by some `resolveId` hook.
  pub importer: Option<&'a str>,
  pub kind: ImportKind,
}
