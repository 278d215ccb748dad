use denopack_common::InputItem;

#[derive(Debug, Clone, Copy)]
pub struct HookBuildStartArgs<'a> {
  pub input: &'a [InputItem],
}
