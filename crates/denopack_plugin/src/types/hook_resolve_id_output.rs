pub type HookResolveIdOutput = denopack_common::ResolvedId;
