use phf::{phf_set, Set};

// from require("module").builtinModules
static NODE_BUILTIN_MODULES: Set<&'static str> = phf_set! {
  "_http_agent",
  "_http_client",
  "_http_common",
  "_http_incoming",
  "_http_outgoing",
  "_http_server",
  "_stream_duplex",
  "_stream_passthrough",
  "_stream_readable",
  "_stream_transform",
  "_stream_wrap",
  "_stream_writable",
  "_tls_common",
  "_tls_wrap",
  "assert",
  "assert/strict",
  "async_hooks",
  "buffer",
  "child_process",
  "cluster",
  "console",
  "constants",
  "crypto",
  "dgram",
  "diagnostics_channel",
  "dns",
  "dns/promises",
  "domain",
  "events",
  "fs",
  "fs/promises",
  "http",
  "http2",
  "https",
  "inspector",
  "module",
  "net",
  "os",
  "path",
  "path/posix",
  "path/win32",
  "perf_hooks",
  "process",
  "punycode",
  "querystring",
  "readline",
  "readline/promises",
  "repl",
  "stream",
  "stream/consumers",
  "stream/promises",
  "stream/web",
  "string_decoder",
  "sys",
  "timers",
  "timers/promises",
  "tls",
  "trace_events",
  "tty",
  "url",
  "util",
  "util/types",
  "v8",
  "vm",
  "wasi",
  "worker_threads",
  "zlib",
};

/// Accepts both `fs` and `node:fs`.
pub fn is_existing_node_builtin_modules(specifier: &str) -> bool {
  let name = specifier.strip_prefix("node:").unwrap_or(specifier);
  NODE_BUILTIN_MODULES.contains(name)
}

#[test]
fn test_node_builtins() {
  assert!(is_existing_node_builtin_modules("events"));
  assert!(is_existing_node_builtin_modules("node:events"));
  assert!(is_existing_node_builtin_modules("node:fs/promises"));
  assert!(!is_existing_node_builtin_modules("react"));
  assert!(!is_existing_node_builtin_modules("node:react"));
}
