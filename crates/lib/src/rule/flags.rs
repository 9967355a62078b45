//! Toolchain flag tables, emitted once as global variables.

pub const ASFLAGS: &[&str] = &["-isystem", "include", "-isystem", "payload"];

pub const CFLAGS: &[&str] = &[
  "-fms-extensions",
  "-fno-asynchronous-unwind-tables",
  "-fplan9-extensions",
  "-fshort-wchar",
  "-isystem",
  "include",
  "-isystem",
  "payload",
  "-O2",
  "-Wall",
  "-Werror=implicit-function-declaration",
  "-Werror=incompatible-pointer-types",
  "-Wextra",
  "-Wno-packed-bitfield-compat",
];

// g++ rejects the plan9 extensions and the C-only -Werror flags.
pub const CPPFLAGS: &[&str] = &[
  "-fms-extensions",
  "-fno-asynchronous-unwind-tables",
  "-fshort-wchar",
  "-isystem",
  "include",
  "-isystem",
  "payload",
  "-O2",
  "-Wall",
  "-Wextra",
  "-Wno-packed-bitfield-compat",
  "-fno-exceptions",
  "-fno-unwind-tables",
];

pub const LDFLAGS: &[&str] = &["-nostdlib", "-Wl,--entry=start", "-Wl,--oformat,binary"];

pub fn join(flags: &[&str]) -> String {
  flags.join(" ")
}
