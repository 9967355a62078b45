//! Fixed names shared by the graph builders and the emitter.

pub const APP_NAME: &str = "mkgraph";

/// Oldest executor release that understands the emitted file.
pub const NINJA_REQUIRED_VERSION: &str = "1.3";

pub const DEFAULT_BUILDDIR: &str = "build";
pub const DEFAULT_OUTDIR: &str = "out";
pub const DEFAULT_GRAPH_FILE: &str = "build.ninja";
pub const DEFAULT_PYTHON: &str = "python3";

/// Variable references used inside edge paths. The executor expands them.
pub const BUILDDIR_VAR: &str = "$builddir";
pub const OUTDIR_VAR: &str = "$outdir";

/// Suffix appended to every compiled source file.
pub const OBJECT_SUFFIX: &str = ".o";

pub const ASSETS_ROOT: &str = "assets";
pub const SHARED_ASSETS_DIR: &str = "Shared.szs.d";
pub const MERGED_ASSETS_DIR: &str = "merged";

pub const PORT_TOOL: &str = "port.py";
pub const MERGE_TOOL: &str = "merge.py";
pub const ENCODER_TOOL: &str = "vendor/wuj5/wuj5.py";

/// Length of the truncated fingerprints shown for manifests and graphs.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;
