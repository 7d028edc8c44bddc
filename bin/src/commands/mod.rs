//! CLI command implementations.

use candlewick_lib::DEFAULT_INPUT_DIR;
use std::path::PathBuf;

pub(crate) mod batches;
pub(crate) mod export;
pub(crate) mod run;

/// Falls back to a legacy environment variable, then to `default`.
pub(crate) fn resolve_path(arg: Option<PathBuf>, legacy_var: &str, default: &str) -> PathBuf {
    arg.or_else(|| std::env::var_os(legacy_var).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Resolves the tick directory from `--input-dir`, `DECOMPRESSED_FOLDER`, or the default.
pub(crate) fn input_dir(arg: Option<PathBuf>) -> PathBuf {
    resolve_path(arg, "DECOMPRESSED_FOLDER", DEFAULT_INPUT_DIR)
}
