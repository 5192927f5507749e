//! Command construction for the engine's external executables.
//!
//! Each operation (load, unload, run-algorithm) maps to one executable and
//! one ordered argument list, built fresh per invocation and discarded after
//! the subprocess exits.

pub mod loader;
pub mod runner;

use std::path::{Path, PathBuf};

pub use loader::GraphLoader;
pub use runner::{AlgorithmJob, algorithm_args};

/// Absolute path of the intermediate storage directory for a loaded graph:
/// `./intermediate/<graph-name>`, resolved against the working directory at
/// call time. Both the unloader and the algorithm runner consume it.
pub fn loaded_path(graph_name: &str) -> PathBuf {
    let relative = Path::new("intermediate").join(graph_name);
    std::path::absolute(&relative).unwrap_or(relative)
}
