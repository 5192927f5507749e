//! Bulk load and unload of a formatted graph via the engine's loader and
//! unloader executables.

use tracing::info;

use crate::collector::LogSink;
use crate::config::PlatformConfig;
use crate::domain::FormattedGraph;
use crate::error::DriverError;
use crate::process::run_process;

use super::loaded_path;

/// Builds and executes loader/unloader invocations for one graph.
#[derive(Debug)]
pub struct GraphLoader<'a> {
    graph: &'a FormattedGraph,
    config: &'a PlatformConfig,
}

impl<'a> GraphLoader<'a> {
    pub fn new(graph: &'a FormattedGraph, config: &'a PlatformConfig) -> Self {
        Self { graph, config }
    }

    /// The exact argument list for the loader executable.
    pub fn load_args(&self) -> Vec<String> {
        vec![
            "--graph-name".to_string(),
            self.graph.name.clone(),
            "--input-vertex-path".to_string(),
            self.graph.vertex_path.display().to_string(),
            "--input-edge-path".to_string(),
            self.graph.edge_path.display().to_string(),
            "--output-path".to_string(),
            loaded_path(&self.graph.name).display().to_string(),
            "--directed".to_string(),
            bool_token(self.graph.directed),
            "--weighted".to_string(),
            bool_token(self.graph.weighted),
        ]
    }

    /// The exact argument list for the unloader executable.
    pub fn unload_args(&self) -> Vec<String> {
        vec![
            "--graph-name".to_string(),
            self.graph.name.clone(),
            "--output-path".to_string(),
            loaded_path(&self.graph.name).display().to_string(),
        ]
    }

    /// Invoke the loader and return its exit code.
    pub async fn load(&self, sink: Option<&mut LogSink>) -> Result<i32, DriverError> {
        let args = self.load_args();
        info!(
            command = %format_command(&self.config.executables.loader.display().to_string(), &args),
            "executing graph loader"
        );
        run_process(
            "loader",
            &self.config.executables.loader,
            &args,
            &self.config.engine,
            sink,
        )
        .await
    }

    /// Invoke the unloader and return its exit code.
    pub async fn unload(&self, sink: Option<&mut LogSink>) -> Result<i32, DriverError> {
        let args = self.unload_args();
        info!(
            command = %format_command(&self.config.executables.unloader.display().to_string(), &args),
            "executing graph unloader"
        );
        run_process(
            "unloader",
            &self.config.executables.unloader,
            &args,
            &self.config.engine,
            sink,
        )
        .await
    }
}

/// The loader CLI expects literal `true`/`false` tokens.
fn bool_token(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

/// Render a command line for logging.
pub(crate) fn format_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    parts.extend(args.iter().cloned());
    parts.join(" ")
}
