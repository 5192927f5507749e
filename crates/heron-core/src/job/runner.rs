//! Algorithm runner invocations.
//!
//! One parameterized builder replaces a class hierarchy: each algorithm is a
//! variant of [`AlgorithmParameters`], and [`algorithm_args`] maps a variant
//! to its runner flags in a fixed canonical order.

use std::path::PathBuf;

use tracing::info;

use crate::collector::LogSink;
use crate::config::PlatformConfig;
use crate::domain::{AlgorithmParameters, BenchmarkRun};
use crate::error::DriverError;
use crate::process::run_process;

use super::loaded_path;
use super::loader::format_command;

/// The algorithm-selection flags for the runner executable.
///
/// The first two elements are always `["--algorithm", <name>]`; the rest are
/// the variant's own parameters in declaration order. Numbers render in
/// their canonical form: integers without decimal points, floats with
/// default precision.
pub fn algorithm_args(parameters: &AlgorithmParameters) -> Vec<String> {
    let mut args = vec![
        "--algorithm".to_string(),
        parameters.algorithm().name().to_string(),
    ];

    match parameters {
        AlgorithmParameters::Bfs | AlgorithmParameters::Lcc | AlgorithmParameters::Wcc => {}
        AlgorithmParameters::Cdlp { max_iterations } => {
            args.push("--max-iteration".to_string());
            args.push(max_iterations.to_string());
        }
        AlgorithmParameters::Pr {
            damping_factor,
            max_iterations,
        } => {
            args.push("--damping-factor".to_string());
            args.push(damping_factor.to_string());
            args.push("--max-iteration".to_string());
            args.push(max_iterations.to_string());
        }
        AlgorithmParameters::Sssp { source_vertex } => {
            args.push("--source-vertex".to_string());
            args.push(source_vertex.to_string());
        }
    }

    args
}

/// One runner invocation, bound to a benchmark run and the loaded graph.
#[derive(Debug)]
pub struct AlgorithmJob<'a> {
    run: &'a BenchmarkRun,
    config: &'a PlatformConfig,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl<'a> AlgorithmJob<'a> {
    /// Build a job for `run`. The input path is the graph's intermediate
    /// storage; the output path is the run-specific directory under the
    /// harness-assigned output dir.
    pub fn new(run: &'a BenchmarkRun, config: &'a PlatformConfig) -> Self {
        let input_path = loaded_path(&run.graph.name);
        let relative_output = run.output_dir.join(&run.id);
        let output_path = std::path::absolute(&relative_output).unwrap_or(relative_output);
        Self {
            run,
            config,
            input_path,
            output_path,
        }
    }

    /// The full argument list for the runner executable: algorithm flags
    /// first, then the input and output paths.
    pub fn args(&self) -> Vec<String> {
        let mut args = algorithm_args(&self.run.parameters);
        args.push("--input-path".to_string());
        args.push(self.input_path.display().to_string());
        args.push("--output-path".to_string());
        args.push(self.output_path.display().to_string());
        args
    }

    /// Invoke the runner and return its exit code.
    pub async fn execute(&self, sink: Option<&mut LogSink>) -> Result<i32, DriverError> {
        let args = self.args();
        info!(
            algorithm = %self.run.algorithm(),
            graph = %self.run.graph.name,
            command = %format_command(&self.config.executables.runner.display().to_string(), &args),
            "executing algorithm runner"
        );
        run_process(
            "runner",
            &self.config.executables.runner,
            &args,
            &self.config.engine,
            sink,
        )
        .await
    }
}
