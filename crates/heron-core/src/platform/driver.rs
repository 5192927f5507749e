//! The engine-backed [`Platform`] implementation.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::collector::{self, LogSink, RUNNER_LOG_FILE};
use crate::config::PlatformConfig;
use crate::domain::{BenchmarkMetrics, BenchmarkRun, FormattedGraph};
use crate::error::DriverError;
use crate::job::{AlgorithmJob, GraphLoader};

use super::trait_def::Platform;

/// Platform identifier reported to the harness.
pub const PLATFORM_NAME: &str = "heron";

/// Adapter that satisfies the harness lifecycle by delegating to the
/// engine's loader, unloader, and runner executables.
#[derive(Debug)]
pub struct HeronPlatform {
    config: PlatformConfig,
    /// Open between `startup` and `finalize`; all subprocess output of the
    /// run phase is appended here.
    sink: Option<LogSink>,
}

impl HeronPlatform {
    pub fn new(config: PlatformConfig) -> Self {
        Self { config, sink: None }
    }

    fn check_executable(path: &Path, role: &str) -> Result<(), DriverError> {
        if !path.is_file() {
            return Err(DriverError::Setup(format!(
                "{role} executable not found at {}",
                path.display()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for HeronPlatform {
    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    async fn verify_setup(&mut self) -> Result<(), DriverError> {
        Self::check_executable(&self.config.executables.loader, "loader")?;
        Self::check_executable(&self.config.executables.unloader, "unloader")?;
        Self::check_executable(&self.config.executables.runner, "runner")?;
        Ok(())
    }

    async fn load_graph(&mut self, graph: &FormattedGraph) -> Result<(), DriverError> {
        info!(graph = %graph.name, "loading graph");
        let loader = GraphLoader::new(graph, &self.config);
        let code = loader.load(self.sink.as_mut()).await?;
        if code != 0 {
            return Err(DriverError::Execution {
                phase: "loader",
                code,
            });
        }
        info!(graph = %graph.name, "loaded graph");
        Ok(())
    }

    async fn delete_graph(&mut self, graph: &FormattedGraph) -> Result<(), DriverError> {
        info!(graph = %graph.name, "unloading graph");
        let loader = GraphLoader::new(graph, &self.config);
        let code = loader.unload(self.sink.as_mut()).await?;
        if code != 0 {
            return Err(DriverError::Execution {
                phase: "unloader",
                code,
            });
        }
        info!(graph = %graph.name, "unloaded graph");
        Ok(())
    }

    async fn prepare(&mut self, _run: &BenchmarkRun) -> Result<(), DriverError> {
        Ok(())
    }

    async fn startup(&mut self, run: &BenchmarkRun) -> Result<(), DriverError> {
        let log_path = run.log_dir.join("platform").join(RUNNER_LOG_FILE);
        self.sink = Some(LogSink::open(&log_path)?);
        Ok(())
    }

    async fn run(&mut self, run: &BenchmarkRun) -> Result<(), DriverError> {
        info!(
            algorithm = %run.algorithm(),
            graph = %run.graph.name,
            "executing benchmark"
        );
        let job = AlgorithmJob::new(run, &self.config);
        let code = job.execute(self.sink.as_mut()).await?;
        if code != 0 {
            return Err(DriverError::Execution {
                phase: "runner",
                code,
            });
        }
        info!(
            algorithm = %run.algorithm(),
            graph = %run.graph.name,
            "executed benchmark"
        );
        Ok(())
    }

    async fn finalize(&mut self, run: &BenchmarkRun) -> Result<BenchmarkMetrics, DriverError> {
        if let Some(sink) = self.sink.take() {
            sink.close()?;
        }
        let processing_time_ms = collector::collect_processing_time(&run.log_dir)?;
        Ok(BenchmarkMetrics::from_processing_time_ms(processing_time_ms))
    }

    async fn terminate(&mut self, _run: &BenchmarkRun) -> Result<(), DriverError> {
        Ok(())
    }
}
