//! The `Platform` trait -- the lifecycle interface a benchmark harness
//! drives.
//!
//! The trait is object-safe so a harness can hold `Box<dyn Platform>` and
//! dispatch lifecycle calls without knowing which engine sits behind it.

use async_trait::async_trait;

use crate::domain::{BenchmarkMetrics, BenchmarkRun, FormattedGraph};
use crate::error::DriverError;

/// Lifecycle contract between the benchmark harness and a platform driver.
///
/// Methods take `&mut self` because the adapter owns per-run state (the open
/// log sink) between `startup` and `finalize`. The harness serializes all
/// calls; nothing here is invoked concurrently.
#[async_trait]
pub trait Platform: Send {
    /// Short identifier for this platform, used in harness reports.
    fn platform_name(&self) -> &str;

    /// Check that the driver is usable at all: required executables exist.
    /// Fails fast with [`DriverError::Setup`] before any graph is touched.
    async fn verify_setup(&mut self) -> Result<(), DriverError>;

    /// Bulk-load a formatted graph into the engine's intermediate storage.
    async fn load_graph(&mut self, graph: &FormattedGraph) -> Result<(), DriverError>;

    /// Remove a previously loaded graph. Symmetric to [`Self::load_graph`];
    /// reachable independently of any specific run.
    async fn delete_graph(&mut self, graph: &FormattedGraph) -> Result<(), DriverError>;

    /// Pre-run hook. No work for this engine.
    async fn prepare(&mut self, run: &BenchmarkRun) -> Result<(), DriverError>;

    /// Open the platform log capture for this run.
    async fn startup(&mut self, run: &BenchmarkRun) -> Result<(), DriverError>;

    /// Execute the run's algorithm via the runner executable.
    async fn run(&mut self, run: &BenchmarkRun) -> Result<(), DriverError>;

    /// Stop log capture and package the processing-time metric.
    async fn finalize(&mut self, run: &BenchmarkRun) -> Result<BenchmarkMetrics, DriverError>;

    /// Post-run cleanup hook. No work for this engine.
    async fn terminate(&mut self, run: &BenchmarkRun) -> Result<(), DriverError>;
}

// Compile-time assertion: Platform must be object-safe.
const _: fn() = || {
    fn assert_object_safe(_: &mut dyn Platform) {}
    let _ = assert_object_safe;
};
