//! Harness-facing domain types.
//!
//! These mirror the collaborator interfaces the benchmark harness hands to a
//! platform driver: the graph dataset to load, the run to execute, and the
//! metrics to hand back. All of them are plain data -- immutable for the
//! duration of one benchmark run.

pub mod algorithm;

use std::path::PathBuf;

pub use algorithm::{Algorithm, AlgorithmParameters};

/// A graph dataset already converted into the file layout the engine's
/// loader expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedGraph {
    /// Graph name, used to key the intermediate storage directory.
    pub name: String,
    /// Path to the vertex file.
    pub vertex_path: PathBuf,
    /// Path to the edge file.
    pub edge_path: PathBuf,
    /// Whether edges are directed.
    pub directed: bool,
    /// Whether edges carry weights.
    pub weighted: bool,
}

/// One harness-issued request: a specific algorithm, with specific
/// parameters, on a specific loaded graph.
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    /// Unique identifier for this run; names the per-run output directory.
    pub id: String,
    /// The algorithm variant and its parameters.
    pub parameters: AlgorithmParameters,
    /// The graph this run executes against.
    pub graph: FormattedGraph,
    /// Directory the runner writes algorithm output under.
    pub output_dir: PathBuf,
    /// Directory the harness assigned for this run's logs.
    pub log_dir: PathBuf,
}

impl BenchmarkRun {
    /// The algorithm this run executes.
    pub fn algorithm(&self) -> Algorithm {
        self.parameters.algorithm()
    }
}

/// A single measured value with its unit.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkMetric {
    pub value: f64,
    pub unit: &'static str,
}

/// The metrics a platform driver reports back to the harness. Processing
/// time -- the engine's own measure of algorithm execution -- is the sole
/// metric this driver extracts.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkMetrics {
    pub processing_time: BenchmarkMetric,
}

impl BenchmarkMetrics {
    /// Wrap a processing time measured in milliseconds.
    pub fn from_processing_time_ms(ms: f64) -> Self {
        Self {
            processing_time: BenchmarkMetric {
                value: ms,
                unit: "ms",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_reports_algorithm_of_its_parameters() {
        let run = BenchmarkRun {
            id: "r1".to_string(),
            parameters: AlgorithmParameters::Sssp { source_vertex: 7 },
            graph: FormattedGraph {
                name: "g".to_string(),
                vertex_path: PathBuf::from("/data/g.v"),
                edge_path: PathBuf::from("/data/g.e"),
                directed: true,
                weighted: true,
            },
            output_dir: PathBuf::from("/out"),
            log_dir: PathBuf::from("/log"),
        };
        assert_eq!(run.algorithm(), Algorithm::Sssp);
    }

    #[test]
    fn metrics_carry_unit() {
        let metrics = BenchmarkMetrics::from_processing_time_ms(1234.5);
        assert_eq!(metrics.processing_time.value, 1234.5);
        assert_eq!(metrics.processing_time.unit, "ms");
    }
}
