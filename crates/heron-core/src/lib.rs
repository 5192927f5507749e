//! Core library for the heron benchmark platform driver.
//!
//! heron adapts an external graph-database engine to a graph-benchmarking
//! harness. The engine ships three pre-built executables -- a bulk loader, an
//! unloader, and an algorithm runner -- and this crate does the glue work:
//! build their command lines, supervise one subprocess at a time, and scrape
//! a processing-time metric out of the captured log output.
//!
//! # Architecture
//!
//! ```text
//! Harness (or heron-cli)
//!     |
//!     v
//! Platform trait --------- HeronPlatform
//!     |                        |
//!     | load_graph ----> job::GraphLoader ----> process::run_process
//!     | run ----------> job::AlgorithmJob ----> process::run_process
//!     | startup ------> collector::LogSink::open
//!     | finalize -----> collector::collect_processing_time
//! ```
//!
//! The graph algorithms themselves execute entirely inside the external
//! binaries; nothing in this crate computes anything over a graph.

pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod job;
pub mod platform;
pub mod process;

pub use config::PlatformConfig;
pub use domain::{
    Algorithm, AlgorithmParameters, BenchmarkMetric, BenchmarkMetrics, BenchmarkRun,
    FormattedGraph,
};
pub use error::DriverError;
pub use platform::{HeronPlatform, Platform};
