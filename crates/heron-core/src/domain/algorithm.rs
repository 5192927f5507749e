//! The benchmark algorithm set and per-algorithm parameters.

use std::fmt;
use std::str::FromStr;

/// The six algorithms a benchmark run can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Breadth-first search.
    Bfs,
    /// Community detection via label propagation.
    Cdlp,
    /// Local clustering coefficient.
    Lcc,
    /// PageRank.
    Pr,
    /// Single-source shortest paths.
    Sssp,
    /// Weakly connected components.
    Wcc,
}

impl Algorithm {
    /// The canonical lowercase token passed as `--algorithm <name>` to the
    /// runner executable.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Cdlp => "cdlp",
            Algorithm::Lcc => "lcc",
            Algorithm::Pr => "pr",
            Algorithm::Sssp => "sssp",
            Algorithm::Wcc => "wcc",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "cdlp" => Ok(Algorithm::Cdlp),
            "lcc" => Ok(Algorithm::Lcc),
            "pr" => Ok(Algorithm::Pr),
            "sssp" => Ok(Algorithm::Sssp),
            "wcc" => Ok(Algorithm::Wcc),
            other => Err(format!("unknown algorithm: {other}")),
        }
    }
}

/// Algorithm selection plus the extra parameters that algorithm needs, and
/// nothing more. The harness supplies these; the driver only formats them
/// onto the runner's command line. Parameter ranges are not validated here --
/// the external binary rejects bad values with a non-zero exit.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmParameters {
    Bfs,
    Cdlp {
        max_iterations: u64,
    },
    Lcc,
    Pr {
        damping_factor: f32,
        max_iterations: u64,
    },
    Sssp {
        source_vertex: u64,
    },
    Wcc,
}

impl AlgorithmParameters {
    /// The algorithm this parameter set belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            AlgorithmParameters::Bfs => Algorithm::Bfs,
            AlgorithmParameters::Cdlp { .. } => Algorithm::Cdlp,
            AlgorithmParameters::Lcc => Algorithm::Lcc,
            AlgorithmParameters::Pr { .. } => Algorithm::Pr,
            AlgorithmParameters::Sssp { .. } => Algorithm::Sssp,
            AlgorithmParameters::Wcc => Algorithm::Wcc,
        }
    }
}
