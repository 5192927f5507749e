//! Flag groups shared by the graph- and run-oriented subcommands, and their
//! mapping onto the core domain types.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use heron_core::{Algorithm, AlgorithmParameters, FormattedGraph};

/// Flags describing a formatted graph dataset.
#[derive(Debug, Args)]
pub struct GraphArgs {
    /// Graph name; keys the intermediate storage directory
    #[arg(long)]
    pub name: String,
    /// Path to the vertex file
    #[arg(long)]
    pub vertex_path: PathBuf,
    /// Path to the edge file
    #[arg(long)]
    pub edge_path: PathBuf,
    /// Whether edges are directed
    #[arg(long)]
    pub directed: bool,
    /// Whether edges carry weights
    #[arg(long)]
    pub weighted: bool,
}

impl GraphArgs {
    pub fn into_graph(self) -> FormattedGraph {
        FormattedGraph {
            name: self.name,
            vertex_path: self.vertex_path,
            edge_path: self.edge_path,
            directed: self.directed,
            weighted: self.weighted,
        }
    }
}

/// Flags selecting the algorithm and its parameters.
#[derive(Debug, Args)]
pub struct AlgorithmArgs {
    /// Algorithm to run: bfs, cdlp, lcc, pr, sssp, or wcc
    #[arg(long)]
    pub algorithm: Algorithm,
    /// Damping factor (pr only)
    #[arg(long)]
    pub damping_factor: Option<f32>,
    /// Maximum iteration count (pr and cdlp only)
    #[arg(long)]
    pub max_iteration: Option<u64>,
    /// Source vertex id (sssp only)
    #[arg(long)]
    pub source_vertex: Option<u64>,
}

impl AlgorithmArgs {
    /// Map the flag set onto an [`AlgorithmParameters`] variant.
    ///
    /// Missing or irrelevant parameter flags are rejected here, before any
    /// subprocess is spawned.
    pub fn resolve(&self) -> Result<AlgorithmParameters> {
        let parameters = match self.algorithm {
            Algorithm::Bfs => AlgorithmParameters::Bfs,
            Algorithm::Lcc => AlgorithmParameters::Lcc,
            Algorithm::Wcc => AlgorithmParameters::Wcc,
            Algorithm::Cdlp => {
                let Some(max_iterations) = self.max_iteration else {
                    bail!("cdlp requires --max-iteration");
                };
                AlgorithmParameters::Cdlp { max_iterations }
            }
            Algorithm::Pr => {
                let Some(damping_factor) = self.damping_factor else {
                    bail!("pr requires --damping-factor");
                };
                let Some(max_iterations) = self.max_iteration else {
                    bail!("pr requires --max-iteration");
                };
                AlgorithmParameters::Pr {
                    damping_factor,
                    max_iterations,
                }
            }
            Algorithm::Sssp => {
                let Some(source_vertex) = self.source_vertex else {
                    bail!("sssp requires --source-vertex");
                };
                AlgorithmParameters::Sssp { source_vertex }
            }
        };

        self.reject_irrelevant_flags(&parameters)?;
        Ok(parameters)
    }

    fn reject_irrelevant_flags(&self, parameters: &AlgorithmParameters) -> Result<()> {
        let algorithm = parameters.algorithm();
        if self.damping_factor.is_some() && algorithm != Algorithm::Pr {
            bail!("--damping-factor only applies to pr");
        }
        if self.max_iteration.is_some() && !matches!(algorithm, Algorithm::Pr | Algorithm::Cdlp) {
            bail!("--max-iteration only applies to pr and cdlp");
        }
        if self.source_vertex.is_some() && algorithm != Algorithm::Sssp {
            bail!("--source-vertex only applies to sssp");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(algorithm: Algorithm) -> AlgorithmArgs {
        AlgorithmArgs {
            algorithm,
            damping_factor: None,
            max_iteration: None,
            source_vertex: None,
        }
    }

    #[test]
    fn parameterless_algorithms_resolve_without_flags() {
        assert_eq!(
            args(Algorithm::Bfs).resolve().unwrap(),
            AlgorithmParameters::Bfs
        );
        assert_eq!(
            args(Algorithm::Lcc).resolve().unwrap(),
            AlgorithmParameters::Lcc
        );
        assert_eq!(
            args(Algorithm::Wcc).resolve().unwrap(),
            AlgorithmParameters::Wcc
        );
    }

    #[test]
    fn pr_resolves_with_both_parameters() {
        let mut a = args(Algorithm::Pr);
        a.damping_factor = Some(0.85);
        a.max_iteration = Some(10);
        assert_eq!(
            a.resolve().unwrap(),
            AlgorithmParameters::Pr {
                damping_factor: 0.85,
                max_iterations: 10
            }
        );
    }

    #[test]
    fn pr_missing_damping_factor_is_rejected() {
        let mut a = args(Algorithm::Pr);
        a.max_iteration = Some(10);
        let err = a.resolve().unwrap_err().to_string();
        assert!(err.contains("--damping-factor"), "unexpected error: {err}");
    }

    #[test]
    fn cdlp_requires_max_iteration() {
        let err = args(Algorithm::Cdlp).resolve().unwrap_err().to_string();
        assert!(err.contains("--max-iteration"), "unexpected error: {err}");
    }

    #[test]
    fn sssp_requires_source_vertex() {
        let err = args(Algorithm::Sssp).resolve().unwrap_err().to_string();
        assert!(err.contains("--source-vertex"), "unexpected error: {err}");
    }

    #[test]
    fn irrelevant_flags_are_rejected() {
        let mut a = args(Algorithm::Wcc);
        a.source_vertex = Some(1);
        let err = a.resolve().unwrap_err().to_string();
        assert!(err.contains("sssp"), "unexpected error: {err}");

        let mut a = args(Algorithm::Bfs);
        a.damping_factor = Some(0.5);
        let err = a.resolve().unwrap_err().to_string();
        assert!(err.contains("pr"), "unexpected error: {err}");
    }
}
