mod args;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use heron_core::config::{self, EngineSection, ExecutablesSection};
use heron_core::{HeronPlatform, Platform, PlatformConfig};

use args::{AlgorithmArgs, GraphArgs};

#[derive(Parser)]
#[command(name = "heron", about = "Benchmark platform driver for external graph engines")]
struct Cli {
    /// Config file path (overrides HERON_CONFIG env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Check that the configured engine executables exist
    Verify,
    /// Bulk-load a formatted graph into the engine
    Load {
        #[command(flatten)]
        graph: GraphArgs,
    },
    /// Remove a previously loaded graph
    Unload {
        #[command(flatten)]
        graph: GraphArgs,
    },
    /// Execute one benchmark run and print its processing time
    Bench {
        #[command(flatten)]
        graph: GraphArgs,
        #[command(flatten)]
        algorithm: AlgorithmArgs,
        /// Run identifier; defaults to <algorithm>-<random suffix>
        #[arg(long)]
        run_id: Option<String>,
        /// Directory the runner writes algorithm output under
        #[arg(long, default_value = "bench/output")]
        output_dir: PathBuf,
        /// Directory for this run's captured logs
        #[arg(long, default_value = "bench/log")]
        log_dir: PathBuf,
    },
}

/// Write a starter config the operator fills in with real paths.
fn cmd_init(config_path: Option<&std::path::Path>, force: bool) -> Result<()> {
    let path = config::resolve_config_path(config_path);

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let starter = PlatformConfig {
        executables: ExecutablesSection {
            loader: PathBuf::from("/opt/engine/bin/loader"),
            unloader: PathBuf::from("/opt/engine/bin/unloader"),
            runner: PathBuf::from("/opt/engine/bin/runner"),
        },
        engine: EngineSection {
            address: "localhost:9080".to_string(),
        },
    };
    starter.save_to(&path)?;

    println!("Config written to {}", path.display());
    println!("Edit the executable paths to match your engine installation.");
    Ok(())
}

async fn cmd_verify(platform: &mut HeronPlatform) -> Result<()> {
    platform.verify_setup().await.context("setup check failed")?;
    println!("Setup OK: all engine executables found.");
    Ok(())
}

async fn cmd_load(platform: &mut HeronPlatform, graph: GraphArgs) -> Result<()> {
    let graph = graph.into_graph();
    platform
        .load_graph(&graph)
        .await
        .with_context(|| format!("failed to load graph {}", graph.name))?;
    println!("Graph {} loaded.", graph.name);
    Ok(())
}

async fn cmd_unload(platform: &mut HeronPlatform, graph: GraphArgs) -> Result<()> {
    let graph = graph.into_graph();
    platform
        .delete_graph(&graph)
        .await
        .with_context(|| format!("failed to unload graph {}", graph.name))?;
    println!("Graph {} unloaded.", graph.name);
    Ok(())
}

async fn cmd_bench(
    platform: &mut HeronPlatform,
    graph: GraphArgs,
    algorithm: AlgorithmArgs,
    run_id: Option<String>,
    output_dir: PathBuf,
    log_dir: PathBuf,
) -> Result<()> {
    let parameters = algorithm.resolve()?;
    let id = run_id.unwrap_or_else(|| {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{}-{}", parameters.algorithm(), &suffix[..8])
    });

    let run = heron_core::BenchmarkRun {
        id: id.clone(),
        parameters,
        graph: graph.into_graph(),
        output_dir,
        log_dir,
    };

    platform.prepare(&run).await.context("prepare failed")?;
    platform.startup(&run).await.context("startup failed")?;
    platform
        .run(&run)
        .await
        .with_context(|| format!("benchmark run {id} failed"))?;
    let metrics = platform.finalize(&run).await.context("finalize failed")?;
    platform.terminate(&run).await.context("terminate failed")?;

    println!(
        "Run {id}: processing time {} {}",
        metrics.processing_time.value, metrics.processing_time.unit
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Init { force } = &cli.command {
        return cmd_init(cli.config.as_deref(), *force);
    }

    let config = PlatformConfig::load(cli.config.as_deref())
        .context("could not load platform config; run `heron init` to create one")?;
    let mut platform = HeronPlatform::new(config);

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Verify => cmd_verify(&mut platform).await?,
        Commands::Load { graph } => cmd_load(&mut platform, graph).await?,
        Commands::Unload { graph } => cmd_unload(&mut platform, graph).await?,
        Commands::Bench {
            graph,
            algorithm,
            run_id,
            output_dir,
            log_dir,
        } => cmd_bench(&mut platform, graph, algorithm, run_id, output_dir, log_dir).await?,
    }

    Ok(())
}
