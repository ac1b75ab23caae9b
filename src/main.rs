use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use graph_closeness::centrality::epsilon::DEFAULT_EPSILON;
use graph_closeness::data::{self, parquet::EdgeColumns};
use graph_closeness::{
    resolve_vertices, storage, ClosenessConfig, ClosenessEstimator, NeighborMode,
};

#[derive(Parser, Debug)]
#[clap(
    name = "graph-closeness",
    about = "Closeness centrality for edge-list graphs (text or Parquet)"
)]
struct Cli {
    /// Path to input edge list (.parquet, otherwise whitespace/comma separated text)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "closeness_results")]
    output_dir: String,

    /// Treat edges as directed
    #[clap(long)]
    directed: bool,

    /// Paths to measure in directed graphs: out, in or all
    #[clap(long, default_value = "out")]
    mode: NeighborMode,

    /// Only consider paths up to this length (exact closeness when omitted)
    #[clap(long)]
    cutoff: Option<f64>,

    /// Use edge weights as path lengths
    #[clap(long)]
    weighted: bool,

    /// Report 1 / distance sum instead of (n - 1) / distance sum
    #[clap(long)]
    unnormalized: bool,

    /// Tolerance for comparing weighted path lengths
    #[clap(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Comma separated vertex ids to score (all vertices when omitted)
    #[clap(long, value_delimiter = ',')]
    vertices: Vec<String>,

    /// Parquet column holding edge sources
    #[clap(long, default_value = "source")]
    source_column: String,

    /// Parquet column holding edge targets
    #[clap(long, default_value = "target")]
    target_column: String,

    /// Parquet column holding edge weights
    #[clap(long, default_value = "weight")]
    weight_column: String,

    /// Process source vertices in parallel
    #[clap(long)]
    parallel: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    if args.parallel {
        log::info!("Using {} worker threads", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    // Cancel between sources on Ctrl-C
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::Relaxed);
    })?;

    log::info!("Starting closeness analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load data
    let columns = EdgeColumns {
        source: args.source_column.clone(),
        target: args.target_column.clone(),
        weight: args.weighted.then(|| args.weight_column.clone()),
    };
    let loaded = data::load_graph(&args.input, args.directed, &columns)?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        loaded.graph.node_count,
        loaded.graph.edge_count()
    );

    let weights = if args.weighted {
        let weights = loaded
            .weights
            .as_deref()
            .ok_or_else(|| anyhow!("--weighted was given but {} has no edge weights", args.input))?;
        Some(weights)
    } else {
        None
    };

    // 2. Select vertices
    let vertices = resolve_vertices(&loaded.graph, &args.vertices[..])?;

    // 3. Compute closeness
    let config = ClosenessConfig::new(args.mode, args.cutoff, !args.unnormalized)
        .with_epsilon(args.epsilon)
        .with_parallel(args.parallel);

    let mut last_logged = f64::NEG_INFINITY;
    let mut progress = |percent: f64| {
        if percent >= last_logged + 10.0 || percent >= 100.0 {
            log::info!("Closeness: {:.0}%", percent);
            last_logged = percent;
        }
    };

    let report = ClosenessEstimator::new(&loaded.graph, config)
        .weights(weights)
        .progress(&mut progress)
        .interrupt(&*interrupted)
        .run(&vertices)?;

    if !report.warnings.is_empty() {
        log::info!("{} warning(s) recorded in summary.json", report.warnings.len());
    }

    // 4. Save results
    storage::save_results(&report, &vertices, &loaded.graph, &config, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
