//! Waypoint command-line driver
//!
//! Reads a graph description, picks the source vertex and prints the
//! shortest-path table. Undirected graphs additionally get Prim's minimum
//! spanning tree; both engines run concurrently over the same graph.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

mod args;
mod config;
mod input;
mod render;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use waypoint_core::execution::ExecutionTrace;
use waypoint_core::prelude::*;

use crate::args::Args;
use crate::config::{OutputFormat, RunConfig};
use crate::input::parse_input;
use crate::render::Renderer;

const NO_SOURCE_DIRECTED: &str = "Choose the source node & run again!!!";

/// Execution traces of one run, as written by `--trace`
#[derive(Debug, Serialize)]
struct TraceFile<'a> {
    shortest_paths: ExecutionTrace<'a>,
    spanning_tree: Option<ExecutionTrace<'a>>,
}

/// Uniform pick among `vertex_count` vertices; seeded picks are reproducible
fn pick_random_source(vertex_count: usize, seed: Option<u64>) -> NodeId {
    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    NodeId(rng.gen_range(0..vertex_count))
}

/// Source named on the command line, falling back to the input file's
fn explicit_source(
    flag: Option<&str>,
    from_file: Option<NodeId>,
    codec: &LabelCodec,
    graph: &Graph,
) -> Result<Option<NodeId>> {
    let Some(label) = flag else {
        return Ok(from_file);
    };
    let node = codec
        .decode(label)
        .with_context(|| format!("invalid --source {label:?}"))?;
    graph
        .check_node(node)
        .with_context(|| format!("invalid --source {label:?}"))?;
    Ok(Some(node))
}

/// Resolves the run's source and whether it was picked at random
///
/// Directed graphs never get a random source; `None` means the run stops.
fn select_source(
    explicit: Option<NodeId>,
    edge_class: EdgeClass,
    vertex_count: usize,
    seed: Option<u64>,
) -> Option<(NodeId, bool)> {
    match explicit {
        Some(source) => Some((source, false)),
        None if edge_class.is_directed() => None,
        None => Some((pick_random_source(vertex_count, seed), true)),
    }
}

fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = args.log_level() {
        builder.filter_level(level);
    }
    builder.init();
}

fn new_tracer(config: &RunConfig) -> Option<ExecutionTracer> {
    config.trace.as_ref()?;
    Some(match config.trace_capacity {
        Some(capacity) => ExecutionTracer::with_capacity(capacity),
        None => ExecutionTracer::new(),
    })
}

/// Tracers for the shortest-path and spanning tree engines; directed runs
/// have no spanning tree and get no second tracer
fn engine_tracers(
    config: &RunConfig,
    edge_class: EdgeClass,
) -> (Option<ExecutionTracer>, Option<ExecutionTracer>) {
    let spanning = if edge_class.is_directed() {
        None
    } else {
        new_tracer(config)
    };
    (new_tracer(config), spanning)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    config.apply_args(&args);
    debug!("run configuration: {:?}", config);

    let codec = LabelCodec::new(config.labels).context("invalid label configuration")?;
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let parsed = parse_input(&text, &codec)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;
    let graph = parsed.graph;
    let edge_class = parsed.edge_class;
    info!(
        "loaded {} graph with {} vertices and {} edges",
        edge_class,
        graph.vertex_count(),
        graph.edge_count(edge_class)
    );

    let explicit = explicit_source(args.source.as_deref(), parsed.source, &codec, &graph)?;
    let Some((source, random_source)) =
        select_source(explicit, edge_class, graph.vertex_count(), config.seed)
    else {
        println!("{NO_SOURCE_DIRECTED}");
        return Ok(());
    };

    let (mut spt_tracer, mut mst_tracer) = engine_tracers(&config, edge_class);
    let (shortest, spanning) = rayon::join(
        || Dijkstra::new(edge_class).execute_with_tracing(&graph, source, spt_tracer.as_mut()),
        || {
            (!edge_class.is_directed())
                .then(|| Prim.execute_with_tracing(&graph, source, mst_tracer.as_mut()))
                .transpose()
        },
    );
    let shortest = shortest.context("shortest-path engine failed")?;
    let spanning = spanning.context("spanning tree engine failed")?;

    let renderer = Renderer::new(&codec);
    match config.format {
        OutputFormat::Text => {
            print!("{}", renderer.source_line(source, random_source));
            print!("{}", renderer.text(&shortest, spanning.as_ref()));
        }
        OutputFormat::Json => {
            let json = renderer
                .json(&shortest, spanning.as_ref(), random_source)
                .context("failed to serialize report")?;
            println!("{json}");
        }
    }

    if let (Some(path), Some(tracer)) = (&config.trace, &spt_tracer) {
        let trace = TraceFile {
            shortest_paths: tracer.get_trace()?,
            spanning_tree: mst_tracer.as_ref().map(ExecutionTracer::get_trace).transpose()?,
        };
        let json = serde_json::to_string_pretty(&trace).context("failed to serialize trace")?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!("execution trace written to {}", path.display());
    }

    Ok(())
}
