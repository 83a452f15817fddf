use std::time::{Duration, Instant};

use clap::Parser;
use faster_paths::{
    graphs::{
        grid::{grid_graph, Position},
        Graph,
    },
    search::{
        collections::distance_queue::QueueKind,
        dijkstra::{shortest_path, shortest_path_with_queue},
        path::{ShortestPathRequest, ShortestPathTestCase},
    },
    utility::{get_progressbar, init_tracing, validate_path},
};
use indicatif::{ParallelProgressIterator, ProgressIterator};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

/// Compares the queue implementations on a random grid where entering a cell
/// costs its value.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of grid rows
    #[arg(short, long, default_value_t = 200)]
    rows: usize,
    /// Number of grid columns
    #[arg(short, long, default_value_t = 200)]
    columns: usize,
    /// Largest cost of a single cell
    #[arg(short, long, default_value_t = 9)]
    max_weight: u32,
    /// Number of benchmarks to be run.
    #[arg(short, long, default_value_t = 100)]
    number_of_benchmarks: u32,
    /// Seed for the random grid and requests
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;
    anyhow::ensure!(
        args.rows > 0 && args.columns > 0 && args.max_weight > 0,
        "grid dimensions and max weight must be positive"
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let cells: Vec<Vec<u32>> = (0..args.rows)
        .map(|_| {
            (0..args.columns)
                .map(|_| rng.gen_range(1..=args.max_weight))
                .collect()
        })
        .collect();
    let graph = grid_graph(&cells, |_, to| Some(*to));
    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "built grid graph"
    );

    let requests: Vec<_> = (0..args.number_of_benchmarks)
        .map(|_| {
            let source = Position::new(rng.gen_range(0..args.rows), rng.gen_range(0..args.columns));
            let target = Position::new(rng.gen_range(0..args.rows), rng.gen_range(0..args.columns));
            ShortestPathRequest::new(source, target)
        })
        .collect();

    let test_cases: Vec<ShortestPathTestCase<Position>> = requests
        .into_par_iter()
        .progress_count(args.number_of_benchmarks as u64)
        .map(|request| {
            let distance = shortest_path(&graph, &request.source, &request.target)
                .map(|path| path.distance);
            ShortestPathTestCase { request, distance }
        })
        .collect();

    for kind in QueueKind::ALL {
        let mut queue = kind.new_queue::<Position>();
        let mut durations = Vec::new();

        let bar = get_progressbar(&format!("{:?}", kind), test_cases.len() as u64);
        for test_case in test_cases.iter().progress_with(bar) {
            let start = Instant::now();
            let path = shortest_path_with_queue(
                &graph,
                &mut *queue,
                &test_case.request.source,
                &test_case.request.target,
            );
            durations.push(start.elapsed());

            if let Err(err) = validate_path(&graph, test_case, &path) {
                anyhow::bail!("{:?} queue returned a wrong path: {}", kind, err);
            }
        }

        println!(
            "{:?}: average duration {:?} over {} queries",
            kind,
            durations.iter().sum::<Duration>() / durations.len().max(1) as u32,
            durations.len()
        );
    }

    Ok(())
}
