use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use faster_paths::{
    graphs::{edge_list::read_edge_list, hash_graph::HashGraph, Graph},
    search::{
        collections::distance_queue::QueueKind,
        dijkstra::{shortest_path_with_queue, shortest_paths_with_queue},
    },
    utility::init_tracing,
};
use tracing::info;

/// Runs a single source or single pair query on a graph.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph as an edge list, or a `.bincode` snapshot
    #[arg(short, long)]
    graph: PathBuf,
    /// Source vertex
    #[arg(short, long)]
    source: String,
    /// Target vertex. Without a target all distances from source are printed.
    #[arg(short, long)]
    target: Option<String>,
    /// Priority queue used by the search
    #[arg(short, long, value_enum, default_value_t = QueueKind::Indexed)]
    queue: QueueKind,
    /// Write the result as json to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Also save the parsed graph as a bincode snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let is_snapshot = args
        .graph
        .extension()
        .is_some_and(|extension| extension == "bincode");
    let graph: HashGraph<String> = if is_snapshot {
        HashGraph::read_bincode(&args.graph)
    } else {
        read_edge_list(&args.graph)
    }
    .with_context(|| format!("reading graph {}", args.graph.display()))?;

    if let Some(snapshot) = &args.snapshot {
        graph.write_bincode(snapshot)?;
    }

    if !graph.contains_vertex(&args.source) {
        info!(source = %args.source, "source is not part of the graph");
    }

    let writer: Box<dyn Write> = match &args.out {
        Some(out) => Box::new(
            File::create(out).with_context(|| format!("creating {}", out.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut writer = BufWriter::new(writer);

    let mut queue = args.queue.new_queue::<String>();
    match &args.target {
        Some(target) => {
            let path = shortest_path_with_queue(&graph, &mut *queue, &args.source, target);
            match &path {
                Some(path) => info!(
                    distance = path.distance,
                    edges = path.number_of_edges(),
                    "found path"
                ),
                None => info!(target = %target, "target is not reachable"),
            }
            serde_json::to_writer_pretty(&mut writer, &path)?;
        }
        None => {
            let data = shortest_paths_with_queue(&graph, &mut *queue, &args.source);
            info!(reached = data.number_of_reached(), "computed distances");
            let distances: BTreeMap<_, _> = data.distances().iter().collect();
            serde_json::to_writer_pretty(&mut writer, &distances)?;
        }
    }
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
