use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use birp::decentralized::{check_decentralizability, min_g1};
use birp::pareto::Solution;
use birp::routing_table::{make_routing_table, select_solution, SelectionStrategy};
use birp::search::bod;
use birp::Graph;

#[derive(Debug, Parser)]
#[command(name = "bod_demo")]
#[command(about = "Compute bi-objective Pareto-optimal paths between two nodes")]
struct Args {
    map_file_path: PathBuf,
    start_node: u32,
    end_node: u32,
    #[arg(long)]
    verbose: bool,
    #[arg(long)]
    json: Option<PathBuf>,
    #[arg(long)]
    cap1: Option<f64>,
    #[arg(long)]
    cap2: Option<f64>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .compact()
        .init();
}

fn main() -> Result<ExitCode> {
    init_logging();
    let args = Args::parse();

    let graph = Graph::load_from_file(&args.map_file_path);
    let solutions = bod(&graph, args.start_node)?;

    let target_set = match solutions.get(&args.end_node) {
        Some(set) if !set.is_empty() => set,
        _ => {
            eprintln!(
                "no path from {} to {}",
                args.start_node, args.end_node
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    println!(
        "Pareto set for {} -> {}: {:?}",
        args.start_node,
        args.end_node,
        target_set.values()
    );

    if args.verbose {
        match check_decentralizability(&graph, args.start_node, args.end_node, bod, min_g1) {
            Ok(walk) => println!("decentralized walk: {:?}", walk),
            Err(err) => println!("decentralizability check failed: {err}"),
        }
    }

    if let (Some(c1), Some(c2)) = (args.cap1, args.cap2) {
        let table = make_routing_table(&graph, args.start_node, c1, c2)?;
        if let Some(json_path) = &args.json {
            let mut destinations = serde_json::Map::new();
            for (target, entry) in &table.entries {
                destinations.insert(
                    target.to_string(),
                    json!({
                        "as_source": entry.as_source,
                        "uniform_hop": entry.uniform_hop,
                        "by_sender": entry.by_sender,
                    }),
                );
            }
            let report = json!({
                "source": args.start_node,
                "cap1": c1,
                "cap2": c2,
                "destinations": destinations,
            });
            std::fs::write(json_path, serde_json::to_string_pretty(&report)?)?;
        } else {
            for (target, entry) in &table.entries {
                println!(
                    "  {} -> as_source={:?} uniform={:?} by_sender={:?}",
                    target, entry.as_source, entry.uniform_hop, entry.by_sender
                );
            }
        }
    }

    let representative = select_solution(target_set, 0.0, 0.0, SelectionStrategy::MinG1);
    if let Some(Solution::BiObj(chosen)) = representative {
        println!(
            "representative solution: g1={} g2={}",
            chosen.objective.g1, chosen.objective.g2
        );
    }

    Ok(ExitCode::SUCCESS)
}
