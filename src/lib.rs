//! Bi-objective shortest-path search and decentralized routing-table synthesis.
//!
//! Given a directed multigraph whose edges carry two independent non-negative costs, this crate
//! computes, per destination, the Pareto-optimal set of paths from a source (`search::bod`,
//! `search::boa`), and uses bounded variants of that search (`search::stages`) to build per-node
//! next-hop tables (`routing_table`) that stay consistent when every node plans independently
//! (`decentralized`).

pub mod decentralized;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod pareto;
pub mod routing_table;
pub mod search;
pub mod state;

pub use error::Error;
pub use graph::Graph;
pub use pareto::{BiObjSolution, Objective, ParetoSet, Solution, SolutionClass};
pub use routing_table::{make_routing_table, NextHopEntry, RoutingTable, SelectionStrategy};
pub use search::{bod, boa, bod_limited, bod_stage_1, bod_stage_2, bod_stage_3};
pub use state::{Link, State};
