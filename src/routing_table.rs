use std::collections::BTreeMap;

use crate::error::Error;
use crate::graph::Graph;
use crate::pareto::{ParetoSet, Solution};
use crate::search::stages::{bod_stage_1, bod_stage_2, bod_stage_3};

/// How a representative solution is picked out of a capped Pareto set (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Filter to solutions within either cap, sort by distance to `y = x`, pick the middle one.
    BudgetedMiddle,
    MinG1,
    MinG2,
}

/// Squared distance from `(g1, g2)` to the line `y = x` (`a=1, b=0, c=0` in `ax+by+c=0` form,
/// i.e. `x - y = 0`), matching `modeling_routing.py::distance_to_line`. Only used for ordering,
/// so the square root is skipped.
fn distance_to_line(g1: f64, g2: f64) -> f64 {
    let d = g1 - g2;
    (d * d) / 2.0
}

/// Picks one representative `Solution` from `set` under caps `(c1, c2)`, per `strategy`.
/// Grounded on `modeling_routing.py::select_solution_from_pareto_set` and
/// `greedy_routing.py`'s `_min_g1`/`_min_g2` variants (reimplemented correctly — the Python
/// originals have unrelated dead-variable bugs, not part of the documented Open Questions).
pub fn select_solution(
    set: &ParetoSet,
    c1: f64,
    c2: f64,
    strategy: SelectionStrategy,
) -> Option<Solution> {
    let members = set.solutions();
    if members.is_empty() {
        return None;
    }

    match strategy {
        SelectionStrategy::MinG1 => members
            .iter()
            .min_by(|a, b| a.objective().g1.total_cmp(&b.objective().g1))
            .cloned(),
        SelectionStrategy::MinG2 => members
            .iter()
            .min_by(|a, b| a.objective().g2.total_cmp(&b.objective().g2))
            .cloned(),
        SelectionStrategy::BudgetedMiddle => {
            let within_caps: Vec<&Solution> = members
                .iter()
                .filter(|s| s.objective().g1 <= c1 || s.objective().g2 <= c2)
                .collect();
            let mut candidates: Vec<&Solution> = if within_caps.is_empty() {
                members.iter().collect()
            } else {
                within_caps
            };
            candidates.sort_by(|a, b| {
                distance_to_line(a.objective().g1, a.objective().g2)
                    .total_cmp(&distance_to_line(b.objective().g1, b.objective().g2))
            });
            candidates.get(candidates.len() / 2).map(|s| (*s).clone())
        }
    }
}

/// A single destination's next-hop entries: one per presumed previous hop, so the same table can
/// answer "I'm the source" and "a packet arrived from sender u" alike.
#[derive(Debug, Clone, Default)]
pub struct NextHopEntry {
    /// Next hop to use when this node is itself the traffic source.
    pub as_source: Option<u32>,
    /// Next hop to use per presumed upstream sender.
    pub by_sender: BTreeMap<u32, u32>,
    /// Set once compression finds every sender in `by_sender` agreeing on one hop; `by_sender`
    /// is then cleared, since a single value serves any sender.
    pub uniform_hop: Option<u32>,
}

/// Per-source next-hop table: destination ↦ [`NextHopEntry`].
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    pub entries: BTreeMap<u32, NextHopEntry>,
}

/// Builds the next-hop table for `start` under caps `(c1, c2)` via the four-stage pipeline
/// (§4.7). Grounded on `modeling_routing.py::make_routing_table`, with the `^`-as-keyset bug
/// (§9) fixed: the original Stage-1 map is kept and the XOR'd set is only used to iterate.
pub fn make_routing_table(
    graph: &Graph,
    start: u32,
    c1: f64,
    c2: f64,
) -> Result<RoutingTable, Error> {
    let mut table = RoutingTable::default();

    let neighbors = graph.get_neighbors(start);
    if neighbors.is_empty() {
        return Ok(table);
    }
    let default_next_hop = neighbors[0].0;
    for vertex in graph.vertices() {
        if vertex != start {
            table.entries.entry(vertex).or_default().as_source = Some(default_next_hop);
        }
    }

    // Stage 1.
    let stage1 = bod_stage_1(graph, start, c1, c2)?;
    let reachable: Vec<u32> = stage1.keys().copied().filter(|&v| v != start).collect();
    for target in &reachable {
        let set = &stage1[target];
        if let Some(solution) = select_solution(set, c1, c2, SelectionStrategy::BudgetedMiddle) {
            if let Solution::BiObj(b) = solution {
                if let Some(hop) = b.state.first_hop() {
                    table.entries.entry(*target).or_default().as_source = Some(hop);
                }
            }
        }
    }

    // Stage 2: possible upstream senders of `start`. `modeling_routing.py::make_routing_table`
    // builds this reverse graph with unit weights (`costs_matter=False`), not real costs.
    let reverse = graph.reversed(false);
    let senders = bod_stage_2(&reverse, start, c1, c2)?;

    // Stage 3: for each sender, recompute next-after-`start` hops for every destination.
    for &sender in &senders {
        let stage3 = bod_stage_3(graph, sender, c1, c2, start)?;
        for (target, set) in &stage3 {
            if *target == start {
                continue;
            }
            if let Some(solution) = select_solution(set, c1, c2, SelectionStrategy::BudgetedMiddle)
            {
                if let Solution::BiObj(b) = solution {
                    if let Some(hop) = b.state.next_after_target() {
                        table
                            .entries
                            .entry(*target)
                            .or_default()
                            .by_sender
                            .insert(sender, hop);
                    }
                }
            }
        }
    }

    // Compression: collapse a target's by-sender map to a single uniform hop if every sender
    // that reached it via a non-first-hop path agrees.
    for entry in table.entries.values_mut() {
        let distinct: std::collections::BTreeSet<u32> = entry.by_sender.values().copied().collect();
        if distinct.len() == 1 {
            entry.uniform_hop = distinct.into_iter().next();
            entry.by_sender.clear();
        }
    }

    Ok(table)
}
