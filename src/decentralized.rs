use tracing::info;

use crate::error::Error;
use crate::graph::Graph;
use crate::pareto::{ParetoSet, Solution};
use crate::search::bod::bod;
use crate::state::reconstruct_path;

/// Runs `pathfind` from `s` and returns its Pareto set for `t`.
type PathFinder = fn(&Graph, u32) -> Result<std::collections::BTreeMap<u32, ParetoSet>, Error>;

/// Picks one representative `Solution` out of a Pareto set (a specialization of
/// [`select_solution`](crate::routing_table::select_solution) that ignores caps, matching how
/// the decentralizability check treats an unbounded `bod` result).
type SelectFn = fn(&ParetoSet) -> Option<Solution>;

/// The default selection strategy exercised by [`check_decentralizability`]: pick the solution
/// with the smallest `g1` (§8, scenario S6 uses "selection = min-g1").
pub fn min_g1(set: &ParetoSet) -> Option<Solution> {
    set.solutions()
        .iter()
        .min_by(|a, b| a.objective().g1.total_cmp(&b.objective().g1))
        .cloned()
}

/// Verifies that independently re-running `pathfind` (a bi-objective search producing full
/// parent-linked `State`s) plus `select` at every intermediate hop of a chosen path reproduces
/// the remaining suffix of that path — the decentralizability property (§4.8). On success
/// returns the walked path from `start` to `target`. Grounded on
/// `demo/bod_demo.py::check_decentralization`.
pub fn check_decentralizability(
    graph: &Graph,
    start: u32,
    target: u32,
    pathfind: PathFinder,
    select: SelectFn,
) -> Result<Vec<u32>, Error> {
    let initial_solutions = pathfind(graph, start)?;
    let initial_set = initial_solutions.get(&target).ok_or(Error::NoSolution(target))?;
    let initial_choice = select(initial_set).ok_or(Error::NoSolution(target))?;
    let Solution::BiObj(chosen) = initial_choice;
    let mut expected_suffix =
        reconstruct_path(&chosen.state).ok_or(Error::NoSolution(target))?;

    let mut walked = vec![start];
    let mut cur = start;

    while cur != target {
        info!(node = cur, "decentralizability check: replanning at node");
        let solutions = pathfind(graph, cur)?;
        let set = solutions.get(&target).ok_or(Error::NoSolution(target))?;
        let choice = select(set).ok_or(Error::NoSolution(target))?;
        let Solution::BiObj(picked) = choice;
        let suffix = reconstruct_path(&picked.state).ok_or(Error::NoSolution(target))?;

        if suffix != expected_suffix {
            return Err(Error::NoSolution(target));
        }

        let next = suffix[1];
        walked.push(next);
        expected_suffix = suffix[1..].to_vec();
        cur = next;
    }

    Ok(walked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_dag() -> Graph {
        let mut g = Graph::new();
        g.add_edge(0, 2, 1.0, 5.0);
        g.add_edge(0, 4, 5.0, 1.0);
        g.add_edge(2, 3, 1.0, 4.0);
        g.add_edge(2, 5, 1.0, 2.0);
        g.add_edge(2, 5, 2.0, 1.0);
        g.add_edge(4, 3, 1.0, 3.0);
        g.add_edge(3, 1, 9.0, 3.0);
        g.add_edge(4, 1, 2.0, 1.0);
        g.add_edge(5, 1, 1.0, 1.0);
        g
    }

    #[test]
    fn s6_min_g1_walk_is_decentralized_on_the_simple_dag() {
        let g = simple_dag();
        let walked = check_decentralizability(&g, 0, 1, bod, min_g1).unwrap();
        assert_eq!(*walked.first().unwrap(), 0);
        assert_eq!(*walked.last().unwrap(), 1);
    }

    #[test]
    fn unreachable_target_yields_no_solution_error() {
        let mut g = Graph::new();
        g.add_edge(0, 1, 1.0, 1.0);
        let err = check_decentralizability(&g, 0, 9, bod, min_g1).unwrap_err();
        assert!(matches!(err, Error::NoSolution(9)));
    }
}
