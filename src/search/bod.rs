use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::debug;

use crate::error::Error;
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::pareto::{BiObjSolution, ParetoSet, Solution, SolutionClass};
use crate::state::{Link, State};

/// Bi-Objective Dijkstra: the Pareto set of paths from `start` to every reachable vertex,
/// keyed by vertex. Grounded on `mosp_algo/bod.py`.
pub fn bod(graph: &Graph, start: u32) -> Result<BTreeMap<u32, ParetoSet>, Error> {
    let mut solutions: BTreeMap<u32, ParetoSet> = BTreeMap::new();
    let mut g2_min: BTreeMap<u32, f64> = BTreeMap::new();

    let mut frontier = Frontier::new();
    frontier.push(Rc::new(State::start(start, Link::Parent(None))));

    while let Some(cur) = frontier.pop_best(|_| false) {
        let best_so_far = g2_min.get(&cur.node).copied().unwrap_or(f64::INFINITY);
        if cur.g2 >= best_so_far {
            continue;
        }
        g2_min.insert(cur.node, cur.g2);
        let solution = Solution::BiObj(BiObjSolution::new(cur.clone(), cur.g1, cur.g2));
        solutions
            .entry(cur.node)
            .or_insert_with(|| ParetoSet::new(SolutionClass::BiObjective))
            .add(solution)?;

        for (w, costs) in graph.get_neighbors(cur.node) {
            for &(c1, c2) in costs {
                let g1 = cur.g1 + c1;
                let g2 = cur.g2 + c2;
                let neighbor_best = g2_min.get(&w).copied().unwrap_or(f64::INFINITY);
                if g2 >= neighbor_best {
                    continue;
                }
                let child = State::new(w, g1, g2, 0.0, 0.0, Link::Parent(Some(cur.clone())));
                debug!(from = cur.node, to = w, g1, g2, "pushing BOD candidate");
                frontier.push(Rc::new(child));
            }
        }
    }

    Ok(solutions)
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

    fn cycle_graph() -> Graph {
        let mut g = Graph::new();
        g.add_edge(1, 2, 1.0, 1.0);
        g.add_edge(1, 4, 6.0, 6.0);
        g.add_edge(2, 3, 1.0, 8.0);
        g.add_edge(2, 1, 5.0, 1.0);
        g.add_edge(3, 1, 1.0, 5.0);
        g.add_edge(4, 3, 1.0, 1.0);
        g
    }

    fn sorted_values(set: &ParetoSet) -> Vec<(f64, f64)> {
        let mut values = set.values();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values
    }

    #[test]
    fn s1_simple_dag_reaches_six_vertices_with_expected_fronts() {
        let g = simple_dag();
        let solutions = bod(&g, 0).unwrap();
        assert_eq!(solutions.len(), 6);
        assert_eq!(sorted_values(&solutions[&0]), vec![(0.0, 0.0)]);
        assert_eq!(sorted_values(&solutions[&2]), vec![(1.0, 5.0)]);
        assert_eq!(
            sorted_values(&solutions[&1]),
            vec![(3.0, 8.0), (4.0, 7.0), (7.0, 2.0)]
        );
    }

    #[test]
    fn s2_cycle_graph_reaches_four_vertices() {
        let g = cycle_graph();
        let solutions = bod(&g, 1).unwrap();
        assert_eq!(solutions.len(), 4);
        assert_eq!(sorted_values(&solutions[&3]), vec![(2.0, 9.0), (7.0, 7.0)]);
    }

    #[test]
    fn s3_isolated_source_yields_only_itself() {
        let g = Graph::new();
        let solutions = bod(&g, 9).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(sorted_values(&solutions[&9]), vec![(0.0, 0.0)]);
    }

    #[test]
    fn s4_parallel_edges_both_survive_when_non_dominated() {
        let mut g = Graph::new();
        g.add_edge(0, 1, 1.0, 5.0);
        g.add_edge(0, 1, 2.0, 1.0);
        let solutions = bod(&g, 0).unwrap();
        assert_eq!(sorted_values(&solutions[&1]), vec![(1.0, 5.0), (2.0, 1.0)]);
    }

    #[test]
    fn pareto_sets_are_antichains() {
        let g = simple_dag();
        let solutions = bod(&g, 0).unwrap();
        for set in solutions.values() {
            let members = set.solutions();
            for i in 0..members.len() {
                for j in 0..members.len() {
                    if i != j {
                        assert!(!members[i].dominates(&members[j]));
                    }
                }
            }
        }
    }
}
