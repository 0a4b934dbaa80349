use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::error::Error;
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::pareto::{BiObjSolution, ParetoSet, Solution, SolutionClass};
use crate::state::{Link, State};

/// Shared skeleton for every capped BOD variant (§4.6): identical to [`bod`](crate::search::bod)
/// except candidates exceeding `(c1, c2)` are discarded, and the back-link a child carries is
/// produced by `child_link`, which receives the parent `State` and the neighbor vertex.
fn capped_bod<F>(
    graph: &Graph,
    start: u32,
    c1: f64,
    c2: f64,
    start_link: Link,
    child_link: F,
) -> Result<BTreeMap<u32, ParetoSet>, Error>
where
    F: Fn(&State, u32) -> Link,
{
    let mut solutions: BTreeMap<u32, ParetoSet> = BTreeMap::new();
    let mut g2_min: BTreeMap<u32, f64> = BTreeMap::new();

    let mut frontier = Frontier::new();
    frontier.push(Rc::new(State::start(start, start_link)));

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
            for &(edge_c1, edge_c2) in costs {
                let g1 = cur.g1 + edge_c1;
                let g2 = cur.g2 + edge_c2;
                if g1 > c1 || g2 > c2 {
                    continue;
                }
                let neighbor_best = g2_min.get(&w).copied().unwrap_or(f64::INFINITY);
                if g2 >= neighbor_best {
                    continue;
                }
                let link = child_link(&cur, w);
                frontier.push(Rc::new(State::new(w, g1, g2, 0.0, 0.0, link)));
            }
        }
    }

    Ok(solutions)
}

/// Capped BOD with no back-link specialization (full parent chain retained): the baseline against
/// which `bod_limited(G,s,C1,C2)[v] ⊆ bod(G,s)[v] ∩ {g1≤C1 ∧ g2≤C2}` is checked (§8, property 4).
pub fn bod_limited(
    graph: &Graph,
    start: u32,
    c1: f64,
    c2: f64,
) -> Result<BTreeMap<u32, ParetoSet>, Error> {
    capped_bod(
        graph,
        start,
        c1,
        c2,
        Link::Parent(None),
        |cur, _w| Link::Parent(Some(Rc::new(cur.clone()))),
    )
}

/// Stage 1 — reachable-with-first-hop. Every member `State` exposes, via
/// [`State::first_hop`](crate::state::State::first_hop), the first vertex visited after `start`
/// on its discovering path.
pub fn bod_stage_1(
    graph: &Graph,
    start: u32,
    c1: f64,
    c2: f64,
) -> Result<BTreeMap<u32, ParetoSet>, Error> {
    capped_bod(graph, start, c1, c2, Link::FirstHop(None), move |cur, w| {
        if cur.node == start {
            Link::FirstHop(Some(w))
        } else {
            Link::FirstHop(cur.first_hop())
        }
    })
}

/// Stage 2 — possible senders. Run on the reverse graph of the network (see
/// [`Graph::reversed`](crate::graph::Graph::reversed)); returns the set of vertices from which
/// `start` is reachable within `(c1, c2)`, excluding `start` itself.
pub fn bod_stage_2(
    reverse_graph: &Graph,
    start: u32,
    c1: f64,
    c2: f64,
) -> Result<BTreeSet<u32>, Error> {
    let solutions = capped_bod(reverse_graph, start, c1, c2, Link::None, |_, _| Link::None)?;
    Ok(solutions.into_keys().filter(|&v| v != start).collect())
}

/// Stage 3 — next-after-target. Every member `State` exposes, via
/// [`State::next_after_target`](crate::state::State::next_after_target), the vertex visited
/// immediately after `target` on the discovering path from `start`.
pub fn bod_stage_3(
    graph: &Graph,
    start: u32,
    c1: f64,
    c2: f64,
    target: u32,
) -> Result<BTreeMap<u32, ParetoSet>, Error> {
    capped_bod(
        graph,
        start,
        c1,
        c2,
        Link::NextAfterTarget(None),
        move |cur, w| {
            if cur.node == target {
                Link::NextAfterTarget(Some(w))
            } else {
                Link::NextAfterTarget(cur.next_after_target())
            }
        },
    )
}
