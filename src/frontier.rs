use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::rc::Rc;

use crate::state::State;

/// Min-heap entry: `State` already orders lexicographically on `(f1, f2, node)`; `Reverse` turns
/// the max-heap `BinaryHeap` into a min-heap, matching the teacher's `QueueEntry` in
/// `irp/src/protocols/route_compute/frontier.rs`.
#[derive(Clone)]
struct Entry(Rc<State>);

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.as_ref().cmp(other.0.as_ref())
    }
}

/// Lexicographic `(f1, f2)` priority queue over `State`s, with lazy dominance-based
/// deduplication at pop time (§4.3).
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, state: Rc<State>) {
        self.heap.push(Reverse(Entry(state)));
    }

    /// Removes and returns the least `State` for which `is_stale` returns `false`. Entries for
    /// which `is_stale` returns `true` are discarded without being returned — the lazy-expansion
    /// guard described in §4.3.
    pub fn pop_best<F>(&mut self, mut is_stale: F) -> Option<Rc<State>>
    where
        F: FnMut(&State) -> bool,
    {
        while let Some(Reverse(Entry(state))) = self.heap.pop() {
            if is_stale(&state) {
                continue;
            }
            return Some(state);
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes every `State` whose `(f1, f2)` is strictly dominated by `(f1, f2)`, then
    /// re-heapifies. Optional per §4.3; not exercised by BOD itself (the `g2_min` dominance
    /// check subsumes it — §9), but available for stage searches that want an eager prune.
    pub fn prune_dominated_by(&mut self, f1: f64, f2: f64) {
        let threshold = State::new(0, f1, f2, 0.0, 0.0, crate::state::Link::None);
        let remaining: Vec<Reverse<Entry>> = std::mem::take(&mut self.heap)
            .into_iter()
            .filter(|Reverse(Entry(state))| !threshold.f_dominates(state))
            .collect();
        self.heap = BinaryHeap::from(remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Link;
    use std::collections::BTreeSet;

    #[test]
    fn pop_best_returns_lexicographically_least() {
        let mut frontier = Frontier::new();
        frontier.push(Rc::new(State::new(1, 5.0, 1.0, 0.0, 0.0, Link::None)));
        frontier.push(Rc::new(State::new(2, 1.0, 9.0, 0.0, 0.0, Link::None)));
        frontier.push(Rc::new(State::new(3, 1.0, 2.0, 0.0, 0.0, Link::None)));

        let first = frontier.pop_best(|_| false).unwrap();
        assert_eq!(first.node, 2);
        let second = frontier.pop_best(|_| false).unwrap();
        assert_eq!(second.node, 3);
    }

    #[test]
    fn pop_best_skips_stale_entries() {
        let mut frontier = Frontier::new();
        frontier.push(Rc::new(State::new(1, 1.0, 1.0, 0.0, 0.0, Link::None)));
        frontier.push(Rc::new(State::new(2, 2.0, 2.0, 0.0, 0.0, Link::None)));

        let mut expanded = BTreeSet::new();
        expanded.insert(1u32);
        let next = frontier.pop_best(|state| expanded.contains(&state.node));
        assert_eq!(next.unwrap().node, 2);
    }

    #[test]
    fn empty_after_all_entries_consumed() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        frontier.push(Rc::new(State::new(1, 1.0, 1.0, 0.0, 0.0, Link::None)));
        assert!(!frontier.is_empty());
        frontier.pop_best(|_| false);
        assert!(frontier.pop_best(|_| false).is_none());
    }

    #[test]
    fn prune_dominated_by_removes_strictly_worse_entries() {
        let mut frontier = Frontier::new();
        frontier.push(Rc::new(State::new(1, 5.0, 5.0, 0.0, 0.0, Link::None)));
        frontier.push(Rc::new(State::new(2, 1.0, 1.0, 0.0, 0.0, Link::None)));
        frontier.prune_dominated_by(2.0, 2.0);
        let remaining = frontier.pop_best(|_| false).unwrap();
        assert_eq!(remaining.node, 2);
        assert!(frontier.pop_best(|_| false).is_none());
    }
}
