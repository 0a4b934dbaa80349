use std::rc::Rc;

use crate::error::Error;
use crate::state::State;

/// A bi-objective cost vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    pub g1: f64,
    pub g2: f64,
}

impl Objective {
    pub fn new(g1: f64, g2: f64) -> Self {
        Self { g1, g2 }
    }

    /// Product-order dominance: `self` dominates `other` iff it is no worse in both objectives
    /// and strictly better in at least one (§3).
    pub fn dominates(&self, other: &Objective) -> bool {
        (self.g1 < other.g1 && self.g2 <= other.g2) || (self.g1 <= other.g1 && self.g2 < other.g2)
    }
}

/// Tags which `Solution` variant a `ParetoSet` accepts, mirroring the `SolutionClass` check the
/// original `ParetoSet.add_solution` performs against its `self.SolutionClass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionClass {
    BiObjective,
}

/// A solution discovered by search: a reached `State` paired with its objective vector. Kept as
/// a tagged enum (rather than an abstract base class, per §9's redesign note) so `ParetoSet` can
/// hold any solution kind behind one type while still rejecting mismatched insertions at runtime,
/// the same role `ScalarRouteAlgorithm`/`MultiMetricRouteAlgorithm` enums play in place of a class
/// hierarchy.
#[derive(Debug, Clone)]
pub enum Solution {
    BiObj(BiObjSolution),
}

impl Solution {
    pub fn class(&self) -> SolutionClass {
        match self {
            Solution::BiObj(_) => SolutionClass::BiObjective,
        }
    }

    pub fn objective(&self) -> Objective {
        match self {
            Solution::BiObj(s) => s.objective,
        }
    }

    pub fn dominates(&self, other: &Solution) -> bool {
        self.objective().dominates(&other.objective())
    }
}

/// Equality is defined on the objective vector alone, matching `BiObjSolution.__eq__`/`__hash__`
/// in the original (`(g1, g2)` only — the carried `State` is not part of identity).
impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.objective() == other.objective()
    }
}

#[derive(Debug, Clone)]
pub struct BiObjSolution {
    pub state: Rc<State>,
    pub objective: Objective,
}

impl BiObjSolution {
    pub fn new(state: Rc<State>, g1: f64, g2: f64) -> Self {
        Self {
            state,
            objective: Objective::new(g1, g2),
        }
    }
}

/// An antichain of mutually non-dominated `Solution`s, all belonging to the same `SolutionClass`.
/// Grounded on `pareto_set.py::ParetoSet`.
#[derive(Debug, Clone)]
pub struct ParetoSet {
    class: SolutionClass,
    solutions: Vec<Solution>,
}

impl ParetoSet {
    pub fn new(class: SolutionClass) -> Self {
        Self {
            class,
            solutions: Vec::new(),
        }
    }

    fn check_class(&self, solution: &Solution) -> Result<(), Error> {
        if solution.class() != self.class {
            return Err(Error::TypeMismatch {
                expected: self.class,
                found: solution.class(),
            });
        }
        Ok(())
    }

    /// Inserts `solution` if no current member dominates it, evicting any members it dominates
    /// in turn. Returns `Ok(true)` if inserted, `Ok(false)` if rejected as dominated.
    pub fn add(&mut self, solution: Solution) -> Result<bool, Error> {
        self.check_class(&solution)?;
        if self.solutions.iter().any(|s| s.dominates(&solution)) {
            return Ok(false);
        }
        self.solutions.retain(|s| !solution.dominates(s));
        self.solutions.push(solution);
        Ok(true)
    }

    pub fn contains(&self, solution: &Solution) -> bool {
        self.solutions.iter().any(|s| s == solution)
    }

    /// Removes `solution` by objective-vector equality. Errors if absent, matching the original's
    /// reliance on `set.remove` raising `KeyError` for a non-member.
    pub fn remove(&mut self, solution: &Solution) -> Result<(), Error> {
        let idx = self
            .solutions
            .iter()
            .position(|s| s == solution)
            .ok_or(Error::Missing)?;
        self.solutions.remove(idx);
        Ok(())
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn values(&self) -> Vec<(f64, f64)> {
        self.solutions
            .iter()
            .map(|s| {
                let obj = s.objective();
                (obj.g1, obj.g2)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// True if some member of the set dominates `solution`.
    pub fn check_dominance(&self, solution: &Solution) -> bool {
        self.solutions.iter().any(|s| s.dominates(solution))
    }

    /// Removes every member that `solution` dominates.
    pub fn remove_worse(&mut self, solution: &Solution) {
        self.solutions.retain(|s| !solution.dominates(s));
    }
}
