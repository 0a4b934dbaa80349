use thiserror::Error;

/// Error taxonomy for the search and routing-table layers.
#[derive(Debug, Error)]
pub enum Error {
    /// The algorithm produced an empty Pareto set for a target the caller asked about.
    #[error("no solution found for vertex {0}")]
    NoSolution(u32),
    /// Attempted to insert a `Solution` of the wrong `SolutionClass` into a `ParetoSet`.
    #[error("solution class mismatch: set holds {expected:?}, got {found:?}")]
    TypeMismatch {
        expected: crate::pareto::SolutionClass,
        found: crate::pareto::SolutionClass,
    },
    /// Removal of a solution that is not a member of the set.
    #[error("solution not present in Pareto set")]
    Missing,
    /// A line in a graph input file could not be parsed.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    /// An A* heuristic returned a negative component.
    #[error("heuristic returned a negative value for vertex {0}")]
    InvalidHeuristic(u32),
}
