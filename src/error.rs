//! Error types for trajectory planning.

use thiserror::Error;

/// Errors reported by [Planner::plan](crate::Planner::plan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A circle constraint was asked to correct a point whose predecessor is
    /// not strictly outside the exclusion zone, so no tangent escape exists.
    #[error("no tangent escape from the exclusion zone at step {step}")]
    TangentUnreachable {
        /// The planning step at which resolution failed.
        step: usize,
    },

    /// The constraint resolution loop exhausted its iteration bound without
    /// reaching a point that satisfies every constraint.
    #[error("constraints could not be resolved at step {step}")]
    UnresolvedConstraint {
        /// The planning step at which resolution failed.
        step: usize,
    },
}
