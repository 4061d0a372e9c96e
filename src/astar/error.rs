// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Recommended number of allowed node expansions in [find_route](crate::find_route) and
/// [find_route_linear](crate::find_route_linear) before [AStarError::StepLimitExceeded]
/// is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Reasons why [find_route](crate::find_route) or [find_route_linear](crate::find_route_linear)
/// did not return a route.
///
/// All variants are expected outcomes of a route search, which callers are supposed
/// to branch on (e.g. by skipping a leg of a multi-point route).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AStarError {
    /// The start or end node doesn't exist in the graph.
    #[error("invalid node: {0}")]
    InvalidReference(String),

    /// Every node reachable from the start was expanded without reaching the end.
    #[error("no route")]
    NoRoute,

    /// Route search has exceeded its limit of steps.
    /// Either the nodes are really far apart, or no route exists.
    ///
    /// Concluding that no route exists requires traversing the whole graph,
    /// which can be prohibitively slow on large graphs. The step limit bounds
    /// the work done by a single search.
    #[error("step limit exceeded")]
    StepLimitExceeded,
}
