// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use super::{reconstruct_path, resolve_endpoints, Route};
use crate::{AStarError, Graph};

/// Open set of the search, remembering the order in which nodes were added.
#[derive(Debug, Default)]
struct OpenSet {
    order: Vec<usize>,
    members: HashSet<usize>,
}

impl OpenSet {
    fn insert(&mut self, idx: usize) {
        if self.members.insert(idx) {
            self.order.push(idx);
        }
    }

    /// Removes and returns the member with the lowest score.
    /// Of several members with equal scores, the one added first is returned.
    fn pop_min(&mut self, f_score: &HashMap<usize, f64>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, idx) in self.order.iter().enumerate() {
            let score = f_score.get(idx).copied().unwrap_or(f64::INFINITY);
            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((pos, score)),
            }
        }

        let (pos, _) = best?;
        let idx = self.order.remove(pos);
        self.members.remove(&idx);
        Some(idx)
    }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// This variant keeps the frontier in a plain set and scans it for the best
/// candidate on every step, which results in O(V²) running time. It always returns
/// a route as short as [find_route](crate::find_route) does, and mostly exists
/// to verify that equivalence; prefer [find_route](crate::find_route) for anything else.
///
/// `step_limit` has the same meaning as in [find_route](crate::find_route).
pub fn find_route_linear<'a>(
    g: &'a Graph,
    from_id: &str,
    to_id: &str,
    step_limit: usize,
) -> Result<Route<'a>, AStarError> {
    let (from, to) = resolve_endpoints(g, from_id, to_id)?;
    let to_node = g.node_at(to);

    let mut open = OpenSet::default();
    let mut came_from: HashMap<usize, usize> = HashMap::default();
    let mut g_score: HashMap<usize, f64> = HashMap::default();
    let mut f_score: HashMap<usize, f64> = HashMap::default();
    let mut steps: usize = 0;

    g_score.insert(from, 0.0);
    f_score.insert(from, g.node_at(from).distance_to(to_node));
    open.insert(from);

    while let Some(current_idx) = open.pop_min(&f_score) {
        if current_idx == to {
            log::debug!("route {} → {} found after {} steps", from_id, to_id, steps);
            return Ok(reconstruct_path(g, &came_from, to));
        }

        steps += 1;
        if steps > step_limit {
            return Err(AStarError::StepLimitExceeded);
        }

        let current = g.node_at(current_idx);
        let current_cost = g_score.get(&current_idx).copied().unwrap_or(f64::INFINITY);

        for &neighbor_idx in g.neighbors_at(current_idx) {
            let neighbor = g.node_at(neighbor_idx);

            let tentative = current_cost + current.distance_to(neighbor);
            if tentative < g_score.get(&neighbor_idx).copied().unwrap_or(f64::INFINITY) {
                came_from.insert(neighbor_idx, current_idx);
                g_score.insert(neighbor_idx, tentative);
                f_score.insert(neighbor_idx, tentative + neighbor.distance_to(to_node));
                open.insert(neighbor_idx);
            }
        }
    }

    log::debug!("no route {} → {} after {} steps", from_id, to_id, steps);
    Err(AStarError::NoRoute)
}
