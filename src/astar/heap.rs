// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::{reconstruct_path, resolve_endpoints, Route};
use crate::{AStarError, Graph};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: usize,
    cost: f64,
    score: f64,
    seq: usize,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores (and earlier pushes among equal scores) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest route between two nodes in the provided graph.
///
/// The frontier is a binary heap ordered by the estimated total cost,
/// with ties broken in favor of nodes pushed earlier. This makes the returned
/// route deterministic for a given graph; if several routes are equally short,
/// it may differ from the one returned by [find_route_linear](crate::find_route_linear),
/// but their costs are the same.
///
/// `step_limit` limits how many nodes may be expanded during the search
/// before returning [AStarError::StepLimitExceeded]. Concluding that no route exists requires
/// expanding all nodes accessible from the start, which is usually very time-consuming
/// on large graphs. The recommended value is [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
pub fn find_route<'a>(
    g: &'a Graph,
    from_id: &str,
    to_id: &str,
    step_limit: usize,
) -> Result<Route<'a>, AStarError> {
    let (from, to) = resolve_endpoints(g, from_id, to_id)?;
    let to_node = g.node_at(to);

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<usize, usize> = HashMap::default();
    let mut known_costs: HashMap<usize, f64> = HashMap::default();
    let mut steps: usize = 0;
    let mut seq: usize = 0;

    queue.push(QueueItem {
        at: from,
        cost: 0.0,
        score: g.node_at(from).distance_to(to_node),
        seq,
    });
    known_costs.insert(from, 0.0);

    while let Some(item) = queue.pop() {
        // Contrary to the wikipedia definition, we might keep multiple items in the queue for the same node.
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        if item.at == to {
            log::debug!("route {} → {} found after {} steps", from_id, to_id, steps);
            return Ok(reconstruct_path(g, &came_from, to));
        }

        steps += 1;
        if steps > step_limit {
            return Err(AStarError::StepLimitExceeded);
        }

        let current = g.node_at(item.at);
        for &neighbor_idx in g.neighbors_at(item.at) {
            let neighbor = g.node_at(neighbor_idx);

            // Only strictly cheaper ways to the neighbor are recorded
            let neighbor_cost = item.cost + current.distance_to(neighbor);
            if neighbor_cost
                >= known_costs
                    .get(&neighbor_idx)
                    .copied()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            came_from.insert(neighbor_idx, item.at);
            known_costs.insert(neighbor_idx, neighbor_cost);
            seq += 1;
            queue.push(QueueItem {
                at: neighbor_idx,
                cost: neighbor_cost,
                score: neighbor_cost + neighbor.distance_to(to_node),
                seq,
            });
        }
    }

    log::debug!("no route {} → {} after {} steps", from_id, to_id, steps);
    Err(AStarError::NoRoute)
}
