// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest-path routing over street geometry returned by the
//! [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API).
//!
//! Ways fetched for a bounding box are turned into a directed [Graph],
//! free-form positions are snapped to the closest graph [Node], and A* finds
//! the shortest [Route] between two nodes. Edge costs are never stored:
//! they are recomputed from node positions with [earth_distance].
//!
//! # Example
//!
//! ```no_run
//! let mut g = roadgraph::Graph::new();
//! let options = roadgraph::overpass::Options::default();
//! roadgraph::overpass::add_features_from_file(&mut g, &options, "path/to/moscow.json")
//!     .expect("failed to load moscow.json");
//!
//! let start_node = g.find_nearest_node(55.7558, 37.6173).unwrap();
//! let end_node = g.find_nearest_node(55.7887, 37.6517).unwrap();
//! let route = roadgraph::find_route(&g, &start_node.id, &end_node.id, roadgraph::DEFAULT_STEP_LIMIT)
//!     .expect("failed to find route");
//!
//! println!("Route: {:?}", route.coordinates());
//! ```

use std::collections::HashMap;

mod astar;
mod distance;
mod graph;
mod kd;
pub mod overpass;

pub use astar::{
    find_route, find_route_linear, route_cost, AStarError, Route, DEFAULT_STEP_LIMIT,
};
pub use distance::{earth_distance, EARTH_RADIUS};
pub use graph::Graph;
pub use kd::KDTree;

/// Represents a vertex of the [Graph]: a single point along a [Way].
///
/// Nodes are identified by an opaque string. Ingested nodes use
/// `"{way_id}_{position}"`, so two ways never share a node, even if
/// they meet at the same coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
        }
    }

    /// Returns the great-circle distance between two nodes, in kilometers.
    #[inline]
    pub fn distance_to(&self, other: &Node) -> f64 {
        earth_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Represents a street segment - an ordered polyline of [Nodes](Node) with descriptive tags.
///
/// A way is metadata only; routability is expressed entirely through the
/// connections [Graph::add_way] creates between consecutive nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<String>,
    pub tags: HashMap<String, String>,
}

impl Way {
    /// Returns true if the way may only be traversed in the order of its nodes.
    ///
    /// Only `oneway=yes` is recognized. Other values (including `-1` and `true`)
    /// are treated like a missing tag and produce bidirectional connections.
    pub fn is_oneway(&self) -> bool {
        self.tags.get("oneway").map(String::as_str) == Some("yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn way_with_oneway(value: Option<&str>) -> Way {
        Way {
            id: 1,
            nodes: vec![],
            tags: value
                .map(|v| HashMap::from([("oneway".to_string(), v.to_string())]))
                .unwrap_or_default(),
        }
    }

    #[test]
    fn oneway_only_on_exact_yes() {
        assert!(way_with_oneway(Some("yes")).is_oneway());
        assert!(!way_with_oneway(None).is_oneway());
        assert!(!way_with_oneway(Some("no")).is_oneway());
        assert!(!way_with_oneway(Some("-1")).is_oneway());
        assert!(!way_with_oneway(Some("Yes")).is_oneway());
        assert!(!way_with_oneway(Some("true")).is_oneway());
    }
}
