// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;

use crate::{earth_distance, Graph, Node};

/// KDTree implements the [k-d tree data structure](https://en.wikipedia.org/wiki/K-d_tree),
/// which can be used to speed up nearest-neighbor search for large graphs. Snapping every
/// waypoint with [Graph::find_nearest_node] requires a full scan over all nodes; a k-d tree
/// trades memory usage for CPU time when many positions need to be snapped against
/// the same graph.
///
/// Like [Graph::find_nearest_node], ties are broken by insertion order: of several equally
/// close nodes, the one added to the graph first is returned.
///
/// This implementation assumes euclidean geometry, even though the distance function
/// used is [earth_distance]. This results in undefined behavior when points
/// are close to the ante meridian (180°/-180° longitude) or poles (90°/-90° latitude),
/// or when the data spans multiple continents.
#[derive(Debug, Clone)]
pub struct KDTree<'a> {
    pivot: Entry<'a>,
    left: Option<Box<KDTree<'a>>>,
    right: Option<Box<KDTree<'a>>>,
}

/// A [Node] together with its position in the insertion order of the source [Graph].
#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    order: usize,
    node: &'a Node,
}

impl<'a> KDTree<'a> {
    /// Builds a k-d tree over all nodes of a [Graph]. Returns `None` for empty graphs.
    pub fn from_graph(g: &'a Graph) -> Option<Self> {
        let mut entries = g
            .iter()
            .enumerate()
            .map(|(order, node)| Entry { order, node })
            .collect::<Vec<_>>();
        Self::build(entries.as_mut_slice(), false)
    }

    /// Finds the closest [Node] to the given position.
    pub fn find_nearest_node(&self, lat: f64, lon: f64) -> &'a Node {
        self.find_nearest_impl(lat, lon, false).0.node
    }

    fn find_nearest_impl(&self, lat: f64, lon: f64, lon_divides: bool) -> (Entry<'a>, f64) {
        // Start by assuming that pivot is the closest
        let mut best = self.pivot;
        let mut best_dist = earth_distance(lat, lon, best.node.lat, best.node.lon);

        // Select which branch to recurse into first
        let first_left = if lon_divides {
            lon < best.node.lon
        } else {
            lat < best.node.lat
        };
        let (first, second) = if first_left {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        };

        if let Some(ref branch) = first {
            let (alt, alt_dist) = branch.find_nearest_impl(lat, lon, !lon_divides);
            if is_better(alt, alt_dist, best, best_dist) {
                best = alt;
                best_dist = alt_dist;
            }
        }

        if let Some(ref branch) = second {
            // A closer (or an equally close, but earlier) node is possible in the second branch
            // if and only if the splitting axis is not further than the current best candidate.
            let (axis_lat, axis_lon) = if lon_divides {
                (lat, self.pivot.node.lon)
            } else {
                (self.pivot.node.lat, lon)
            };
            let dist_to_axis = earth_distance(lat, lon, axis_lat, axis_lon);

            if dist_to_axis <= best_dist {
                let (alt, alt_dist) = branch.find_nearest_impl(lat, lon, !lon_divides);
                if is_better(alt, alt_dist, best, best_dist) {
                    best = alt;
                    best_dist = alt_dist;
                }
            }
        }

        (best, best_dist)
    }

    fn build(entries: &mut [Entry<'a>], lon_divides: bool) -> Option<Self> {
        match entries.len() {
            0 => None,
            1 => Some(Self {
                pivot: entries[0],
                left: None,
                right: None,
            }),
            _ => {
                if lon_divides {
                    entries.sort_by(|a, b| a.node.lon.total_cmp(&b.node.lon));
                } else {
                    entries.sort_by(|a, b| a.node.lat.total_cmp(&b.node.lat));
                }
                let median = entries.len() / 2;
                let pivot = entries[median];
                let (left, right_and_pivot) = entries.split_at_mut(median);
                let right = &mut right_and_pivot[1..];
                Some(Self {
                    pivot,
                    left: Self::build(left, !lon_divides).map(Box::new),
                    right: Self::build(right, !lon_divides).map(Box::new),
                })
            }
        }
    }
}

#[inline]
fn is_better(candidate: Entry, candidate_dist: f64, best: Entry, best_dist: f64) -> bool {
    match candidate_dist.total_cmp(&best_dist) {
        Ordering::Less => true,
        Ordering::Equal => candidate.order < best.order,
        Ordering::Greater => false,
    }
}
