// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{earth_distance, Node, Way};

/// Represents a street network as a set of [Nodes](Node), directed
/// connections between them, and the [Ways](Way) which produced those connections.
///
/// Nodes are kept in an arena in insertion order; connections are arena indices.
/// A graph is meant to be populated once and then queried; there is
/// no way to remove nodes, ways or connections.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: Vec<(Node, Vec<usize>)>,
    index: HashMap<String, usize>,
    ways: HashMap<i64, Way>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of distinct ways recorded in the graph.
    pub fn way_count(&self) -> usize {
        self.ways.len()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(node, _)| node)
    }

    /// Returns an iterator over all recorded [Ways](Way), in no particular order.
    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.ways.values()
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx].0)
    }

    /// Retrieves a [Way] with the provided id.
    pub fn get_way(&self, id: i64) -> Option<&Way> {
        self.ways.get(&id)
    }

    /// Creates a [Node] with the provided id and position, unless a node with
    /// that id already exists. Positions of existing nodes are never overwritten.
    ///
    /// Returns true if the node was inserted.
    pub fn add_node(&mut self, id: impl Into<String>, lat: f64, lon: f64) -> bool {
        match self.index.entry(id.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(e) => {
                let node = Node::new(e.key().clone(), lat, lon);
                e.insert(self.nodes.len());
                self.nodes.push((node, Vec::default()));
                true
            }
        }
    }

    /// Records a [Way] and connects its consecutive nodes.
    ///
    /// For every consecutive pair `(a, b)` where both nodes already exist,
    /// a connection `a → b` is created. A `b → a` connection is created as well,
    /// unless the way [is one-way](Way::is_oneway). Pairs referring to unknown
    /// nodes are silently skipped.
    ///
    /// Recording a way with an already-used id replaces the stored way,
    /// but keeps all connections created before.
    pub fn add_way(&mut self, way: Way) {
        let backward = !way.is_oneway();

        for pair in way.nodes.windows(2) {
            let (Some(&a), Some(&b)) = (self.index.get(&pair[0]), self.index.get(&pair[1])) else {
                continue;
            };

            self.connect(a, b);
            if backward {
                self.connect(b, a);
            }
        }

        self.ways.insert(way.id, way);
    }

    fn connect(&mut self, from: usize, to: usize) {
        let edges = &mut self.nodes[from].1;
        if !edges.contains(&to) {
            edges.push(to);
        }
    }

    /// Finds the closest [Node] to the given position.
    ///
    /// If multiple nodes are equally close, the one added first is returned.
    ///
    /// This function requires computing the distance to every [Node] in the graph,
    /// and is not suitable for large graphs - see [KDTree](crate::KDTree).
    pub fn find_nearest_node(&self, lat: f64, lon: f64) -> Option<&Node> {
        self.iter()
            .map(|nd| (earth_distance(lat, lon, nd.lat, nd.lon), nd))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, nd)| nd)
    }

    /// Returns an iterator over all [Nodes](Node) directly reachable from a node with a given id.
    pub fn get_edges<'a>(&'a self, from_id: &str) -> impl Iterator<Item = &'a Node> + 'a {
        self.index
            .get(from_id)
            .map(|&idx| self.nodes[idx].1.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&to| &self.nodes[to].0)
    }

    /// Returns true if there is a direct connection from one node to another.
    pub fn has_edge(&self, from_id: &str, to_id: &str) -> bool {
        match (self.index.get(from_id), self.index.get(to_id)) {
            (Some(&from), Some(&to)) => self.nodes[from].1.contains(&to),
            _ => false,
        }
    }

    /// Gets the cost of a direct connection from one node to another,
    /// that is the distance between them in kilometers.
    /// If such a connection doesn't exist, returns [f64::INFINITY].
    pub fn get_edge(&self, from_id: &str, to_id: &str) -> f64 {
        if self.has_edge(from_id, to_id) {
            let from = &self.nodes[self.index[from_id]].0;
            let to = &self.nodes[self.index[to_id]].0;
            from.distance_to(to)
        } else {
            f64::INFINITY
        }
    }

    // Arena accessors for route search.

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx].0
    }

    pub(crate) fn neighbors_at(&self, idx: usize) -> &[usize] {
        &self.nodes[idx].1
    }
}
