// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{Graph, Node};

mod error;
mod heap;
mod scan;

pub use error::{AStarError, DEFAULT_STEP_LIMIT};
pub use heap::find_route;
pub use scan::find_route_linear;

/// Ordered sequence of [Nodes](Node) from the start to the end of a route, both inclusive.
///
/// A route returned from a search is never empty; a route from a node to itself
/// consists of that single node.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<'a>(Vec<&'a Node>);

impl<'a> Route<'a> {
    /// Returns the nodes of the route, from start to end.
    pub fn nodes(&self) -> &[&'a Node] {
        &self.0
    }

    /// Returns the ids of nodes on the route, from start to end.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.0.iter().map(|n| n.id.as_str())
    }

    /// Returns `(lat, lon)` pairs of nodes on the route, from start to end.
    ///
    /// These are the positions of graph nodes, not of the positions
    /// originally snapped to those nodes.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.0.iter().map(|n| (n.lat, n.lon)).collect()
    }

    /// Returns the total length of the route, in kilometers.
    pub fn cost(&self) -> f64 {
        self.0.windows(2).map(|p| p[0].distance_to(p[1])).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Calculates the cost of traversing the given node ids in order,
/// returning [f64::INFINITY] if any two consecutive nodes are not directly connected.
pub fn route_cost<S: AsRef<str>>(g: &Graph, ids: &[S]) -> f64 {
    ids.windows(2)
        .map(|p| g.get_edge(p[0].as_ref(), p[1].as_ref()))
        .sum()
}

/// Looks up both route endpoints, returning their arena indices.
fn resolve_endpoints(g: &Graph, from_id: &str, to_id: &str) -> Result<(usize, usize), AStarError> {
    let from = g
        .index_of(from_id)
        .ok_or_else(|| AStarError::InvalidReference(from_id.to_string()))?;
    let to = g
        .index_of(to_id)
        .ok_or_else(|| AStarError::InvalidReference(to_id.to_string()))?;
    Ok((from, to))
}

fn reconstruct_path<'a>(
    g: &'a Graph,
    came_from: &HashMap<usize, usize>,
    mut last: usize,
) -> Route<'a> {
    let mut path = vec![g.node_at(last)];

    while let Some(&idx) = came_from.get(&last) {
        path.push(g.node_at(idx));
        last = idx;
    }

    path.reverse();
    Route(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{earth_distance, Way};

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    type Finder = for<'a> fn(&'a Graph, &str, &str, usize) -> Result<Route<'a>, AStarError>;

    const FINDERS: [(&str, Finder); 2] = [("heap", find_route), ("linear", find_route_linear)];

    fn add_way(g: &mut Graph, id: i64, nodes: &[&str], oneway: bool) {
        let tags = if oneway {
            HashMap::from([("oneway".to_string(), "yes".to_string())])
        } else {
            HashMap::default()
        };
        g.add_way(Way {
            id,
            nodes: nodes.iter().map(|s| s.to_string()).collect(),
            tags,
        });
    }

    fn chain_graph() -> Graph {
        let mut g = Graph::new();
        g.add_node("A", 55.000, 37.000);
        g.add_node("B", 55.001, 37.001);
        g.add_node("C", 55.002, 37.002);
        add_way(&mut g, 1, &["A", "B", "C"], false);
        g
    }

    fn grid_graph(size: usize) -> Graph {
        //  0_0 ── 0_1 ── 0_2 ...
        //   │      │      │
        //  1_0 ── 1_1 ── 1_2 ...
        //   ⋮      ⋮      ⋮
        let mut g = Graph::new();
        for r in 0..size {
            for c in 0..size {
                g.add_node(format!("{r}_{c}"), 52.0 + r as f64 * 0.001, 21.0 + c as f64 * 0.001);
            }
        }

        let mut way_id = 0;
        for r in 0..size {
            let row: Vec<String> = (0..size).map(|c| format!("{r}_{c}")).collect();
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            way_id += 1;
            add_way(&mut g, way_id, &row, false);
        }
        for c in 0..size {
            let col: Vec<String> = (0..size).map(|r| format!("{r}_{c}")).collect();
            let col: Vec<&str> = col.iter().map(String::as_str).collect();
            way_id += 1;
            add_way(&mut g, way_id, &col, false);
        }
        g
    }

    #[test]
    fn chain() {
        let g = chain_graph();

        for (name, finder) in FINDERS {
            let route = finder(&g, "A", "C", DEFAULT_STEP_LIMIT).unwrap();
            assert_eq!(
                route.coordinates(),
                [(55.000, 37.000), (55.001, 37.001), (55.002, 37.002)],
                "{name}",
            );
            assert_eq!(route.ids().collect::<Vec<_>>(), ["A", "B", "C"], "{name}");
            assert_almost_eq!(
                route.cost(),
                earth_distance(55.000, 37.000, 55.001, 37.001)
                    + earth_distance(55.001, 37.001, 55.002, 37.002)
            );
        }
    }

    #[test]
    fn chain_is_cheapest() {
        // A shortcut A → D → C exists, but it is longer than A → B → C
        let mut g = chain_graph();
        g.add_node("D", 55.0015, 36.999);
        add_way(&mut g, 2, &["A", "D", "C"], false);

        for (name, finder) in FINDERS {
            let route = finder(&g, "A", "C", DEFAULT_STEP_LIMIT).unwrap();
            assert_eq!(route.ids().collect::<Vec<_>>(), ["A", "B", "C"], "{name}");
            assert!(route.cost() <= route_cost(&g, &["A", "D", "C"]), "{name}");
        }
    }

    #[test]
    fn same_start_and_end() {
        let g = chain_graph();

        for (name, finder) in FINDERS {
            let route = finder(&g, "B", "B", DEFAULT_STEP_LIMIT).unwrap();
            assert_eq!(route.coordinates(), [(55.001, 37.001)], "{name}");
            assert_eq!(route.cost(), 0.0, "{name}");
        }
    }

    #[test]
    fn isolated_start_and_end() {
        let mut g = Graph::new();
        g.add_node("lonely", 0.0, 0.0);

        for (name, finder) in FINDERS {
            let route = finder(&g, "lonely", "lonely", DEFAULT_STEP_LIMIT).unwrap();
            assert_eq!(route.len(), 1, "{name}");
        }
    }

    #[test]
    fn invalid_reference() {
        let g = chain_graph();

        for (name, finder) in FINDERS {
            assert_eq!(
                finder(&g, "A", "Z", DEFAULT_STEP_LIMIT),
                Err(AStarError::InvalidReference("Z".to_string())),
                "{name}",
            );
            assert_eq!(
                finder(&g, "Z", "A", DEFAULT_STEP_LIMIT),
                Err(AStarError::InvalidReference("Z".to_string())),
                "{name}",
            );
        }
    }

    #[test]
    fn disjoint_components() {
        let mut g = chain_graph();
        g.add_node("X", 55.0, 37.0005);
        g.add_node("Y", 55.0, 37.0010);
        add_way(&mut g, 2, &["X", "Y"], false);

        for (name, finder) in FINDERS {
            assert_eq!(finder(&g, "A", "Y", DEFAULT_STEP_LIMIT), Err(AStarError::NoRoute), "{name}");
            assert_eq!(finder(&g, "X", "C", DEFAULT_STEP_LIMIT), Err(AStarError::NoRoute), "{name}");
        }
    }

    #[test]
    fn oneway_is_respected() {
        let mut g = Graph::new();
        g.add_node("A", 0.0, 0.0);
        g.add_node("B", 0.0, 0.001);
        g.add_node("C", 0.001, 0.0005);
        add_way(&mut g, 1, &["A", "B"], true);
        add_way(&mut g, 2, &["B", "C", "A"], false);

        for (name, finder) in FINDERS {
            let forward = finder(&g, "A", "B", DEFAULT_STEP_LIMIT).unwrap();
            assert_eq!(forward.ids().collect::<Vec<_>>(), ["A", "B"], "{name}");

            let backward = finder(&g, "B", "A", DEFAULT_STEP_LIMIT).unwrap();
            assert_eq!(backward.ids().collect::<Vec<_>>(), ["B", "C", "A"], "{name}");
        }
    }

    #[test]
    fn oneway_dead_end() {
        let mut g = Graph::new();
        g.add_node("A", 0.0, 0.0);
        g.add_node("B", 0.0, 0.001);
        add_way(&mut g, 1, &["A", "B"], true);

        for (name, finder) in FINDERS {
            assert_eq!(finder(&g, "B", "A", DEFAULT_STEP_LIMIT), Err(AStarError::NoRoute), "{name}");
        }
    }

    #[test]
    fn step_limit() {
        let g = grid_graph(5);

        for (name, finder) in FINDERS {
            assert_eq!(
                finder(&g, "0_0", "4_4", 3),
                Err(AStarError::StepLimitExceeded),
                "{name}",
            );
            assert!(finder(&g, "0_0", "4_4", DEFAULT_STEP_LIMIT).is_ok(), "{name}");
        }
    }

    #[test]
    fn heap_and_linear_costs_agree() {
        let g = grid_graph(8);
        let ids: Vec<&str> = g.iter().map(|n| n.id.as_str()).collect();

        for &from in ids.iter().step_by(5) {
            for &to in ids.iter().step_by(7) {
                let heap = find_route(&g, from, to, DEFAULT_STEP_LIMIT).unwrap();
                let linear = find_route_linear(&g, from, to, DEFAULT_STEP_LIMIT).unwrap();

                assert_eq!(heap.nodes().first().unwrap().id, from);
                assert_eq!(heap.nodes().last().unwrap().id, to);
                assert_eq!(heap.len(), linear.len(), "{from} → {to}");
                assert_almost_eq!(heap.cost(), linear.cost());
            }
        }
    }

    #[test]
    fn equally_short_routes() {
        //      B
        //    ╱   ╲
        //  A       D   (equator)
        //    ╲   ╱
        //      C
        let mut g = Graph::new();
        g.add_node("A", 0.0, 0.0);
        g.add_node("B", 0.001, 0.001);
        g.add_node("C", -0.001, 0.001);
        g.add_node("D", 0.0, 0.002);
        add_way(&mut g, 1, &["A", "B", "D"], false);
        add_way(&mut g, 2, &["A", "C", "D"], false);

        assert_eq!(route_cost(&g, &["A", "B", "D"]), route_cost(&g, &["A", "C", "D"]));

        let heap = find_route(&g, "A", "D", DEFAULT_STEP_LIMIT).unwrap();
        let linear = find_route_linear(&g, "A", "D", DEFAULT_STEP_LIMIT).unwrap();

        for route in [&heap, &linear] {
            let ids: Vec<&str> = route.ids().collect();
            assert!(ids == ["A", "B", "D"] || ids == ["A", "C", "D"], "{ids:?}");
        }
        assert_eq!(heap.cost(), linear.cost());
    }

    #[test]
    fn route_follows_edges() {
        let g = grid_graph(6);
        let route = find_route(&g, "5_0", "0_5", DEFAULT_STEP_LIMIT).unwrap();
        let ids: Vec<&str> = route.ids().collect();

        assert_eq!(ids.len(), 11);
        assert_almost_eq!(route_cost(&g, &ids), route.cost());
    }

    #[test]
    fn route_cost_without_edge() {
        let g = chain_graph();
        assert!(route_cost(&g, &["A", "C"]).is_infinite());
        assert_eq!(route_cost(&g, &["A"]), 0.0);
    }
}
