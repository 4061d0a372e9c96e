// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level object of an Overpass API JSON response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Single [OSM element](https://wiki.openstreetmap.org/wiki/Elements) of a [Response].
///
/// Only the fields required for routing are decoded; anything else
/// (bounds, member lists, node positions, metadata) is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    /// Kind of the element: "node", "way" or "relation".
    #[serde(rename = "type")]
    pub type_: String,

    pub id: i64,

    /// Positions of way nodes, as returned by `out geom`.
    /// Overpass uses `null` for nodes clipped by a bounding box.
    #[serde(default)]
    pub geometry: Vec<Option<Point>>,

    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Element {
    /// Returns true if this element is a way with at least one position.
    pub fn is_way_with_geometry(&self) -> bool {
        self.type_ == "way" && self.geometry.iter().any(Option::is_some)
    }
}

/// Position of a way node, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}
