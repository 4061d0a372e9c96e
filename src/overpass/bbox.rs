// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Values of the [highway](https://wiki.openstreetmap.org/wiki/Key:highway) tag
/// of ways requested by [BoundingBox::overpass_query].
pub const ROUTABLE_HIGHWAYS: &[&str] = &[
    "primary",
    "secondary",
    "tertiary",
    "residential",
    "trunk",
    "motorway",
    "unclassified",
];

/// Rectangle scoping which ways are fetched, in degrees.
///
/// Boxes crossing the ante meridian (`west > east`) are not supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Returns true if all edges are finite, within the valid latitude/longitude ranges,
    /// and `south <= north` and `west <= east`.
    pub fn is_valid(&self) -> bool {
        let lats_ok = [self.north, self.south]
            .iter()
            .all(|lat| lat.is_finite() && (-90.0..=90.0).contains(lat));
        let lons_ok = [self.east, self.west]
            .iter()
            .all(|lon| lon.is_finite() && (-180.0..=180.0).contains(lon));
        lats_ok && lons_ok && self.south <= self.north && self.west <= self.east
    }

    /// Returns true if a position lies inside the box (edges included).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.south && lat <= self.north && lon >= self.west && lon <= self.east
    }

    /// Builds an [Overpass QL](https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL)
    /// query fetching all [routable](ROUTABLE_HIGHWAYS) ways within the box,
    /// together with their geometry, as JSON.
    ///
    /// The response of this query can be loaded with
    /// [add_features_from_buffer](super::add_features_from_buffer) and friends.
    pub fn overpass_query(&self) -> String {
        let mut q = String::from("[out:json][timeout:30];\n(\n");
        q.push_str(&format!(
            "  way[\"highway\"~\"^({})$\"]({},{},{},{});\n",
            ROUTABLE_HIGHWAYS.join("|"),
            self.south,
            self.west,
            self.north,
            self.east,
        ));
        q.push_str(");\nout geom;\n");
        q
    }
}
