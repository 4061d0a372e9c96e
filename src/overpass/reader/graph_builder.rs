// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{Graph, Way};

use super::{
    model::{Element, Response},
    Error, Options,
};

/// Helper object used for converting an Overpass [Response] into a [Graph].
///
/// Conversion is all-or-nothing: the whole response is validated before the first node
/// is added, so a failed conversion leaves the graph untouched.
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    options: &'a Options,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(g: &'a mut Graph, options: &'a Options) -> Result<Self, Error> {
        if let Some(bbox) = options.bbox {
            if !bbox.is_valid() {
                return Err(Error::InvalidBoundingBox(bbox));
            }
        }
        Ok(Self { g, options })
    }

    /// Add all ways from the provided [Response].
    pub(super) fn add_response(&mut self, r: &Response) -> Result<(), Error> {
        let ways = r
            .elements
            .iter()
            .filter(|e| Self::is_routable(e))
            .collect::<Vec<_>>();

        ways.iter().try_for_each(|w| Self::validate_way(w))?;

        let nodes_before = self.g.len();
        let mut added_ways: usize = 0;
        for w in ways {
            if self.add_way(w) {
                added_ways += 1;
            }
        }

        log::info!(
            "loaded {} nodes and {} ways ({} elements in response)",
            self.g.len() - nodes_before,
            added_ways,
            r.elements.len(),
        );
        Ok(())
    }

    fn is_routable(e: &Element) -> bool {
        if e.type_ != "way" {
            log::trace!("skipping {} {}", e.type_, e.id);
            false
        } else if !e.is_way_with_geometry() {
            log::debug!("skipping way {} without geometry", e.id);
            false
        } else {
            true
        }
    }

    fn validate_way(e: &Element) -> Result<(), Error> {
        e.geometry
            .iter()
            .enumerate()
            .filter_map(|(position, pt)| pt.map(|pt| (position, pt)))
            .find(|(_, pt)| !pt.is_valid())
            .map_or(Ok(()), |(position, pt)| {
                Err(Error::InvalidCoordinate {
                    way_id: e.id,
                    position,
                    lat: pt.lat,
                    lon: pt.lon,
                })
            })
    }

    /// Adds nodes of a way and the way itself. Node ids are built from the way id
    /// and the position of the node within the way, so ways never share nodes.
    ///
    /// Positions which are missing (`null`) or outside of the bounding box don't produce
    /// nodes, but their ids are still kept in the way; [Graph::add_way] then skips the
    /// segments touching them. Returns false if the way had no nodes to add.
    fn add_way(&mut self, e: &Element) -> bool {
        let mut nodes = Vec::with_capacity(e.geometry.len());
        let mut any_present = false;

        for (position, pt) in e.geometry.iter().enumerate() {
            let id = format!("{}_{}", e.id, position);
            if let Some(pt) = pt {
                if self.is_in_bbox(pt.lat, pt.lon) {
                    self.g.add_node(id.clone(), pt.lat, pt.lon);
                    any_present = true;
                }
            }
            nodes.push(id);
        }

        if !any_present {
            log::debug!("skipping way {} outside of the bounding box", e.id);
            return false;
        }

        self.g.add_way(Way {
            id: e.id,
            nodes,
            tags: e.tags.clone(),
        });
        true
    }

    fn is_in_bbox(&self, lat: f64, lon: f64) -> bool {
        self.options.bbox.map_or(true, |bbox| bbox.contains(lat, lon))
    }
}
