// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading street geometry returned by the [Overpass API](https://wiki.openstreetmap.org/wiki/Overpass_API)
//! into a [Graph](crate::Graph).
//!
//! Fetching the data is left to the caller: [BoundingBox::overpass_query] builds the query,
//! and the JSON response (optionally compressed) is consumed by [add_features_from_io],
//! [add_features_from_file] or [add_features_from_buffer].

mod bbox;
mod reader;

pub use bbox::{BoundingBox, ROUTABLE_HIGHWAYS};
pub use reader::model::{Element, Point, Response};
pub use reader::{
    add_features_from_buffer, add_features_from_file, add_features_from_io, add_response, Error,
    FileFormat, Options,
};
