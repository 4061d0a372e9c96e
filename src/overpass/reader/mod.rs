// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use graph_builder::GraphBuilder;

use super::BoundingBox;
use crate::Graph;

mod graph_builder;
pub mod model;

/// Format of a saved Overpass API response.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    #[default]
    Unknown,

    /// Force uncompressed JSON (`[out:json]`)
    Json,

    /// Force JSON with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    JsonGz,

    /// Force JSON with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    JsonBz2,
}

impl FileFormat {
    /// Guesses the format of data based on its first few bytes.
    /// Anything which isn't gzip or bzip2 compressed is assumed to be plain JSON.
    pub fn detect(head: &[u8]) -> Self {
        if head.starts_with(&[0x1f, 0x8b]) {
            Self::JsonGz
        } else if head.starts_with(b"BZh") {
            Self::JsonBz2
        } else {
            Self::Json
        }
    }
}

/// Additional controls for interpreting an Overpass response as a routing [Graph].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,

    /// Only add way nodes within a specific bounding box. Segments leading
    /// outside of the box are dropped. `None` adds all nodes.
    pub bbox: Option<BoundingBox>,
}

/// Error which can occur when loading an Overpass response into a [Graph].
///
/// Whenever an error is returned, the [Graph] is left exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("way {way_id}: invalid position #{position}: ({lat}, {lon})")]
    InvalidCoordinate {
        way_id: i64,
        position: usize,
        lat: f64,
        lon: f64,
    },

    #[error("invalid bounding box: {0:?}")]
    InvalidBoundingBox(BoundingBox),
}

/// Add all ways from an already-decoded Overpass [Response](model::Response)
/// into a [Graph] as per the provided [Options].
///
/// Only elements of type "way" with a non-empty geometry are used. Every position
/// of a way becomes a node with id `"{way_id}_{position}"`. Nodes are **not** shared
/// between ways, even if they have the same coordinates - ways meeting at an
/// intersection are not connected in the resulting graph.
pub fn add_response(g: &mut Graph, options: &Options, r: &model::Response) -> Result<(), Error> {
    GraphBuilder::new(g, options)?.add_response(r)
}

/// Parse an Overpass response from a reader into a [Graph] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_features_from_io<R: io::Read>(
    g: &mut Graph,
    options: &Options,
    reader: R,
) -> Result<(), Error> {
    let mut b = io::BufReader::new(reader);

    let file_format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(b.fill_buf()?),
        f => f,
    };
    log::debug!("reading overpass response as {:?}", file_format);

    let r: model::Response = match file_format {
        FileFormat::Unknown | FileFormat::Json => serde_json::from_reader(b)?,

        FileFormat::JsonGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }

        FileFormat::JsonBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            serde_json::from_reader(io::BufReader::new(d))?
        }
    };

    add_response(g, options, &r)
}

/// Parse an Overpass response from a file at the provided path into a [Graph]
/// as per the provided [Options].
pub fn add_features_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    options: &Options,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_features_from_io(g, options, f)
}

/// Parse an Overpass response from a static buffer into a [Graph] as per the provided [Options].
pub fn add_features_from_buffer(
    g: &mut Graph,
    options: &Options,
    data: &[u8],
) -> Result<(), Error> {
    let file_format = match options.file_format {
        FileFormat::Unknown => FileFormat::detect(data),
        f => f,
    };

    if file_format == FileFormat::Json {
        // Fast path is available for in-memory JSON data
        let r: model::Response = serde_json::from_slice(data)?;
        add_response(g, options, &r)
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let options = Options {
            file_format,
            ..*options
        };
        add_features_from_io(g, &options, io::Cursor::new(data))
    }
}
