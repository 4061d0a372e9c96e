use std::error::Error;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use roadgraph::overpass::{self, BoundingBox};
use roadgraph::{AStarError, Graph, KDTree};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] overpass::Error);

/// A "lat,lon" pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    lat: f64,
    lon: f64,
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got {s:?}"))?;
        let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
        let lon = lon.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
        Ok(Self { lat, lon })
    }
}

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find routes between consecutive waypoints and print them as GeoJSON
    Route {
        /// The path to a saved Overpass API JSON response (optionally gzip or bzip2 compressed)
        overpass_file: PathBuf,

        /// Waypoint to visit, as "lat,lon". Repeat for every waypoint, in order (at least two).
        #[arg(
            short = 'w',
            long = "waypoint",
            value_name = "LAT,LON",
            allow_hyphen_values = true
        )]
        waypoints: Vec<Position>,

        /// Maximum number of node expansions per leg
        #[arg(long, default_value_t = roadgraph::DEFAULT_STEP_LIMIT)]
        step_limit: usize,
    },

    /// Print the Overpass QL query fetching routable ways within a bounding box
    Query {
        #[arg(long, allow_negative_numbers = true)]
        north: f64,

        #[arg(long, allow_negative_numbers = true)]
        south: f64,

        #[arg(long, allow_negative_numbers = true)]
        east: f64,

        #[arg(long, allow_negative_numbers = true)]
        west: f64,
    },
}

impl Cli {
    fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        if let Command::Route { waypoints, .. } = &cli.command {
            if waypoints.len() < 2 {
                return Err(Self::command().error(
                    ErrorKind::TooFewValues,
                    "at least two --waypoint values are required",
                ));
            }
        }
        Ok(cli)
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    match cli.command {
        Command::Route {
            overpass_file,
            waypoints,
            step_limit,
        } => route(&overpass_file, &waypoints, step_limit),

        Command::Query {
            north,
            south,
            east,
            west,
        } => {
            let bbox = BoundingBox {
                north,
                south,
                east,
                west,
            };
            if !bbox.is_valid() {
                return Err(overpass::Error::InvalidBoundingBox(bbox).into());
            }
            print!("{}", bbox.overpass_query());
            Ok(())
        }
    }
}

fn route(path: &Path, waypoints: &[Position], step_limit: usize) -> Result<(), Box<dyn Error>> {
    let g = load_graph(path)?;
    let tree = KDTree::from_graph(&g).ok_or("no routable ways in the overpass response")?;

    let mut features = Vec::default();
    for (leg, pair) in waypoints.windows(2).enumerate() {
        let start = tree.find_nearest_node(pair[0].lat, pair[0].lon);
        let end = tree.find_nearest_node(pair[1].lat, pair[1].lon);
        log::info!("leg {}: searching route {} → {}", leg + 1, start.id, end.id);

        let route = match roadgraph::find_route(&g, &start.id, &end.id, step_limit) {
            Ok(route) => route,
            Err(e @ (AStarError::NoRoute | AStarError::StepLimitExceeded)) => {
                log::warn!("leg {}: {} → {}: {}", leg + 1, start.id, end.id, e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        log::info!("leg {}: found route with {} nodes", leg + 1, route.len());

        let coordinates: Vec<[f64; 2]> = route
            .coordinates()
            .into_iter()
            .map(|(lat, lon)| [lon, lat])
            .collect();

        features.push(json!({
            "type": "Feature",
            "properties": {
                "leg": leg + 1,
                "from": start.id,
                "to": end.id,
                "nodes": route.len(),
                "length_km": route.cost(),
            },
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
        }));
    }

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    println!("{}", serde_json::to_string_pretty(&collection)?);

    Ok(())
}

fn load_graph(path: &Path) -> Result<Graph, GraphLoadError> {
    let mut g = Graph::default();
    let options = overpass::Options::default();
    match overpass::add_features_from_file(&mut g, &options, path) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path), e)),
    }
}
