//! Flattening nested route→stop records into a stop table

use std::fs;
use std::path::Path;

use geo::Point;
use log::{debug, info};
use serde_json::Value;

use super::config::BoundingBox;
use super::fields::{first_integer, first_number, first_text, lookup};
use crate::{
    Error,
    model::{Direction, StopRecord, StopTable},
};

const ROUTE_NAME_CHAIN: [&str; 3] = ["SubRouteName.Zh_tw", "RouteName.Zh_tw", "RouteUID"];
const STOP_NAME_CHAIN: [&str; 2] = ["StopName.Zh_tw", "StopName"];
const LAT_CHAIN: [&str; 2] = ["StopPosition.PositionLat", "StopPosition.positionlat"];
const LON_CHAIN: [&str; 2] = ["StopPosition.PositionLon", "StopPosition.positionlon"];

/// Why stops were left out of the table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlattenStats {
    pub kept: usize,
    pub missing_route: usize,
    pub bad_position: usize,
    pub outside_bbox: usize,
}

/// Loads and flattens the routes file
///
/// # Errors
///
/// Fails when the file cannot be read or is not a JSON array; there is
/// nothing to correlate without routes.
pub fn load_stop_table(path: &Path, bbox: &BoundingBox) -> Result<StopTable, Error> {
    let text = fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open routes file '{}': {}", path.display(), e),
        )
    })?;
    let json: Value = serde_json::from_str(&text)?;
    let (table, stats) = flatten_routes(&json, bbox)?;

    info!(
        "Flattened {} stops from {} (dropped: {} without route identity, {} with bad positions, {} outside the bounding box)",
        stats.kept,
        path.display(),
        stats.missing_route,
        stats.bad_position,
        stats.outside_bbox
    );
    Ok(table)
}

/// Expands route records into one row per (route, direction, stop).
///
/// Stops whose position does not coerce to numbers, or lies outside `bbox`,
/// are dropped. So are stops of records without a route name or direction,
/// since they cannot be grouped into a route.
pub fn flatten_routes(
    routes: &Value,
    bbox: &BoundingBox,
) -> Result<(StopTable, FlattenStats), Error> {
    let routes = routes
        .as_array()
        .ok_or_else(|| Error::InvalidData("Routes file is not a JSON array".to_string()))?;

    let mut stats = FlattenStats::default();
    let mut records = Vec::new();

    for route in routes {
        let stops = route_stops(route);
        let route_name = first_text(route, &ROUTE_NAME_CHAIN);
        let direction = first_integer(route, &["Direction"]).map(Direction);

        let (Some(route_name), Some(direction)) = (route_name, direction) else {
            debug!("Route record without name or direction, skipping {} stops", stops.len());
            stats.missing_route += stops.len();
            continue;
        };

        for stop in stops {
            let (Some(lat), Some(lon)) = (
                first_number(stop, &LAT_CHAIN),
                first_number(stop, &LON_CHAIN),
            ) else {
                stats.bad_position += 1;
                continue;
            };

            let location = Point::new(lon, lat);
            if !bbox.contains(location) {
                stats.outside_bbox += 1;
                continue;
            }

            records.push(StopRecord {
                route_name: route_name.clone(),
                direction,
                sequence: first_integer(stop, &["StopSequence"])
                    .and_then(|s| u32::try_from(s).ok()),
                stop_name: first_text(stop, &STOP_NAME_CHAIN),
                location,
            });
        }
    }

    stats.kept = records.len();
    Ok((StopTable::new(records), stats))
}

/// `Stops`, or `Stop` when `Stops` is absent or empty
fn route_stops(route: &Value) -> &[Value] {
    ["Stops", "Stop"]
        .iter()
        .filter_map(|key| lookup(route, key).and_then(Value::as_array))
        .find(|stops| !stops.is_empty())
        .map(Vec::as_slice)
        .unwrap_or_default()
}
