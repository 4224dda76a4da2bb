//! Turning line-type spots into road polylines.
//!
//! A shopping street or a riverside park is better judged by the road it
//! lines than by a single pin. For configured spot names, every road section
//! with a vertex inside the match threshold is merged into one vertex
//! sequence that replaces the spot's point for proximity checks.

use geo::{Coord, LineString, Point};
use hashbrown::HashSet;
use log::{info, warn};

use crate::model::{RoadSegment, Spot};

/// Result of matching one line-type spot against the road network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// Spot now carries `vertices` road vertices from `segments` sections
    Matched { segments: usize, vertices: usize },
    /// No section came close enough; the spot stays a point
    NoMatch,
    /// The spot has no location to match from
    NoLocation,
    /// No road data was loaded
    NoRoads,
}

/// Attaches matched road geometry to every spot named in `line_spots`.
///
/// Returns one outcome per line-type spot so callers can see which ones
/// fell back to point representation.
pub fn match_line_spots(
    spots: &mut [Spot],
    roads: &[RoadSegment],
    line_spots: &HashSet<String>,
    threshold_km: f64,
) -> Vec<(String, LineMatch)> {
    let mut outcomes = Vec::new();

    for spot in spots.iter_mut().filter(|s| line_spots.contains(&s.name)) {
        let outcome = match_spot(spot, roads, threshold_km);
        match &outcome {
            LineMatch::Matched { segments, vertices } => info!(
                "Matched '{}' to {segments} road sections with {vertices} vertices",
                spot.name
            ),
            LineMatch::NoMatch => warn!(
                "No road section within {threshold_km} km of '{}', using its point location",
                spot.name
            ),
            LineMatch::NoLocation => warn!(
                "'{}' has no location to match roads against, keeping it as a point",
                spot.name
            ),
            LineMatch::NoRoads => warn!("No road data loaded, '{}' stays a point", spot.name),
        }
        outcomes.push((spot.name.clone(), outcome));
    }

    outcomes
}

fn match_spot(spot: &mut Spot, roads: &[RoadSegment], threshold_km: f64) -> LineMatch {
    if roads.is_empty() {
        return LineMatch::NoRoads;
    }
    let Some(location) = spot.location else {
        return LineMatch::NoLocation;
    };

    let matched: Vec<&RoadSegment> = roads_near(location, roads, threshold_km).collect();

    if matched.is_empty() {
        return LineMatch::NoMatch;
    }

    let line = merge_vertices(&matched);
    let outcome = LineMatch::Matched {
        segments: matched.len(),
        vertices: line.0.len(),
    };
    spot.set_line(line);
    outcome
}

/// Concatenates section vertices, keeping only the first occurrence of each
pub fn merge_vertices(roads: &[&RoadSegment]) -> LineString<f64> {
    let mut seen: HashSet<(u64, u64)> = HashSet::new();

    roads
        .iter()
        .flat_map(|road| road.vertices())
        .filter(|p| seen.insert((p.x().to_bits(), p.y().to_bits())))
        .map(Coord::from)
        .collect()
}

/// Road sections with a vertex inside `threshold_km` of `location`
pub fn roads_near<'a>(
    location: Point<f64>,
    roads: &'a [RoadSegment],
    threshold_km: f64,
) -> impl Iterator<Item = &'a RoadSegment> {
    roads
        .iter()
        .filter(move |road| road.passes_near(location, threshold_km))
}
