use geo::{LineString, Point};
use log::{debug, info};

use super::palette::route_color;
use crate::{
    algo::{RadiusScale, SpotRoutes},
    model::{Direction, RouteGroup},
    routing::{PathRefiner, refine_or_straight},
};

/// Map center when no spot is valid
pub const DEFAULT_CENTER: Point<f64> = Point(geo::Coord { x: 120.66, y: 24.16 });
pub const DEFAULT_ZOOM: u8 = 13;
pub const SPOTS_ZOOM: u8 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct StopMarker {
    pub name: Option<String>,
    pub location: Point<f64>,
}

/// One correlated route group as drawn inside a spot layer
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayer {
    pub route_name: String,
    pub direction: Direction,
    pub color: &'static str,
    pub path: LineString<f64>,
    pub stops: Vec<StopMarker>,
}

/// Togglable layer of one spot
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub name: String,
    pub spot_name: String,
    pub visitors: u64,
    pub location: Point<f64>,
    pub radius_m: f64,
    pub routes: Vec<RouteLayer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteMap {
    pub center: Point<f64>,
    pub zoom: u8,
    pub layers: Vec<MapLayer>,
}

impl SiteMap {
    /// Builds one layer per correlated spot.
    ///
    /// Every route path goes through `refiner`; a failed refinement keeps the
    /// straight stop sequence. Groups with fewer than two stops have no path
    /// and are left off the map.
    pub fn build(
        correlations: &[SpotRoutes<'_>],
        scale: &RadiusScale,
        refiner: &dyn PathRefiner,
    ) -> Self {
        let layers: Vec<MapLayer> = correlations
            .iter()
            .filter_map(|entry| {
                let location = entry.spot.location?;
                info!("Processing {} ({} visitors)", entry.spot.name, entry.spot.visitors);

                let routes = entry
                    .routes
                    .iter()
                    .filter_map(|group| route_layer(group, refiner))
                    .collect();

                Some(MapLayer {
                    name: entry.spot.label(),
                    spot_name: entry.spot.name.clone(),
                    visitors: entry.spot.visitors,
                    location,
                    radius_m: scale.radius_m(entry.spot.visitors),
                    routes,
                })
            })
            .collect();

        let (center, zoom) = match mean_location(&layers) {
            Some(center) => (center, SPOTS_ZOOM),
            None => (DEFAULT_CENTER, DEFAULT_ZOOM),
        };

        Self {
            center,
            zoom,
            layers,
        }
    }
}

fn route_layer(group: &RouteGroup, refiner: &dyn PathRefiner) -> Option<RouteLayer> {
    let stops_line = group.straight_path();
    if stops_line.0.len() < 2 {
        debug!("Skipping {} with a single stop", group.key);
        return None;
    }
    let path = refine_or_straight(refiner, &stops_line, &group.key.to_string());

    Some(RouteLayer {
        route_name: group.route_name().to_string(),
        direction: group.direction(),
        color: route_color(group.route_name()),
        path,
        stops: group
            .stops()
            .iter()
            .map(|s| StopMarker {
                name: s.stop_name.clone(),
                location: s.location,
            })
            .collect(),
    })
}

#[allow(clippy::cast_precision_loss)]
fn mean_location(layers: &[MapLayer]) -> Option<Point<f64>> {
    if layers.is_empty() {
        return None;
    }
    let n = layers.len() as f64;
    let (x, y) = layers.iter().fold((0.0, 0.0), |(x, y), layer| {
        (x + layer.location.x(), y + layer.location.y())
    });
    Some(Point::new(x / n, y / n))
}
