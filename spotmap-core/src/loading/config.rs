use std::path::PathBuf;

use geo::{Point, Rect, coord};
use hashbrown::HashSet;

use crate::{DEFAULT_CATCHMENT_KM, DEFAULT_ROAD_MATCH_KM};

/// Inclusive latitude/longitude rectangle used to prefilter stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    rect: Rect<f64>,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            rect: Rect::new(
                coord! { x: min_lon, y: min_lat },
                coord! { x: max_lon, y: max_lat },
            ),
        }
    }

    /// Greater Taichung area
    pub fn taichung() -> Self {
        Self::new(24.0, 24.5, 120.4, 120.9)
    }

    pub fn rect(&self) -> Rect<f64> {
        self.rect
    }

    /// Edges count as inside
    pub fn contains(&self, point: Point<f64>) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        (min.x..=max.x).contains(&point.x()) && (min.y..=max.y).contains(&point.y())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::taichung()
    }
}

/// Inputs and thresholds of one site analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub spots_path: PathBuf,
    /// Tried when `spots_path` cannot be read
    pub spots_fallback_path: Option<PathBuf>,
    pub roads_path: Option<PathBuf>,
    pub routes_path: PathBuf,
    /// Spots better represented by the road they line than by a point
    pub line_spots: HashSet<String>,
    pub road_match_km: f64,
    pub catchment_km: f64,
    pub bbox: BoundingBox,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spots_path: PathBuf::from("data/merged_data/tourist_spot.json"),
            spots_fallback_path: Some(PathBuf::from("data/tourism_spot.json")),
            roads_path: Some(PathBuf::from("data/taichung_road.json")),
            routes_path: PathBuf::from("data/merged_data/intercity_routes.json"),
            line_spots: HashSet::from_iter(["公益路商圈".to_string()]),
            road_match_km: DEFAULT_ROAD_MATCH_KM,
            catchment_km: DEFAULT_CATCHMENT_KM,
            bbox: BoundingBox::taichung(),
        }
    }
}
