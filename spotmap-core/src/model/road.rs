//! Road section shapes

use geo::{LineString, Point};
use wkt::TryFromWkt;

use crate::Error;
use crate::geodesy::haversine_km;

/// Road polyline parsed from a WKT `LINESTRING`
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    geometry: LineString<f64>,
}

impl RoadSegment {
    pub fn new(geometry: LineString<f64>) -> Self {
        Self { geometry }
    }

    /// Parses `LINESTRING(lon lat, lon lat, ...)`
    pub fn from_wkt(wkt: &str) -> Result<Self, Error> {
        let geometry = LineString::<f64>::try_from_wkt_str(wkt.trim())
            .map_err(|e| Error::InvalidData(format!("Failed to parse road WKT: {e}")))?;
        Ok(Self { geometry })
    }

    pub fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }

    pub fn vertices(&self) -> impl Iterator<Item = Point<f64>> + '_ {
        self.geometry.points()
    }

    pub fn len(&self) -> usize {
        self.geometry.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// True if any vertex lies within `threshold_km` of `point`.
    ///
    /// This is point-to-vertex, not point-to-segment: a long straight
    /// section passing close to `point` between two distant vertices does
    /// not count.
    pub fn passes_near(&self, point: Point<f64>, threshold_km: f64) -> bool {
        self.vertices()
            .any(|v| haversine_km(point, v) <= threshold_km)
    }
}
