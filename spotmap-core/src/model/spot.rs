//! Points of interest

use geo::{LineString, Point};

use crate::geodesy::{haversine_km, min_distance_km};

/// How a spot is represented for proximity judgments
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SpotGeometry {
    /// The spot's own location
    #[default]
    Point,
    /// Road vertices matched to the spot, never empty
    Line(LineString<f64>),
}

/// Tourist spot with its yearly visitor count
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    pub name: String,
    pub visitors: u64,
    /// `None` when the source record carried no usable coordinates
    pub location: Option<Point<f64>>,
    pub geometry: SpotGeometry,
}

impl Spot {
    pub fn new(name: impl Into<String>, visitors: u64, location: Option<Point<f64>>) -> Self {
        Self {
            name: name.into(),
            visitors,
            location,
            geometry: SpotGeometry::Point,
        }
    }

    /// A spot takes part in correlation and rendering only with a location
    /// and a positive visitor count.
    pub fn is_valid(&self) -> bool {
        self.location.is_some() && self.visitors > 0
    }

    pub fn is_line(&self) -> bool {
        matches!(self.geometry, SpotGeometry::Line(_))
    }

    pub fn line(&self) -> Option<&LineString<f64>> {
        match &self.geometry {
            SpotGeometry::Line(line) => Some(line),
            SpotGeometry::Point => None,
        }
    }

    /// Attaches matched road vertices. An empty vertex list leaves the spot
    /// point-based.
    pub fn set_line(&mut self, line: LineString<f64>) {
        self.geometry = if line.0.is_empty() {
            SpotGeometry::Point
        } else {
            SpotGeometry::Line(line)
        };
    }

    /// Distance in kilometers from `point` to the spot.
    ///
    /// Line-type spots measure to the nearest matched vertex, point spots to
    /// their location. `None` if the spot has neither.
    pub fn distance_km(&self, point: Point<f64>) -> Option<f64> {
        match &self.geometry {
            SpotGeometry::Line(line) => min_distance_km(point, line.points()),
            SpotGeometry::Point => self.location.map(|loc| haversine_km(loc, point)),
        }
    }

    /// Layer label with the visitor count in units of ten thousand
    pub fn label(&self) -> String {
        format!("{} ({}萬人)", self.name, self.visitors / 10_000)
    }
}
