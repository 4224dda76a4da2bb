//! Correlates tourist spots with the bus routes stopping near them and
//! renders the result as an interactive map.

pub mod algo;
pub mod error;
pub mod export;
pub mod geodesy;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod render;
pub mod routing;

pub use error::Error;
pub use geodesy::haversine_km;
pub use loading::{AnalysisConfig, BoundingBox, SiteAnalysis, build_site_analysis};
pub use model::{RoadSegment, RouteGroup, Spot, StopRecord, StopTable};
pub use render::SiteMap;

/// Distance in kilometers within which a stop serves a spot
pub const DEFAULT_CATCHMENT_KM: f64 = 0.5;
/// Distance in kilometers within which a road section lines a spot
pub const DEFAULT_ROAD_MATCH_KM: f64 = 1.0;
