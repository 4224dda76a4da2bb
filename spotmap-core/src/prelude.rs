pub use crate::Error;
pub use crate::loading::{AnalysisConfig, BoundingBox, SiteAnalysis, build_site_analysis};
pub use crate::{DEFAULT_CATCHMENT_KM, DEFAULT_ROAD_MATCH_KM};

// Pipeline stages
pub use crate::algo::{LineMatch, RadiusScale, SpotRoutes, correlate, match_line_spots};
pub use crate::export::{export_stop_table, export_travel_times};
pub use crate::render::{MapLayer, RouteLayer, SiteMap};

// Road-following paths
pub use crate::routing::{OsrmClient, OsrmConfig, PathRefiner, StraightLine};

// Core data types
pub use crate::model::{Direction, RoadSegment, RouteGroup, Spot, StopRecord, StopTable};
