//! This module is responsible for loading tourist spots, road sections and
//! route stops from their JSON exports and assembling a site analysis.

mod builder;
mod config;
pub mod fields;
mod roads;
mod spots;
mod stops;
mod travel_time;
mod visit_count;

pub use builder::{SiteAnalysis, build_site_analysis};
pub use config::{AnalysisConfig, BoundingBox};
pub use roads::{load_roads, parse_roads};
pub use spots::{load_spots, load_spots_with_fallback, parse_spots};
pub use stops::{FlattenStats, flatten_routes, load_stop_table};
pub use travel_time::{TravelTimeRow, flatten_travel_times, load_travel_times};
pub use visit_count::{parse_visit_count, visit_count_from_json};
