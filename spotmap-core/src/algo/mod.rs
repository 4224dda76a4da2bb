//! Spatial algorithms of the pipeline

pub mod correlate;
pub mod radius;
pub mod road_match;

pub use correlate::{SpotRoutes, correlate, is_relevant, nearest_stop_km};
pub use radius::RadiusScale;
pub use road_match::{LineMatch, match_line_spots};
