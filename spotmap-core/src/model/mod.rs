//! Data model for the spot/route correlation pipeline
//!
//! Contains the points of interest, road segments and flattened stop tables
//! the loaders produce and the algorithms consume.

pub mod road;
pub mod spot;
pub mod stop;

pub use road::RoadSegment;
pub use spot::{Spot, SpotGeometry};
pub use stop::{Direction, RouteGroup, RouteKey, StopRecord, StopTable};
