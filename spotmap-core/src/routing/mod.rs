//! Road-following route geometry.
//!
//! Stop sequences are straight lines between stops. A `PathRefiner` may snap
//! them to the road network; callers treat any refiner error as "keep the
//! straight line".

pub mod osrm;

use geo::LineString;

use crate::Error;

pub use osrm::{OsrmClient, OsrmConfig};

/// Turns an ordered stop sequence into a road-following polyline
pub trait PathRefiner {
    /// # Errors
    ///
    /// Any failure to produce a usable polyline
    fn refine(&self, stops: &LineString<f64>) -> Result<LineString<f64>, Error>;
}

/// Offline refiner returning the stop sequence unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl PathRefiner for StraightLine {
    fn refine(&self, stops: &LineString<f64>) -> Result<LineString<f64>, Error> {
        Ok(stops.clone())
    }
}

/// Refines `stops`, falling back to the straight stop sequence on failure
pub fn refine_or_straight(
    refiner: &dyn PathRefiner,
    stops: &LineString<f64>,
    label: &str,
) -> LineString<f64> {
    match refiner.refine(stops) {
        Ok(path) => path,
        Err(e) => {
            log::warn!("Routing failed for {label}, drawing straight stop sequence: {e}");
            stops.clone()
        }
    }
}

#[cfg(test)]
mod test {
    use geo::line_string;

    use super::*;

    struct Unreachable;

    impl PathRefiner for Unreachable {
        fn refine(&self, _stops: &LineString<f64>) -> Result<LineString<f64>, Error> {
            Err(Error::RoutingError("connection refused".to_string()))
        }
    }

    #[test]
    fn failure_falls_back_to_stops() {
        let stops = line_string![(x: 120.651, y: 24.151), (x: 120.700, y: 24.160)];
        assert_eq!(refine_or_straight(&Unreachable, &stops, "300"), stops);
        assert_eq!(refine_or_straight(&StraightLine, &stops, "300"), stops);
    }
}
