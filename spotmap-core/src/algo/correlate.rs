//! Spot-to-route correlation by stop proximity.
//!
//! A route group serves a spot when any of its stops is inside the
//! catchment radius, measured to the spot's matched road line when it has one
//! and to its point otherwise. This is a plain scan over every spot, group
//! and stop; a spatial index over stops is the place to start if city-scale
//! inputs ever stop being enough.

use log::debug;

use crate::model::{RouteGroup, Spot};

/// Route groups serving one spot, in group order
#[derive(Debug, Clone)]
pub struct SpotRoutes<'a> {
    pub spot: &'a Spot,
    pub routes: Vec<&'a RouteGroup>,
}

/// True if any stop of `group` is within `catchment_km` of `spot`
pub fn is_relevant(spot: &Spot, group: &RouteGroup, catchment_km: f64) -> bool {
    nearest_stop_km(spot, group).is_some_and(|d| d <= catchment_km)
}

/// Distance from `spot` to the closest stop of `group`
pub fn nearest_stop_km(spot: &Spot, group: &RouteGroup) -> Option<f64> {
    group
        .points()
        .filter_map(|stop| spot.distance_km(stop))
        .min_by(f64::total_cmp)
}

/// Pairs every valid spot with the route groups that serve it.
///
/// Invalid spots (no location or no visitors) are left out entirely.
pub fn correlate<'a>(
    spots: &'a [Spot],
    groups: &'a [RouteGroup],
    catchment_km: f64,
) -> Vec<SpotRoutes<'a>> {
    spots
        .iter()
        .filter(|spot| spot.is_valid())
        .map(|spot| {
            let routes: Vec<&RouteGroup> = groups
                .iter()
                .filter(|group| is_relevant(spot, group, catchment_km))
                .collect();
            debug!(
                "'{}' is served by {} of {} route groups",
                spot.name,
                routes.len(),
                groups.len()
            );
            SpotRoutes { spot, routes }
        })
        .collect()
}
