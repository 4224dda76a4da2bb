use log::info;

use super::config::AnalysisConfig;
use super::roads::load_roads;
use super::spots::load_spots_with_fallback;
use super::stops::load_stop_table;
use crate::{
    Error,
    algo::{LineMatch, RadiusScale, SpotRoutes, correlate, match_line_spots},
    model::{RouteGroup, Spot, StopTable},
    render::SiteMap,
    routing::PathRefiner,
};

/// Everything loaded and matched for one analysis run
#[derive(Debug, Clone)]
pub struct SiteAnalysis {
    pub spots: Vec<Spot>,
    pub stops: StopTable,
    pub groups: Vec<RouteGroup>,
    /// Outcome for every configured line-type spot found in the input
    pub line_matches: Vec<(String, LineMatch)>,
    pub catchment_km: f64,
}

impl SiteAnalysis {
    pub fn correlations(&self) -> Vec<SpotRoutes<'_>> {
        correlate(&self.spots, &self.groups, self.catchment_km)
    }

    pub fn radius_scale(&self) -> RadiusScale {
        RadiusScale::from_spots(&self.spots)
    }

    pub fn valid_spots(&self) -> impl Iterator<Item = &Spot> {
        self.spots.iter().filter(|s| s.is_valid())
    }

    /// Correlates spots with route groups and lays out the map
    pub fn site_map(&self, refiner: &dyn PathRefiner) -> SiteMap {
        let correlations = self.correlations();
        let served = correlations.iter().filter(|c| !c.routes.is_empty()).count();
        info!(
            "{served} of {} valid spots are served by at least one route",
            correlations.len()
        );
        SiteMap::build(&correlations, &self.radius_scale(), refiner)
    }
}

/// Loads spots, roads and route stops and matches line-type spots to roads.
///
/// # Errors
///
/// Returns an error if neither spot file nor the routes file can be read.
/// Road data is optional and only degrades line-type spots to points.
pub fn build_site_analysis(config: &AnalysisConfig) -> Result<SiteAnalysis, Error> {
    validate_config(config)?;

    info!("Loading tourist spots");
    let mut spots = load_spots_with_fallback(
        &config.spots_path,
        config.spots_fallback_path.as_deref(),
    )?;

    let line_matches = if config.line_spots.is_empty() {
        Vec::new()
    } else {
        let roads = load_roads(config.roads_path.as_deref());
        match_line_spots(&mut spots, &roads, &config.line_spots, config.road_match_km)
    };

    info!("Loading route stops: {}", config.routes_path.display());
    let stops = load_stop_table(&config.routes_path, &config.bbox)?;
    let groups = stops.route_groups();
    info!(
        "Built {} route groups from {} stops",
        groups.len(),
        stops.len()
    );

    let valid = spots.iter().filter(|s| s.is_valid()).count();
    if valid < spots.len() {
        log::warn!(
            "{} of {} spots have no location or visitors and are skipped",
            spots.len() - valid,
            spots.len()
        );
    }

    Ok(SiteAnalysis {
        spots,
        stops,
        groups,
        line_matches,
        catchment_km: config.catchment_km,
    })
}

fn validate_config(config: &AnalysisConfig) -> Result<(), Error> {
    for (name, value) in [
        ("catchment", config.catchment_km),
        ("road match", config.road_match_km),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidData(format!(
                "The {name} distance must be a non-negative number of kilometers, got {value}"
            )));
        }
    }
    Ok(())
}
