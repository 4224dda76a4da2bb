//! Client for an OSRM `route` service

use std::time::Duration;

use geo::{Coord, LineString};
use itertools::Itertools;
use log::{debug, trace};
use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use super::PathRefiner;
use crate::Error;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout: Duration,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    coordinates: Vec<Vec<f64>>,
}

/// Blocking OSRM client. One request per stop sequence, no retries.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base: Url,
    profile: String,
}

impl OsrmClient {
    pub fn new(config: &OsrmConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::RoutingError(format!("Failed to create HTTP client: {e}")))?;

        // a trailing slash keeps any base path when joining
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|e| Error::RoutingError(format!("Invalid routing base URL '{base}': {e}")))?;

        Ok(Self {
            client,
            base,
            profile: config.profile.clone(),
        })
    }

    /// `{base}/route/v1/{profile}/{lon},{lat};...?overview=full&geometries=geojson`
    pub fn route_url(&self, stops: &LineString<f64>) -> Result<Url, Error> {
        let locations = stops
            .coords()
            .map(|c| format!("{},{}", c.x, c.y))
            .join(";");

        let mut url = self
            .base
            .join(&format!("route/v1/{}/{locations}", self.profile))
            .map_err(|e| Error::RoutingError(format!("Failed to build route URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }
}

impl PathRefiner for OsrmClient {
    fn refine(&self, stops: &LineString<f64>) -> Result<LineString<f64>, Error> {
        if stops.0.len() < 2 {
            return Err(Error::InvalidData(
                "A route needs at least two stops".to_string(),
            ));
        }

        let url = self.route_url(stops)?;
        debug!("Requesting {url}");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RoutingError(format!(
                "Routing service returned {status}"
            )));
        }

        let response: RouteResponse = response.json()?;
        trace!("Response code {}, {} routes", response.code, response.routes.len());
        route_geometry(response)
    }
}

/// Extracts the first route's geometry from an OSRM response body
pub fn parse_route_response(body: &str) -> Result<LineString<f64>, Error> {
    route_geometry(serde_json::from_str(body)?)
}

fn route_geometry(response: RouteResponse) -> Result<LineString<f64>, Error> {

    if response.code != "Ok" {
        return Err(Error::RoutingError(format!(
            "Routing service answered {}: {}",
            response.code,
            response.message.unwrap_or_default()
        )));
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| Error::RoutingError("Response contains no routes".to_string()))?;

    let coords: Vec<Coord<f64>> = route
        .geometry
        .coordinates
        .iter()
        .filter_map(|pair| match pair.as_slice() {
            [lon, lat, ..] => Some(Coord { x: *lon, y: *lat }),
            _ => None,
        })
        .collect();

    if coords.len() < 2 {
        return Err(Error::RoutingError(
            "Route geometry has fewer than two coordinates".to_string(),
        ));
    }

    Ok(LineString::new(coords))
}
