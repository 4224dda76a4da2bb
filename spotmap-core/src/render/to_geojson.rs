use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::layers::{MapLayer, RouteLayer, SiteMap, StopMarker};
use crate::Error;

impl SiteMap {
    /// Converts every layer to `GeoJSON` features tagged with a `kind`
    /// property: `spot`, `catchment`, `route` or `stop`.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::new();

        for layer in &self.layers {
            features.push(spot_feature(layer)?);
            features.push(catchment_feature(layer)?);
            for route in &layer.routes {
                features.push(route_feature(layer, route)?);
                for (idx, stop) in route.stops.iter().enumerate() {
                    features.push(stop_feature(layer, route, stop, idx)?);
                }
            }
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn spot_feature(layer: &MapLayer) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&layer.location)),
        "properties": {
            "kind": "spot",
            "layer": layer.name,
            "name": layer.spot_name,
            "visitors": layer.visitors,
        }
    });
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn catchment_feature(layer: &MapLayer) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&layer.location)),
        "properties": {
            "kind": "catchment",
            "layer": layer.name,
            "radius_m": layer.radius_m,
        }
    });
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn route_feature(layer: &MapLayer, route: &RouteLayer) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&route.path)),
        "properties": {
            "kind": "route",
            "layer": layer.name,
            "name": route.route_name,
            "direction": route.direction.code(),
            "color": route.color,
        }
    });
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn stop_feature(
    layer: &MapLayer,
    route: &RouteLayer,
    stop: &StopMarker,
    idx: usize,
) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&stop.location)),
        "properties": {
            "kind": "stop",
            "layer": layer.name,
            "name": stop.name,
            "route": route.route_name,
            "sequence_index": idx,
            "color": route.color,
        }
    });
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
