//! Self-contained Leaflet page for a [`SiteMap`]

use std::{fs, path::Path};

use geo::{LineString, Point};
use log::info;
use serde::Serialize;

use super::layers::{MapLayer, RouteLayer, SiteMap, StopMarker};
use crate::Error;

const TEMPLATE: &str = include_str!("map.html");
const DEFAULT_TITLE: &str = "Taichung site analysis";

#[derive(Serialize)]
struct PagePayload<'a> {
    /// `[lat, lon]`, Leaflet order
    center: [f64; 2],
    zoom: u8,
    layers: Vec<LayerPayload<'a>>,
}

#[derive(Serialize)]
struct LayerPayload<'a> {
    name: &'a str,
    spot: SpotPayload<'a>,
    radius_m: f64,
    routes: Vec<RoutePayload<'a>>,
}

#[derive(Serialize)]
struct SpotPayload<'a> {
    name: &'a str,
    visitors: u64,
    lat: f64,
    lon: f64,
}

#[derive(Serialize)]
struct RoutePayload<'a> {
    name: &'a str,
    direction: i64,
    color: &'a str,
    path: Vec<[f64; 2]>,
    stops: Vec<StopPayload<'a>>,
}

#[derive(Serialize)]
struct StopPayload<'a> {
    name: Option<&'a str>,
    lat: f64,
    lon: f64,
}

fn lat_lon(point: Point<f64>) -> [f64; 2] {
    [point.y(), point.x()]
}

fn path_lat_lon(path: &LineString<f64>) -> Vec<[f64; 2]> {
    path.coords().map(|c| [c.y, c.x]).collect()
}

impl<'a> From<&'a StopMarker> for StopPayload<'a> {
    fn from(stop: &'a StopMarker) -> Self {
        Self {
            name: stop.name.as_deref(),
            lat: stop.location.y(),
            lon: stop.location.x(),
        }
    }
}

impl<'a> From<&'a RouteLayer> for RoutePayload<'a> {
    fn from(route: &'a RouteLayer) -> Self {
        Self {
            name: &route.route_name,
            direction: route.direction.code(),
            color: route.color,
            path: path_lat_lon(&route.path),
            stops: route.stops.iter().map(StopPayload::from).collect(),
        }
    }
}

impl<'a> From<&'a MapLayer> for LayerPayload<'a> {
    fn from(layer: &'a MapLayer) -> Self {
        Self {
            name: &layer.name,
            spot: SpotPayload {
                name: &layer.spot_name,
                visitors: layer.visitors,
                lat: layer.location.y(),
                lon: layer.location.x(),
            },
            radius_m: layer.radius_m,
            routes: layer.routes.iter().map(RoutePayload::from).collect(),
        }
    }
}

/// Makes serialized JSON safe to embed inside a `<script>` element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

fn escape_html_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl SiteMap {
    /// Renders the map as a standalone HTML document
    pub fn to_html(&self) -> Result<String, Error> {
        self.to_html_titled(DEFAULT_TITLE)
    }

    pub fn to_html_titled(&self, title: &str) -> Result<String, Error> {
        let payload = PagePayload {
            center: lat_lon(self.center),
            zoom: self.zoom,
            layers: self.layers.iter().map(LayerPayload::from).collect(),
        };
        let json = serde_json::to_string(&payload)?;

        Ok(TEMPLATE
            .replace("{{TITLE}}", &escape_html_text(title))
            .replace("{{PAYLOAD}}", &script_safe(&json)))
    }

    pub fn write_html(&self, path: &Path) -> Result<(), Error> {
        fs::write(path, self.to_html()?)?;
        info!(
            "Wrote map with {} layers to {}",
            self.layers.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use geo::line_string;

    use super::*;
    use crate::{model::Direction, render::layers::DEFAULT_CENTER};

    fn site_map(spot_name: &str) -> SiteMap {
        SiteMap {
            center: Point::new(120.65, 24.15),
            zoom: 12,
            layers: vec![MapLayer {
                name: format!("{spot_name} (100萬人)"),
                spot_name: spot_name.to_string(),
                visitors: 1_000_000,
                location: Point::new(120.65, 24.15),
                radius_m: 750.0,
                routes: vec![RouteLayer {
                    route_name: "300".to_string(),
                    direction: Direction::OUTBOUND,
                    color: "#FF1493",
                    path: line_string![(x: 120.651, y: 24.151), (x: 120.7, y: 24.16)],
                    stops: vec![StopMarker {
                        name: Some("臺中車站".to_string()),
                        location: Point::new(120.651, 24.151),
                    }],
                }],
            }],
        }
    }

    fn embedded_payload(html: &str) -> serde_json::Value {
        let start = html.find("const site = ").unwrap() + "const site = ".len();
        let end = start + html[start..].find(";\n").unwrap();
        serde_json::from_str(&html[start..end]).unwrap()
    }

    #[test]
    fn page_embeds_layers_in_leaflet_order() {
        let html = site_map("國家歌劇院").to_html().unwrap();
        let payload = embedded_payload(&html);

        assert_eq!(payload["center"][0], 24.15);
        assert_eq!(payload["center"][1], 120.65);
        assert_eq!(payload["zoom"], 12);
        assert_eq!(payload["layers"][0]["name"], "國家歌劇院 (100萬人)");
        assert_eq!(payload["layers"][0]["radius_m"], 750.0);
        assert_eq!(payload["layers"][0]["routes"][0]["path"][1][0], 24.16);
        assert_eq!(payload["layers"][0]["routes"][0]["stops"][0]["name"], "臺中車站");
    }

    #[test]
    fn page_uses_dark_tiles_and_open_layer_control() {
        let html = site_map("s").to_html().unwrap();
        assert!(html.contains("basemaps.cartocdn.com/dark_all"));
        assert!(html.contains("collapsed: false"));
        assert!(!html.contains("{{PAYLOAD}}"));
        assert!(!html.contains("{{TITLE}}"));
    }

    #[test]
    fn names_cannot_close_the_script_element() {
        let html = site_map("</script><script>alert(1)").to_html().unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
        let payload = embedded_payload(&html);
        assert_eq!(payload["layers"][0]["spot"]["name"], "</script><script>alert(1)");
    }

    #[test]
    fn empty_map_still_renders() {
        let map = SiteMap {
            center: DEFAULT_CENTER,
            zoom: 13,
            layers: Vec::new(),
        };
        let payload = embedded_payload(&map.to_html().unwrap());
        assert_eq!(payload["layers"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn write_html_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.html");
        site_map("s").write_html(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<!DOCTYPE html>"));
    }
}
