mod html;
mod layers;
mod palette;
mod to_geojson;

pub use layers::{
    DEFAULT_CENTER, DEFAULT_ZOOM, MapLayer, RouteLayer, SPOTS_ZOOM, SiteMap, StopMarker,
};
pub use palette::{PINK_PALETTE, route_color};
