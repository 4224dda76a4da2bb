use std::fs;
use std::path::Path;

use log::{info, warn};
use serde_json::Value;

use super::fields::{first_text, lookup};
use crate::{Error, model::RoadSegment};

/// Loads road section shapes.
///
/// Roads only refine line-type spots, so an unreadable file is logged and
/// yields no segments instead of failing the run.
pub fn load_roads(path: Option<&Path>) -> Vec<RoadSegment> {
    let Some(path) = path else {
        return Vec::new();
    };

    let result = fs::read_to_string(path)
        .map_err(Error::from)
        .and_then(|text| parse_roads(&text));

    match result {
        Ok(roads) => {
            info!("Loaded {} road segments from {}", roads.len(), path.display());
            roads
        }
        Err(e) => {
            warn!("Failed to read road data from {}: {e}", path.display());
            Vec::new()
        }
    }
}

/// Parses the `SectionShapes` array, skipping geometries that do not parse
pub fn parse_roads(text: &str) -> Result<Vec<RoadSegment>, Error> {
    let json: Value = serde_json::from_str(text)?;
    let Some(sections) = lookup(&json, "SectionShapes").and_then(Value::as_array) else {
        return Err(Error::InvalidData(
            "Road file has no SectionShapes array".to_string(),
        ));
    };

    let roads = sections
        .iter()
        .filter_map(|section| {
            let wkt = first_text(section, &["Geometry"]).unwrap_or_default();
            match RoadSegment::from_wkt(&wkt) {
                Ok(road) if !road.is_empty() => Some(road),
                Ok(_) => None,
                Err(e) => {
                    let id = lookup(section, "SectionID").map_or_else(
                        || "<unknown>".to_string(),
                        |id| id.to_string(),
                    );
                    warn!("Skipping road section {id}: {e}");
                    None
                }
            }
        })
        .collect();

    Ok(roads)
}

#[cfg(test)]
mod test {
    use geo::Point;

    use super::*;

    #[test]
    fn sections_parse_and_bad_ones_are_skipped() {
        let text = r#"{"SectionShapes": [
            {"SectionID": "a", "Geometry": "LINESTRING(120.650 24.151,120.652 24.152)"},
            {"SectionID": "b", "Geometry": "POINT(120 24)"},
            {"SectionID": 7},
            {"SectionID": "d", "Geometry": "LINESTRING(120.7 24.2, 120.71 24.21, 120.72 24.22)"}
        ]}"#;

        let roads = parse_roads(text).unwrap();
        assert_eq!(roads.len(), 2);
        assert_eq!(roads[0].vertices().next(), Some(Point::new(120.650, 24.151)));
        assert_eq!(roads[1].len(), 3);
    }

    #[test]
    fn file_without_sections_is_invalid() {
        assert!(matches!(parse_roads("[]"), Err(Error::InvalidData(_))));
    }

    #[test]
    fn missing_file_yields_no_roads() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_roads(Some(&dir.path().join("nope.json"))).is_empty());
        assert!(load_roads(None).is_empty());
    }
}
