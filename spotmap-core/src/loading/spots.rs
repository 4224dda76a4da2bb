use std::fs;
use std::path::{Path, PathBuf};

use geo::Point;
use log::{debug, info, warn};
use serde_json::Value;

use super::fields::{coerce_number, first_text, lookup};
use super::visit_count::visit_count_from_json;
use crate::{Error, model::Spot};

const NAME_CHAIN: [&str; 3] = ["spotname", "ScenicSpotName", "name"];
const LAT_CHAIN: [&str; 2] = ["Position.PositionLat", "Position.lat"];
const LON_CHAIN: [&str; 2] = ["Position.PositionLon", "Position.lon"];

/// Loads spots from `primary`, falling back to `fallback` when the primary
/// file is missing or malformed.
///
/// # Errors
///
/// `Error::MissingInput` naming every path tried when none could be read
pub fn load_spots_with_fallback(
    primary: &Path,
    fallback: Option<&Path>,
) -> Result<Vec<Spot>, Error> {
    let mut tried: Vec<PathBuf> = vec![primary.to_path_buf()];

    match load_spots(primary) {
        Ok(spots) => return Ok(spots),
        Err(e) => warn!("Failed to load spots from {}: {e}", primary.display()),
    }

    if let Some(fallback) = fallback {
        tried.push(fallback.to_path_buf());
        match load_spots(fallback) {
            Ok(spots) => {
                info!("Loaded {} spots from fallback {}", spots.len(), fallback.display());
                return Ok(spots);
            }
            Err(e) => warn!("Failed to load spots from {}: {e}", fallback.display()),
        }
    }

    Err(Error::MissingInput(tried))
}

/// Loads a JSON array of spot records from `path`
pub fn load_spots(path: &Path) -> Result<Vec<Spot>, Error> {
    let text = fs::read_to_string(path)?;
    let spots = parse_spots(&text)?;
    info!("Loaded {} spots from {}", spots.len(), path.display());
    Ok(spots)
}

/// Parses a JSON array of spot records.
///
/// Records that are not objects are skipped. Bad coordinates leave the
/// location empty and a bad visitor count reads as zero, both of which
/// exclude the spot from correlation later without dropping it here.
pub fn parse_spots(text: &str) -> Result<Vec<Spot>, Error> {
    let json: Value = serde_json::from_str(text)?;
    let records = json
        .as_array()
        .ok_or_else(|| Error::InvalidData("Spot file is not a JSON array".to_string()))?;

    let spots: Vec<Spot> = records
        .iter()
        .filter(|record| record.is_object())
        .map(spot_from_record)
        .collect();

    for spot in spots.iter().take(5) {
        debug!(
            "  - {}: location={:?}, visitors={}",
            spot.name, spot.location, spot.visitors
        );
    }

    Ok(spots)
}

fn spot_from_record(record: &Value) -> Spot {
    let name = first_text(record, &NAME_CHAIN).unwrap_or_default();
    let visitors = visit_count_from_json(record.get("VisitCount"));

    let location = match (
        first_coordinate(record, &LAT_CHAIN),
        first_coordinate(record, &LON_CHAIN),
    ) {
        (Some(lat), Some(lon)) => Some(Point::new(lon, lat)),
        _ => {
            debug!("Spot '{name}' has no usable position");
            None
        }
    };

    Spot::new(name, visitors, location)
}

/// Like `first_number`, but a zero coordinate is a placeholder and counts
/// as absent
fn first_coordinate(record: &Value, chain: &[&str]) -> Option<f64> {
    chain
        .iter()
        .find_map(|path| lookup(record, path).and_then(coerce_number).filter(|v| *v != 0.0))
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    const SPOTS: &str = r#"[
        {"spotname": "公益路商圈", "VisitCount": "965萬7875人次",
         "Position": {"PositionLat": 24.15112, "PositionLon": 120.65082}},
        {"ScenicSpotName": "一中商圈", "VisitCount": "4330135",
         "Position": {"lat": "24.1487", "lon": "120.68532"}},
        {"name": "nowhere", "VisitCount": "12人次", "Position": {}},
        "not a record"
    ]"#;

    #[test]
    fn records_use_field_fallbacks() {
        let spots = parse_spots(SPOTS).unwrap();
        assert_eq!(spots.len(), 3);

        assert_eq!(spots[0].name, "公益路商圈");
        assert_eq!(spots[0].visitors, 9_657_875);
        assert_eq!(spots[0].location, Some(Point::new(120.65082, 24.15112)));

        assert_eq!(spots[1].name, "一中商圈");
        assert_eq!(spots[1].location, Some(Point::new(120.68532, 24.1487)));

        assert_eq!(spots[2].location, None);
        assert!(!spots[2].is_valid());
    }

    #[test]
    fn zero_coordinates_count_as_missing() {
        let spots = parse_spots(
            r#"[
            {"spotname": "placeholder", "VisitCount": "5萬",
             "Position": {"PositionLat": 0, "PositionLon": 0}},
            {"spotname": "secondary", "VisitCount": "5萬",
             "Position": {"PositionLat": 0.0, "lat": 24.15, "PositionLon": 120.65}}
        ]"#,
        )
        .unwrap();

        assert_eq!(spots[0].location, None);
        assert!(!spots[0].is_valid());
        assert_eq!(spots[1].location, Some(Point::new(120.65, 24.15)));
    }

    #[test]
    fn non_array_input_is_rejected() {
        assert!(matches!(
            parse_spots(r#"{"spotname": "x"}"#),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn fallback_file_is_used_when_primary_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("tourism_spot.json");
        fs::File::create(&fallback)
            .unwrap()
            .write_all(SPOTS.as_bytes())
            .unwrap();

        let spots =
            load_spots_with_fallback(&dir.path().join("missing.json"), Some(&fallback)).unwrap();
        assert_eq!(spots.len(), 3);
    }

    #[test]
    fn both_paths_failing_names_them() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("a.json");
        let fallback = dir.path().join("b.json");
        fs::write(&fallback, "not json").unwrap();

        match load_spots_with_fallback(&primary, Some(&fallback)) {
            Err(Error::MissingInput(tried)) => assert_eq!(tried, vec![primary, fallback]),
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }
}
