//! Stop-to-stop travel time records exported from the transit API

use std::fs;
use std::path::Path;

use log::info;
use serde::Serialize;
use serde_json::Value;

use super::fields::{first_integer, first_number, first_text, lookup};
use crate::Error;

/// One segment of a route's travel time table, or a bare route row when the
/// record had no segments
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TravelTimeRow {
    #[serde(rename = "RouteID")]
    pub route_id: Option<String>,
    #[serde(rename = "RouteName_Zh")]
    pub route_name_zh: Option<String>,
    #[serde(rename = "RouteName_En")]
    pub route_name_en: Option<String>,
    #[serde(rename = "Direction")]
    pub direction: Option<i64>,
    #[serde(rename = "OperatorCode")]
    pub operator_code: Option<String>,
    #[serde(rename = "FromStopID")]
    pub from_stop_id: Option<String>,
    #[serde(rename = "ToStopID")]
    pub to_stop_id: Option<String>,
    /// Seconds
    #[serde(rename = "TravelTime")]
    pub travel_time: Option<f64>,
    /// Meters
    #[serde(rename = "Distance")]
    pub distance: Option<f64>,
}

pub fn load_travel_times(path: &Path) -> Result<Vec<TravelTimeRow>, Error> {
    let text = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&text)?;
    let rows = flatten_travel_times(&json);
    info!("Flattened {} travel time rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Accepts a bare array of records, an object wrapping them in `data`, or a
/// single record object.
pub fn flatten_travel_times(json: &Value) -> Vec<TravelTimeRow> {
    let records: Vec<&Value> = match json {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => match lookup(json, "data").and_then(Value::as_array) {
            Some(items) => items.iter().collect(),
            None => vec![json],
        },
        _ => Vec::new(),
    };

    records
        .into_iter()
        .filter(|record| record.is_object())
        .flat_map(record_rows)
        .collect()
}

fn record_rows(record: &Value) -> Vec<TravelTimeRow> {
    let base = TravelTimeRow {
        route_id: id_text(record, "RouteID"),
        route_name_zh: first_text(record, &["RouteName.Zh_tw"]),
        route_name_en: first_text(record, &["RouteName.En"]),
        direction: first_integer(record, &["Direction"]),
        operator_code: id_text(record, "OperatorCode"),
        ..TravelTimeRow::default()
    };

    let segments = lookup(record, "TravelTimes")
        .and_then(Value::as_array)
        .filter(|segments| !segments.is_empty());

    let Some(segments) = segments else {
        return vec![base];
    };

    segments
        .iter()
        .map(|segment| TravelTimeRow {
            from_stop_id: id_text(segment, "FromStopID"),
            to_stop_id: id_text(segment, "ToStopID"),
            travel_time: first_number(segment, &["TravelTime"]),
            distance: first_number(segment, &["Distance"]),
            ..base.clone()
        })
        .collect()
}

/// Identifiers come as strings or bare numbers depending on the endpoint
fn id_text(value: &Value, key: &str) -> Option<String> {
    match lookup(value, key)? {
        Value::Number(n) => Some(n.to_string()),
        _ => first_text(value, &[key]),
    }
}
