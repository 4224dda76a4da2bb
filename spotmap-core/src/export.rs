//! CSV exports of the flattened tables.
//!
//! Files start with a UTF-8 byte order mark so spreadsheet tools pick the
//! right encoding for the Chinese names.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::{
    Error,
    loading::TravelTimeRow,
    model::{StopRecord, StopTable},
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Serialize)]
struct StopRow<'a> {
    #[serde(rename = "RouteDisplay")]
    route_display: &'a str,
    #[serde(rename = "Direction")]
    direction: i64,
    #[serde(rename = "StopSequence")]
    stop_sequence: Option<u32>,
    #[serde(rename = "StopName")]
    stop_name: Option<&'a str>,
    lat: f64,
    lon: f64,
}

impl<'a> From<&'a StopRecord> for StopRow<'a> {
    fn from(record: &'a StopRecord) -> Self {
        Self {
            route_display: &record.route_name,
            direction: record.direction.code(),
            stop_sequence: record.sequence,
            stop_name: record.stop_name.as_deref(),
            lat: record.location.y(),
            lon: record.location.x(),
        }
    }
}

fn write_rows<W, T, I>(mut writer: W, rows: I) -> Result<(), Error>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    writer.write_all(UTF8_BOM)?;
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes one row per stop in table order
pub fn write_stop_table<W: Write>(table: &StopTable, writer: W) -> Result<(), Error> {
    write_rows(writer, table.records.iter().map(StopRow::from))
}

pub fn write_travel_times<W: Write>(rows: &[TravelTimeRow], writer: W) -> Result<(), Error> {
    write_rows(writer, rows)
}

pub fn export_stop_table(table: &StopTable, path: &Path) -> Result<(), Error> {
    let file = BufWriter::new(File::create(path)?);
    write_stop_table(table, file)?;
    info!("Exported {} stops to {}", table.len(), path.display());
    Ok(())
}

pub fn export_travel_times(rows: &[TravelTimeRow], path: &Path) -> Result<(), Error> {
    let file = BufWriter::new(File::create(path)?);
    write_travel_times(rows, file)?;
    info!("Exported {} travel time rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use geo::Point;

    use super::*;
    use crate::model::Direction;

    fn table() -> StopTable {
        StopTable::new(vec![
            StopRecord {
                route_name: "300".to_string(),
                direction: Direction::OUTBOUND,
                sequence: Some(1),
                stop_name: Some("臺中車站".to_string()),
                location: Point::new(120.685, 24.137),
            },
            StopRecord {
                route_name: "300".to_string(),
                direction: Direction::INBOUND,
                sequence: None,
                stop_name: None,
                location: Point::new(120.65, 24.15),
            },
        ])
    }

    #[test]
    fn stop_table_csv_has_bom_and_header() {
        let mut buf = Vec::new();
        write_stop_table(&table(), &mut buf).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "RouteDisplay,Direction,StopSequence,StopName,lat,lon");
        assert_eq!(lines[1], "300,0,1,臺中車站,24.137,120.685");
        assert_eq!(lines[2], "300,1,,,24.15,120.65");
    }

    #[test]
    fn travel_time_csv_keeps_empty_segments() {
        let rows = vec![TravelTimeRow {
            route_id: Some("TXG300".to_string()),
            route_name_zh: Some("300".to_string()),
            direction: Some(0),
            ..TravelTimeRow::default()
        }];
        let mut buf = Vec::new();
        write_travel_times(&rows, &mut buf).unwrap();

        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "RouteID,RouteName_Zh,RouteName_En,Direction,OperatorCode,FromStopID,ToStopID,TravelTime,Distance"
        );
        assert_eq!(lines[1], "TXG300,300,,0,,,,,");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stops.csv");
        export_stop_table(&table(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 3);
    }
}
