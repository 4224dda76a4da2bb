//! Flattened stop table and the route groups built from it

use std::collections::BTreeMap;
use std::fmt;

use geo::{LineString, Point};

/// Travel direction code of a sub-route as published by the transit API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Direction(pub i64);

impl Direction {
    pub const OUTBOUND: Direction = Direction(0);
    pub const INBOUND: Direction = Direction(1);
    pub const LOOP: Direction = Direction(2);

    pub fn code(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::OUTBOUND => write!(f, "outbound"),
            Direction::INBOUND => write!(f, "inbound"),
            Direction::LOOP => write!(f, "loop"),
            Direction(other) => write!(f, "direction {other}"),
        }
    }
}

/// One row of the flattened route→stop table
#[derive(Debug, Clone, PartialEq)]
pub struct StopRecord {
    pub route_name: String,
    pub direction: Direction,
    /// Position of the stop along its route, `None` if the API omitted it
    pub sequence: Option<u32>,
    pub stop_name: Option<String>,
    pub location: Point<f64>,
}

impl StopRecord {
    pub fn key(&self) -> RouteKey {
        RouteKey {
            route_name: self.route_name.clone(),
            direction: self.direction,
        }
    }
}

/// Identity of a route group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteKey {
    pub route_name: String,
    pub direction: Direction,
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.route_name, self.direction)
    }
}

/// All stops of one route in one direction, in traversal order
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGroup {
    pub key: RouteKey,
    stops: Vec<StopRecord>,
}

impl RouteGroup {
    /// Builds a group and orders its stops by sequence number.
    ///
    /// The sort is stable: stops sharing a sequence number keep the order
    /// the API listed them in, and stops without one go last.
    pub fn new(key: RouteKey, mut stops: Vec<StopRecord>) -> Self {
        stops.sort_by_key(|s| (s.sequence.is_none(), s.sequence));
        Self { key, stops }
    }

    pub fn route_name(&self) -> &str {
        &self.key.route_name
    }

    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    pub fn stops(&self) -> &[StopRecord] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point<f64>> + '_ {
        self.stops.iter().map(|s| s.location)
    }

    /// Straight-line path through the stops in traversal order
    pub fn straight_path(&self) -> LineString<f64> {
        self.points().collect()
    }
}

/// Flat table of one row per (route, direction, stop)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopTable {
    pub records: Vec<StopRecord>,
}

impl StopTable {
    pub fn new(records: Vec<StopRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Splits the table into route groups ordered by (route name, direction)
    pub fn route_groups(&self) -> Vec<RouteGroup> {
        let mut grouped: BTreeMap<RouteKey, Vec<StopRecord>> = BTreeMap::new();
        for record in &self.records {
            grouped.entry(record.key()).or_default().push(record.clone());
        }

        grouped
            .into_iter()
            .map(|(key, stops)| RouteGroup::new(key, stops))
            .collect()
    }
}
