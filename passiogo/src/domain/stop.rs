//! Physical stops.

use std::collections::HashMap;

use serde::Serialize;

use super::SystemId;

/// A physical stop, visited by one or more routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    /// Route key → zero-based positions of this stop in that route's sequence.
    ///
    /// A loop route may visit the same stop more than once, hence a list.
    pub routes_and_positions: HashMap<String, Vec<usize>>,
    pub system_id: SystemId,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
}

impl Stop {
    /// Positions of this stop along the route listed under `route_key`.
    pub fn positions_on(&self, route_key: &str) -> Option<&[usize]> {
        self.routes_and_positions.get(route_key).map(Vec::as_slice)
    }

    /// Keys of every route serving this stop, sorted.
    pub fn route_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.routes_and_positions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
