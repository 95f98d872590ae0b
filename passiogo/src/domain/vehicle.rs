//! Live vehicle snapshots.

use serde::Serialize;

use super::SystemId;

/// One bus or shuttle as last reported.
///
/// Snapshots are re-fetched on every poll and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub system_id: SystemId,
    pub calculated_course: Option<f64>,
    pub route_id: Option<String>,
    pub route_name: Option<String>,
    pub color: Option<String>,
    pub created: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub pax_load: Option<f64>,
    pub out_of_service: Option<bool>,
    pub more: Option<String>,
    pub trip_id: Option<String>,
}

impl Vehicle {
    /// Case-insensitive substring match on the vehicle name.
    pub fn name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    }

    /// Whether the vehicle is running service. Unknown counts as in service.
    pub fn in_service(&self) -> bool {
        self.out_of_service != Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(name: Option<&str>, out_of_service: Option<bool>) -> Vehicle {
        Vehicle {
            id: Some("501".into()),
            name: name.map(str::to_string),
            kind: None,
            system_id: SystemId::new(3994),
            calculated_course: None,
            route_id: None,
            route_name: None,
            color: None,
            created: None,
            latitude: None,
            longitude: None,
            speed: None,
            pax_load: None,
            out_of_service,
            more: None,
            trip_id: None,
        }
    }

    #[test]
    fn name_match_ignores_case() {
        let v = bus(Some("Orbit Bus 12"), None);
        assert!(v.name_contains("orbit"));
        assert!(v.name_contains("BUS 1"));
        assert!(!v.name_contains("east"));
        assert!(!bus(None, None).name_contains(""));
    }

    #[test]
    fn unknown_service_state_counts_as_in_service() {
        assert!(bus(None, None).in_service());
        assert!(bus(None, Some(false)).in_service());
        assert!(!bus(None, Some(true)).in_service());
    }

    #[test]
    fn kind_serializes_as_type() {
        let json = serde_json::to_value(bus(None, None)).unwrap();
        assert!(json.as_object().unwrap().contains_key("type"));
        assert_eq!(json["systemId"], 3994);
    }
}
