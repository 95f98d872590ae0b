//! Transportation systems.

use serde::Serialize;

use crate::api::{
    AlertsQuery, PassioClient, PassioError, RoutesQuery, StopsQuery, VehiclesQuery,
};

use super::{Route, Stop, SystemAlert, SystemId, Vehicle};

/// One agency or campus deployment tracked by PassioGo.
///
/// This is the entry point for everything else: routes, stops, alerts and
/// vehicles are all fetched per system. Apart from `id`, every field is
/// whatever the systems listing happened to carry, so all of them are
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationSystem {
    pub id: SystemId,
    pub name: Option<String>,
    pub username: Option<String>,
    pub go_agency_name: Option<String>,
    pub email: Option<String>,
    pub go_test_mode: Option<bool>,
    pub name2: Option<bool>,
    pub homepage: Option<String>,
    pub logo: Option<bool>,
    pub go_route_planner_enabled: Option<bool>,
    pub go_color: Option<String>,
    pub go_support_email: Option<String>,
    pub go_shared_code: Option<i64>,
    pub go_authentication_type: Option<bool>,
}

impl TransportationSystem {
    /// A system with only its id set.
    pub fn bare(id: SystemId) -> Self {
        Self {
            id,
            name: None,
            username: None,
            go_agency_name: None,
            email: None,
            go_test_mode: None,
            name2: None,
            homepage: None,
            logo: None,
            go_route_planner_enabled: None,
            go_color: None,
            go_support_email: None,
            go_shared_code: None,
            go_authentication_type: None,
        }
    }

    /// Every route in this system.
    pub async fn get_routes(
        &self,
        client: &PassioClient,
        query: RoutesQuery,
    ) -> Result<Vec<Route>, PassioError> {
        client.get_routes(self.id, query).await
    }

    /// Every stop in this system, with its positions along each route.
    pub async fn get_stops(
        &self,
        client: &PassioClient,
        query: StopsQuery,
    ) -> Result<Vec<Stop>, PassioError> {
        client.get_stops(self.id, query).await
    }

    /// Current rider-facing alerts.
    pub async fn get_system_alerts(
        &self,
        client: &PassioClient,
        query: AlertsQuery,
    ) -> Result<Vec<SystemAlert>, PassioError> {
        client.get_system_alerts(self.id, query).await
    }

    /// Vehicles currently reporting a position.
    pub async fn get_vehicles(
        &self,
        client: &PassioClient,
        query: VehiclesQuery,
    ) -> Result<Vec<Vehicle>, PassioError> {
        client.get_vehicles(self.id, query).await
    }
}

/// Render systems as a markdown bullet list: `- <name> (#<id>)`.
///
/// With `include_html_breaks`, each line also ends in `<br/>`, which is
/// what README tables rendered on GitHub need.
pub fn systems_markdown(systems: &[TransportationSystem], include_html_breaks: bool) -> String {
    let suffix = if include_html_breaks { "<br/>" } else { "" };
    systems
        .iter()
        .map(|s| {
            format!(
                "- {} (#{}){}\n",
                s.name.as_deref().unwrap_or("null"),
                s.id,
                suffix
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_system_serializes_every_field_as_null() {
        let system = TransportationSystem::bare(SystemId::new(1));
        let value = serde_json::to_value(&system).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 14);
        assert_eq!(obj["id"], 1);
        for (key, v) in obj.iter().filter(|(k, _)| *k != "id") {
            assert!(v.is_null(), "{key} should be null");
        }
        assert!(obj.contains_key("goAuthenticationType"));
    }

    #[test]
    fn markdown_listing() {
        let mut uga = TransportationSystem::bare(SystemId::new(3994));
        uga.name = Some("UGA".into());
        let unnamed = TransportationSystem::bare(SystemId::new(7));

        assert_eq!(
            systems_markdown(&[uga.clone(), unnamed], false),
            "- UGA (#3994)\n- null (#7)\n"
        );
        assert_eq!(systems_markdown(&[uga], true), "- UGA (#3994)<br/>\n");
    }
}
