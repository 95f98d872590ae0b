//! PassioGo response DTOs.
//!
//! These map the raw `mapGetData.php` / `goServices.php` payloads. The API
//! is undocumented and inconsistent between deployments, so every scalar
//! goes through a [`lenient`](super::lenient) deserializer and every field
//! is `#[serde(default)]`: a missing key and a `null` look the same here.

use serde::Deserialize;
use serde_json::Value;

use super::lenient;

/// Response from `getSystems`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemsResponse {
    #[serde(default)]
    pub all: Vec<SystemDto>,
}

/// One entry of the systems listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDto {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub go_agency_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub go_test_mode: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub name2: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub homepage: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub logo: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub go_route_planner_enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub go_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub go_support_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub go_shared_code: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub go_authentication_type: Option<bool>,
}

/// Response from `getRoutes`.
///
/// Some deployments wrap the list in `{"all": [...]}`, others send it bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoutesResponse {
    Wrapped { all: Vec<RouteDto> },
    Bare(Vec<RouteDto>),
}

impl RoutesResponse {
    pub fn into_routes(self) -> Vec<RouteDto> {
        match self {
            RoutesResponse::Wrapped { all } => all,
            RoutesResponse::Bare(routes) => routes,
        }
    }
}

/// One route entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub group_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub group_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name_orig: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub myid: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub map_app: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub archive: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub go_prefix_route_name: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub go_show_schedule: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub outdated: Option<bool>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub distance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub service_time: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub service_time_short: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub user_id: Option<i64>,
}

/// Response from `getStops`.
///
/// `routes` maps a route key to its stop sequence. Each sequence starts
/// with two metadata elements; every later element is either `0` or an
/// array whose second element is a stop id. Both collections keep the
/// upstream's order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopsResponse {
    #[serde(default, deserialize_with = "lenient::map_or_list")]
    pub routes: Vec<(String, Vec<Value>)>,
    #[serde(default, deserialize_with = "lenient::map_or_list")]
    pub stops: Vec<(String, StopDto)>,
}

/// One stop entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub radius: Option<f64>,
}

/// Response from `getAlertMessages`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub msgs: Vec<AlertDto>,
}

/// One alert message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub route_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub html: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub archive: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub important: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub from: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub as_push: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub gtfs: Option<bool>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub gtfs_alert_cause_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub gtfs_alert_effect_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gtfs_alert_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gtfs_alert_header_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub gtfs_alert_description_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub route_group_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub author_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub updated: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub update_author_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub update_author: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_f: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub from_f: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub from_ok: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub to_ok: Option<bool>,
}

/// Response from `getBuses`.
///
/// Keyed by vehicle id. Each value nests the actual record one array level
/// deeper than it needs to, and the key `"-1"` stands for "no vehicle".
/// Values are left undecoded so that the placeholder, whatever its shape,
/// can be dropped before any record is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehiclesResponse {
    #[serde(default, deserialize_with = "lenient::map_or_list")]
    pub buses: Vec<(String, Value)>,
}

/// One vehicle record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    #[serde(default, deserialize_with = "lenient::string")]
    pub bus_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub bus_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub bus_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub calculated_course: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub route_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub created: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub speed: Option<f64>,
    #[serde(default, rename = "paxLoad100", deserialize_with = "lenient::float")]
    pub pax_load: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub out_of_service: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub more: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub trip_id: Option<String>,
}
