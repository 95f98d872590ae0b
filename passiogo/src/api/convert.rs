//! Conversion from PassioGo DTOs to domain types.
//!
//! One function per resource kind. Records that lack the one field a
//! domain type cannot do without (a numeric id) are logged and skipped
//! rather than failing the whole listing.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Route, Stop, SystemAlert, SystemId, TransportationSystem, Vehicle};

use super::lenient;
use super::types::{
    AlertDto, AlertsResponse, RouteDto, StopsResponse, SystemDto, SystemsResponse, VehicleDto,
    VehiclesResponse,
};

/// Vehicle key the upstream uses for "no active vehicle".
const NO_VEHICLE_KEY: &str = "-1";

/// Metadata elements (name, colour) at the head of every route sequence.
const SEQUENCE_HEADER_LEN: usize = 2;

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing or unparseable required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert the systems listing.
pub fn convert_systems(resp: SystemsResponse) -> Vec<TransportationSystem> {
    resp.all
        .into_iter()
        .filter_map(|dto| match convert_system(dto) {
            Ok(system) => Some(system),
            Err(e) => {
                warn!(error = %e, "skipping system");
                None
            }
        })
        .collect()
}

/// Convert a single systems-listing entry.
pub fn convert_system(dto: SystemDto) -> Result<TransportationSystem, ConversionError> {
    let id = dto.id.ok_or(ConversionError::MissingField("id"))?;

    Ok(TransportationSystem {
        id: SystemId::new(id),
        name: dto.fullname,
        username: dto.username,
        go_agency_name: dto.go_agency_name,
        email: dto.email,
        go_test_mode: dto.go_test_mode,
        name2: dto.name2,
        homepage: dto.homepage,
        logo: dto.logo,
        go_route_planner_enabled: dto.go_route_planner_enabled,
        go_color: dto.go_color,
        go_support_email: dto.go_support_email,
        go_shared_code: dto.go_shared_code,
        go_authentication_type: dto.go_authentication_type,
    })
}

/// Convert the routes of one system.
pub fn convert_routes(dtos: Vec<RouteDto>, system_id: SystemId) -> Vec<Route> {
    dtos.into_iter()
        .filter_map(|dto| match convert_route(dto, system_id) {
            Ok(route) => Some(route),
            Err(e) => {
                warn!(%system_id, error = %e, "skipping route");
                None
            }
        })
        .collect()
}

fn convert_route(dto: RouteDto, system_id: SystemId) -> Result<Route, ConversionError> {
    let id = dto.id.ok_or(ConversionError::MissingField("id"))?;

    Ok(Route {
        id,
        group_id: dto.group_id,
        group_color: dto.group_color,
        name: dto.name,
        short_name: dto.short_name,
        name_orig: dto.name_orig,
        fullname: dto.fullname,
        myid: dto.myid,
        map_app: dto.map_app,
        archive: dto.archive,
        go_prefix_route_name: dto.go_prefix_route_name,
        go_show_schedule: dto.go_show_schedule,
        outdated: dto.outdated,
        distance: dto.distance,
        latitude: dto.latitude,
        longitude: dto.longitude,
        timezone: dto.timezone,
        service_time: dto.service_time,
        service_time_short: dto.service_time_short,
        system_id,
    })
}

/// Convert the stops of one system, deriving each stop's route positions.
pub fn convert_stops(resp: StopsResponse, system_id: SystemId) -> Vec<Stop> {
    let sequences = route_sequences(&resp.routes);

    resp.stops
        .into_iter()
        .filter_map(|(key, dto)| {
            let Some(id) = dto.id else {
                warn!(%system_id, key = %key, "skipping stop without id");
                return None;
            };

            let routes_and_positions = sequences
                .iter()
                .filter_map(|(route_key, sequence)| {
                    let positions = positions_of(sequence, &id);
                    (!positions.is_empty()).then(|| (route_key.clone(), positions))
                })
                .collect();

            Some(Stop {
                id,
                routes_and_positions,
                system_id,
                name: dto.name,
                latitude: dto.latitude,
                longitude: dto.longitude,
                radius: dto.radius,
            })
        })
        .collect()
}

/// Stop ids visited by each route, in order.
///
/// Skips each sequence's header and any `0` placeholders; placeholders do
/// not take up a position.
pub fn route_sequences(routes: &[(String, Vec<Value>)]) -> BTreeMap<String, Vec<String>> {
    routes
        .iter()
        .map(|(route_key, raw)| {
            let stops = raw
                .iter()
                .skip(SEQUENCE_HEADER_LEN)
                .filter_map(|entry| match entry {
                    Value::Array(items) => items.get(1).and_then(lenient::to_string),
                    Value::Number(n) if n.as_i64() == Some(0) => None,
                    other => {
                        debug!(
                            route_key = %route_key,
                            entry = %other,
                            "ignoring route sequence entry"
                        );
                        None
                    }
                })
                .collect();
            (route_key.clone(), stops)
        })
        .collect()
}

/// Every index at which `stop_id` appears in `sequence`.
pub fn positions_of(sequence: &[String], stop_id: &str) -> Vec<usize> {
    sequence
        .iter()
        .enumerate()
        .filter(|(_, id)| id.as_str() == stop_id)
        .map(|(i, _)| i)
        .collect()
}

/// Convert the alert messages of one system.
pub fn convert_alerts(resp: AlertsResponse, system_id: SystemId) -> Vec<SystemAlert> {
    resp.msgs
        .into_iter()
        .filter_map(|dto| match convert_alert(dto, system_id) {
            Ok(alert) => Some(alert),
            Err(e) => {
                warn!(%system_id, error = %e, "skipping alert");
                None
            }
        })
        .collect()
}

fn convert_alert(dto: AlertDto, system_id: SystemId) -> Result<SystemAlert, ConversionError> {
    let id = dto.id.ok_or(ConversionError::MissingField("id"))?;

    Ok(SystemAlert {
        id,
        system_id,
        route_id: dto.route_id,
        name: dto.name,
        html: dto.html,
        archive: dto.archive,
        important: dto.important,
        date_time_created: dto.created,
        date_time_from: dto.from,
        date_time_to: dto.to,
        as_push: dto.as_push,
        gtfs: dto.gtfs,
        gtfs_alert_cause_id: dto.gtfs_alert_cause_id,
        gtfs_alert_effect_id: dto.gtfs_alert_effect_id,
        gtfs_alert_url: dto.gtfs_alert_url,
        gtfs_alert_header_text: dto.gtfs_alert_header_text,
        gtfs_alert_description_text: dto.gtfs_alert_description_text,
        route_group_id: dto.route_group_id,
        created_utc: dto.created_utc,
        author_id: dto.author_id,
        author: dto.author,
        updated: dto.updated,
        update_author_id: dto.update_author_id,
        update_author: dto.update_author,
        created_f: dto.created_f,
        from_f: dto.from_f,
        from_ok: dto.from_ok,
        to_ok: dto.to_ok,
    })
}

/// Convert the live vehicles of one system.
///
/// Drops the `"-1"` placeholder entry before looking at its contents, then
/// reads only the first record of each vehicle's array. Entries that are
/// empty or do not decode are logged and skipped.
pub fn convert_vehicles(resp: VehiclesResponse, system_id: SystemId) -> Vec<Vehicle> {
    resp.buses
        .into_iter()
        .filter(|(key, _)| key != NO_VEHICLE_KEY)
        .filter_map(|(key, raw)| {
            let record = match raw {
                Value::Array(records) => records.into_iter().next(),
                Value::Object(_) => Some(raw),
                _ => None,
            };
            let Some(record) = record else {
                warn!(%system_id, key = %key, "skipping vehicle with no data");
                return None;
            };
            let dto: VehicleDto = match serde_json::from_value(record) {
                Ok(dto) => dto,
                Err(e) => {
                    warn!(%system_id, key = %key, error = %e, "skipping malformed vehicle");
                    return None;
                }
            };

            Some(Vehicle {
                id: dto.bus_id,
                name: dto.bus_name,
                kind: dto.bus_type,
                system_id,
                calculated_course: dto.calculated_course,
                route_id: dto.route_id,
                route_name: dto.route,
                color: dto.color,
                created: dto.created,
                latitude: dto.latitude,
                longitude: dto.longitude,
                speed: dto.speed,
                pax_load: dto.pax_load,
                out_of_service: dto.out_of_service,
                more: dto.more,
                trip_id: dto.trip_id,
            })
        })
        .collect()
}
