//! PassioGo HTTP client.
//!
//! Every endpoint is a POST with a small JSON body against one of two PHP
//! scripts. Responses that decode fine can still carry an `error` field,
//! which is checked before anything else.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::domain::{Route, Stop, SystemAlert, SystemId, TransportationSystem, Vehicle};

use super::convert::{
    convert_alerts, convert_routes, convert_stops, convert_systems, convert_vehicles,
};
use super::error::PassioError;
use super::query::{AlertsQuery, RoutesQuery, StopsQuery, SystemsQuery, VehiclesQuery};
use super::types::{
    AlertsResponse, RoutesResponse, StopsResponse, SystemsResponse, VehiclesResponse,
};

/// Default base URL for the PassioGo API.
const DEFAULT_BASE_URL: &str = "https://passiogo.com";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const MAP_DATA: &str = "mapGetData.php";
const GO_SERVICES: &str = "goServices.php";

/// Configuration for the PassioGo client.
#[derive(Debug, Clone)]
pub struct PassioConfig {
    /// Base URL for the API (defaults to production PassioGo)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PassioConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PassioConfig {
    /// Create a config pointing at production PassioGo.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a config from `PASSIOGO_BASE_URL` and `PASSIOGO_TIMEOUT_SECS`,
    /// falling back to the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(url) = std::env::var("PASSIOGO_BASE_URL") {
            config.base_url = url;
        }

        if let Ok(secs) = std::env::var("PASSIOGO_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!(value = %secs, "ignoring invalid PASSIOGO_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// PassioGo API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PassioClient {
    http: reqwest::Client,
    base_url: String,
}

impl PassioClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PassioConfig) -> Result<Self, PassioError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Every system known to PassioGo.
    #[tracing::instrument(skip(self))]
    pub async fn get_systems(
        &self,
        query: SystemsQuery,
    ) -> Result<Vec<TransportationSystem>, PassioError> {
        query.validate()?;

        let params = [
            ("getSystems", query.app_version.to_string()),
            ("sortMode", query.sort_mode.to_string()),
            ("credentials", "1".to_string()),
        ];
        let resp: Option<SystemsResponse> = self.post(MAP_DATA, &params, None).await?;

        Ok(resp.map(convert_systems).unwrap_or_default())
    }

    /// The system with the given id, or `None` if there is none.
    ///
    /// There is no lookup endpoint, so this fetches the full listing and
    /// scans it.
    pub async fn get_system_from_id(
        &self,
        id: SystemId,
        query: SystemsQuery,
    ) -> Result<Option<TransportationSystem>, PassioError> {
        let systems = self.get_systems(query).await?;
        Ok(systems.into_iter().find(|s| s.id == id))
    }

    /// Every route of a system.
    #[tracing::instrument(skip(self, system_id), fields(system_id = %system_id))]
    pub async fn get_routes(
        &self,
        system_id: SystemId,
        query: RoutesQuery,
    ) -> Result<Vec<Route>, PassioError> {
        query.validate()?;

        let params = [("getRoutes", query.app_version.to_string())];
        let body = json!({
            "systemSelected0": system_id.to_string(),
            "amount": query.amount,
        });
        let resp: Option<RoutesResponse> = self.post(MAP_DATA, &params, Some(&body)).await?;

        Ok(resp
            .map(|r| convert_routes(r.into_routes(), system_id))
            .unwrap_or_default())
    }

    /// Every stop of a system, with its positions along each route.
    #[tracing::instrument(skip(self, system_id), fields(system_id = %system_id))]
    pub async fn get_stops(
        &self,
        system_id: SystemId,
        query: StopsQuery,
    ) -> Result<Vec<Stop>, PassioError> {
        query.validate()?;

        let params = [("getStops", query.app_version.to_string())];
        let body = json!({
            "s0": system_id.to_string(),
            "sA": query.s_a,
        });
        let resp: Option<StopsResponse> = self.post(MAP_DATA, &params, Some(&body)).await?;

        Ok(resp
            .map(|r| convert_stops(r, system_id))
            .unwrap_or_default())
    }

    /// The stops served by `route`, under any of its ids.
    pub async fn get_route_stops(
        &self,
        route: &Route,
        query: StopsQuery,
    ) -> Result<Vec<Stop>, PassioError> {
        let stops = self.get_stops(route.system_id, query).await?;
        Ok(route.filter_stops(stops))
    }

    /// Current alerts of a system.
    #[tracing::instrument(skip(self, system_id), fields(system_id = %system_id))]
    pub async fn get_system_alerts(
        &self,
        system_id: SystemId,
        query: AlertsQuery,
    ) -> Result<Vec<SystemAlert>, PassioError> {
        query.validate()?;

        let params = [("getAlertMessages", query.app_version.to_string())];
        let body = json!({
            "systemSelected0": system_id.to_string(),
            "amount": query.amount,
            "routesAmount": query.routes_amount,
        });
        let resp: Option<AlertsResponse> = self.post(GO_SERVICES, &params, Some(&body)).await?;

        Ok(resp
            .map(|r| convert_alerts(r, system_id))
            .unwrap_or_default())
    }

    /// Vehicles of a system that are currently reporting.
    #[tracing::instrument(skip(self, system_id), fields(system_id = %system_id))]
    pub async fn get_vehicles(
        &self,
        system_id: SystemId,
        query: VehiclesQuery,
    ) -> Result<Vec<Vehicle>, PassioError> {
        query.validate()?;

        let params = [("getBuses", query.app_version.to_string())];
        let body = json!({
            "s0": system_id.to_string(),
            "sA": 1,
        });
        let resp: Option<VehiclesResponse> = self.post(MAP_DATA, &params, Some(&body)).await?;

        Ok(resp
            .map(|r| convert_vehicles(r, system_id))
            .unwrap_or_default())
    }

    /// POST `body` as JSON and decode the response.
    ///
    /// Returns `None` when the upstream answers with `null` (or nothing).
    async fn post<T: DeserializeOwned>(
        &self,
        script: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Option<T>, PassioError> {
        let url = format!("{}/{}", self.base_url, script);
        debug!(url = %url, ?params, "PassioGo request");

        let mut request = self.http.post(&url).query(params);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PassioError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        decode_response(&text)
    }
}

/// Decode a response body, surfacing an embedded `error` field first.
pub(crate) fn decode_response<T: DeserializeOwned>(text: &str) -> Result<Option<T>, PassioError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(text).map_err(|e| PassioError::json(e, text))?;
    check_api_error(&value)?;

    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| PassioError::json(e, text))
}

/// Fail if the payload carries a non-empty `error` field.
fn check_api_error(value: &Value) -> Result<(), PassioError> {
    match value.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(()),
        Some(Value::String(s)) if s.is_empty() => Ok(()),
        Some(_) => Err(PassioError::Api {
            payload: value.clone(),
        }),
    }
}
