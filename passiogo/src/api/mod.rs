//! PassioGo HTTP client.
//!
//! This module talks to the undocumented PassioGo web API that backs the
//! PassioGo rider apps.
//!
//! Key characteristics of the API:
//! - Every call is a POST to `mapGetData.php` or `goServices.php`, with the
//!   operation selected by a query parameter
//! - Field types vary between deployments (numbers arrive as strings,
//!   flags as `"0"`/`"1"`, empty collections as `[]`)
//! - Errors can arrive inside an HTTP 200 response as an `error` field

mod client;
mod convert;
mod error;
pub mod lenient;
mod query;
mod types;

pub use client::{PassioClient, PassioConfig};
pub use convert::{
    ConversionError, convert_alerts, convert_routes, convert_stops, convert_system,
    convert_systems, convert_vehicles, positions_of, route_sequences,
};
pub use error::PassioError;
pub use query::{AlertsQuery, RoutesQuery, StopsQuery, SystemsQuery, VehiclesQuery};
pub use types::{
    AlertDto, AlertsResponse, RouteDto, RoutesResponse, StopDto, StopsResponse, SystemDto,
    SystemsResponse, VehicleDto, VehiclesResponse,
};
