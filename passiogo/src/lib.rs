//! Client library for the PassioGo real-time transit tracking service.
//!
//! Fetches transportation systems and their routes, stops, alerts and
//! vehicles as typed records, and polls vehicle positions on a timer.

pub mod api;
pub mod domain;
pub mod live;
pub mod tracker;

pub use api::{PassioClient, PassioConfig, PassioError};
pub use domain::{Route, Stop, SystemAlert, SystemId, TransportationSystem, Vehicle};
pub use tracker::{BusLocation, LiveBusTracker, TrackerConfig, VehicleSource, bus_locations};
