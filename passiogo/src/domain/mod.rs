//! Typed records for PassioGo resources.
//!
//! Every record is built once by the normalizers in `api` and never
//! mutated afterwards. Optional upstream fields are `Option`s that
//! serialize as `null`, so consumers can rely on every key being present.
//! Child records refer to their system by [`SystemId`].

mod alert;
mod route;
mod stop;
mod system;
mod system_id;
mod vehicle;

pub use alert::SystemAlert;
pub use route::Route;
pub use stop::Stop;
pub use system::{TransportationSystem, systems_markdown};
pub use system_id::SystemId;
pub use vehicle::Vehicle;
