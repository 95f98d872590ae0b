//! Rider-facing system alerts.

use serde::Serialize;

use super::SystemId;

/// A service disruption notice, optionally tied to one route.
///
/// Most fields are passed through from the upstream's GTFS-alert export
/// without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAlert {
    pub id: i64,
    pub system_id: SystemId,
    pub route_id: Option<i64>,
    pub name: Option<String>,
    pub html: Option<String>,
    pub archive: Option<bool>,
    pub important: Option<bool>,
    pub date_time_created: Option<String>,
    pub date_time_from: Option<String>,
    pub date_time_to: Option<String>,
    pub as_push: Option<bool>,
    pub gtfs: Option<bool>,
    pub gtfs_alert_cause_id: Option<i64>,
    pub gtfs_alert_effect_id: Option<i64>,
    pub gtfs_alert_url: Option<String>,
    pub gtfs_alert_header_text: Option<String>,
    pub gtfs_alert_description_text: Option<String>,
    pub route_group_id: Option<i64>,
    pub created_utc: Option<String>,
    pub author_id: Option<i64>,
    pub author: Option<String>,
    pub updated: Option<String>,
    pub update_author_id: Option<i64>,
    pub update_author: Option<String>,
    pub created_f: Option<String>,
    pub from_f: Option<String>,
    pub from_ok: Option<bool>,
    pub to_ok: Option<bool>,
}

impl SystemAlert {
    /// Whether the alert concerns a specific route rather than the whole system.
    pub fn is_route_specific(&self) -> bool {
        self.route_id.is_some_and(|id| id != 0)
    }
}
