//! Published bus routes.

use serde::Serialize;

use crate::api::{PassioClient, PassioError, StopsQuery};

use super::{Stop, SystemId};

/// A bus line within one system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,
    pub group_id: Option<i64>,
    pub group_color: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub name_orig: Option<String>,
    pub fullname: Option<String>,
    /// Alternate id. Stop listings sometimes key routes by this instead of `id`.
    pub myid: Option<i64>,
    pub map_app: Option<bool>,
    pub archive: Option<bool>,
    pub go_prefix_route_name: Option<bool>,
    pub go_show_schedule: Option<bool>,
    pub outdated: Option<bool>,
    pub distance: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub service_time: Option<String>,
    pub service_time_short: Option<String>,
    pub system_id: SystemId,
}

impl Route {
    /// Keys under which a stop's route map may list this route.
    ///
    /// Zero is never a real id upstream, so a zero `myid` or `group_id`
    /// does not count.
    pub fn membership_keys(&self) -> Vec<String> {
        let mut keys = vec![self.id.to_string()];
        keys.extend(
            [self.myid, self.group_id]
                .into_iter()
                .flatten()
                .filter(|&id| id != 0)
                .map(|id| id.to_string()),
        );
        keys
    }

    /// Whether `stop` lies on this route under any of its ids.
    pub fn serves(&self, stop: &Stop) -> bool {
        self.membership_keys()
            .iter()
            .any(|key| stop.routes_and_positions.contains_key(key))
    }

    /// The stops of this route.
    ///
    /// Fetches every stop of the owning system and keeps the ones this
    /// route serves.
    pub async fn get_stops(
        &self,
        client: &PassioClient,
        query: StopsQuery,
    ) -> Result<Vec<Stop>, PassioError> {
        let stops = client.get_stops(self.system_id, query).await?;
        Ok(self.filter_stops(stops))
    }

    /// Keep the stops this route serves, in their original order.
    pub fn filter_stops(&self, stops: Vec<Stop>) -> Vec<Stop> {
        stops.into_iter().filter(|s| self.serves(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn route(id: i64, myid: Option<i64>, group_id: Option<i64>) -> Route {
        Route {
            id,
            group_id,
            group_color: None,
            name: None,
            short_name: None,
            name_orig: None,
            fullname: None,
            myid,
            map_app: None,
            archive: None,
            go_prefix_route_name: None,
            go_show_schedule: None,
            outdated: None,
            distance: None,
            latitude: None,
            longitude: None,
            timezone: None,
            service_time: None,
            service_time_short: None,
            system_id: SystemId::new(1),
        }
    }

    fn stop_on(id: &str, route_keys: &[&str]) -> Stop {
        let routes_and_positions: HashMap<String, Vec<usize>> = route_keys
            .iter()
            .map(|k| (k.to_string(), vec![0]))
            .collect();
        Stop {
            id: id.to_string(),
            routes_and_positions,
            system_id: SystemId::new(1),
            name: None,
            latitude: None,
            longitude: None,
            radius: None,
        }
    }

    #[test]
    fn membership_is_a_union_of_ids() {
        let r = route(10, Some(20), Some(30));
        let stops = vec![
            stop_on("a", &["10"]),
            stop_on("b", &["20"]),
            stop_on("c", &["30"]),
            stop_on("d", &["99"]),
            stop_on("e", &["10", "20"]),
        ];

        let ids: Vec<_> = r
            .filter_stops(stops)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "e"]);
    }

    #[test]
    fn zero_alternate_ids_are_ignored() {
        let r = route(10, Some(0), Some(0));
        assert_eq!(r.membership_keys(), vec!["10".to_string()]);
        assert!(!r.serves(&stop_on("x", &["0"])));
    }

    #[test]
    fn missing_alternate_ids_only_match_primary() {
        let r = route(10, None, None);
        assert!(r.serves(&stop_on("a", &["10"])));
        assert!(!r.serves(&stop_on("b", &["100"])));
    }
}
