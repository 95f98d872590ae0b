//! Live bus tracking.
//!
//! [`LiveBusTracker`] polls a system's vehicles on a fixed interval and
//! hands each batch of positions to a callback. [`bus_locations`] does a
//! single poll.
//!
//! Polling runs as one spawned task, so ticks never overlap: a tick that
//! falls due while the previous fetch is still running is skipped, not
//! queued. A failed fetch is logged and the next tick runs as normal.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::api::{PassioClient, PassioError, SystemsQuery, VehiclesQuery};
use crate::domain::{SystemId, Vehicle};

/// Default polling interval.
const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// Anything that can report the current vehicles of a system.
pub trait VehicleSource: Send + Sync + 'static {
    fn current_vehicles(
        &self,
        system_id: SystemId,
    ) -> impl Future<Output = Result<Vec<Vehicle>, PassioError>> + Send;
}

impl VehicleSource for PassioClient {
    /// Looks the system up by id, then fetches its vehicles.
    async fn current_vehicles(&self, system_id: SystemId) -> Result<Vec<Vehicle>, PassioError> {
        let system = self
            .get_system_from_id(system_id, SystemsQuery::default())
            .await?
            .ok_or(PassioError::SystemNotFound(system_id))?;

        system.get_vehicles(self, VehiclesQuery::default()).await
    }
}

/// Where one bus was at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusLocation {
    pub id: Option<String>,
    pub name: Option<String>,
    pub route: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl BusLocation {
    pub fn from_vehicle(vehicle: &Vehicle, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            route: vehicle.route_name.clone(),
            latitude: vehicle.latitude,
            longitude: vehicle.longitude,
            speed: vehicle.speed,
            timestamp,
        }
    }
}

/// Current bus locations of a system.
///
/// With `name_filter`, only buses whose name contains it
/// (case-insensitively) are returned.
pub async fn bus_locations<S: VehicleSource>(
    source: &S,
    system_id: SystemId,
    name_filter: Option<&str>,
) -> Result<Vec<BusLocation>, PassioError> {
    let vehicles = source.current_vehicles(system_id).await?;
    let now = Utc::now();

    let locations: Vec<BusLocation> = vehicles
        .iter()
        .filter(|v| name_filter.is_none_or(|needle| v.name_contains(needle)))
        .map(|v| BusLocation::from_vehicle(v, now))
        .collect();

    if let Some(needle) = name_filter
        && locations.is_empty()
    {
        debug!(%system_id, needle, "no buses match name filter");
    }

    Ok(locations)
}

/// Configuration for a [`LiveBusTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Time between polls.
    pub interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl TrackerConfig {
    /// Set the polling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

type UpdateFn = Arc<dyn Fn(Vec<BusLocation>) + Send + Sync>;

/// Handle to the spawned polling task.
struct Running {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Polls a system's bus positions until stopped.
///
/// ```no_run
/// use passiogo::api::{PassioClient, PassioConfig};
/// use passiogo::domain::SystemId;
/// use passiogo::tracker::LiveBusTracker;
///
/// # async fn demo() -> Result<(), passiogo::api::PassioError> {
/// let client = PassioClient::new(PassioConfig::new())?;
/// let mut tracker = LiveBusTracker::new(SystemId::new(3994), client, |buses| {
///     println!("{} buses", buses.len());
/// });
/// tracker.start().await;
/// // ...
/// tracker.stop();
/// # Ok(())
/// # }
/// ```
pub struct LiveBusTracker<S> {
    system_id: SystemId,
    source: Arc<S>,
    on_update: UpdateFn,
    config: TrackerConfig,
    running: Option<Running>,
}

impl<S: VehicleSource> LiveBusTracker<S> {
    /// Create an idle tracker with the default 3 second interval.
    pub fn new(
        system_id: SystemId,
        source: S,
        on_update: impl Fn(Vec<BusLocation>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            system_id,
            source: Arc::new(source),
            on_update: Arc::new(on_update),
            config: TrackerConfig::default(),
            running: None,
        }
    }

    /// Replace the configuration. Takes effect on the next `start`.
    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Poll once right away, then keep polling every interval.
    ///
    /// Returns after the first poll. Does nothing if already running.
    pub async fn start(&mut self) {
        if self.is_running() {
            debug!(system_id = %self.system_id, "tracker already running");
            return;
        }

        if let Some(locations) = poll(self.source.as_ref(), self.system_id).await {
            (self.on_update)(locations);
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(poll_loop(
            self.system_id,
            Arc::clone(&self.source),
            Arc::clone(&self.on_update),
            self.config.interval,
            shutdown_rx,
        ));

        info!(
            system_id = %self.system_id,
            interval_ms = self.config.interval.as_millis() as u64,
            "tracker started"
        );
        self.running = Some(Running { shutdown, task });
    }
}

impl<S> LiveBusTracker<S> {
    /// Stop polling. Safe to call when already stopped.
    ///
    /// A fetch already in flight runs to completion, but its result is
    /// not delivered.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.shutdown.send(true);
            info!(system_id = %self.system_id, "tracker stopped");
        }
    }

    /// Whether the polling task is alive. False once stopped, or if the
    /// task died (for example from a panicking callback).
    pub fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|r| !r.task.is_finished())
    }

    pub fn system_id(&self) -> SystemId {
        self.system_id
    }
}

impl<S> Drop for LiveBusTracker<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop<S: VehicleSource>(
    system_id: SystemId,
    source: Arc<S>,
    on_update: UpdateFn,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = interval.tick() => {}
        }

        let locations = poll(source.as_ref(), system_id).await;
        if *shutdown.borrow() {
            break;
        }
        if let Some(locations) = locations {
            on_update(locations);
        }
    }

    debug!(%system_id, "poll loop exited");
}

/// One fetch. Errors are logged, never returned.
async fn poll<S: VehicleSource>(source: &S, system_id: SystemId) -> Option<Vec<BusLocation>> {
    match bus_locations(source, system_id, None).await {
        Ok(locations) => {
            debug!(%system_id, count = locations.len(), "fetched bus locations");
            Some(locations)
        }
        Err(e) => {
            error!(%system_id, error = %e, "failed to fetch bus locations");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::mpsc;

    use super::*;

    const UGA: SystemId = SystemId::new(3994);

    fn vehicle(id: &str, name: &str) -> Vehicle {
        Vehicle {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            kind: None,
            system_id: UGA,
            calculated_course: None,
            route_id: Some("10".into()),
            route_name: Some("East".into()),
            color: None,
            created: None,
            latitude: Some(33.95),
            longitude: Some(-83.37),
            speed: Some(12.0),
            pax_load: None,
            out_of_service: Some(false),
            more: None,
            trip_id: None,
        }
    }

    /// Plays back canned results, then returns an empty list forever.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Vec<Vehicle>, PassioError>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Vec<Vehicle>, PassioError>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Self {
                script: Mutex::new(script.into()),
                calls: Arc::clone(&calls),
            };
            (source, calls)
        }
    }

    impl VehicleSource for ScriptedSource {
        async fn current_vehicles(&self, _: SystemId) -> Result<Vec<Vehicle>, PassioError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[tokio::test(start_paused = true)]
    async fn start_delivers_first_batch_immediately() {
        let (source, calls) = ScriptedSource::new(vec![Ok(vec![vehicle("501", "Bus 501")])]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = LiveBusTracker::new(UGA, source, move |batch| {
            let _ = tx.send(batch);
        });

        tracker.start().await;

        let batch = rx.try_recv().expect("first batch before start returns");
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id.as_deref(), Some("501"));
        assert_eq!(batch[0].route.as_deref(), Some("East"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(tracker.is_running());

        tracker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_keeps_timer_armed() {
        init_tracing();
        let (source, calls) = ScriptedSource::new(vec![
            Err(PassioError::SystemNotFound(UGA)),
            Ok(vec![vehicle("502", "Bus 502")]),
        ]);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tracker = LiveBusTracker::new(UGA, source, move |batch| {
            let _ = tx.send(batch);
        });

        tracker.start().await;
        assert!(rx.try_recv().is_err(), "failed fetch must not call back");
        assert!(tracker.is_running());

        let batch = tokio::time::timeout(Duration::from_secs(4), rx.recv())
            .await
            .expect("second tick within the interval")
            .unwrap();
        assert_eq!(batch[0].id.as_deref(), Some("502"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        tracker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_follow_configured_interval() {
        let (source, calls) = ScriptedSource::new(Vec::new());
        let mut tracker = LiveBusTracker::new(UGA, source, |_| {})
            .with_config(TrackerConfig::default().with_interval(Duration::from_millis(500)));

        tracker.start().await;
        tokio::time::sleep(Duration::from_millis(1250)).await;

        // Immediate poll plus ticks at 500 and 1000 ms.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        tracker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_twice_prevents_further_callbacks() {
        let (source, calls) = ScriptedSource::new(Vec::new());
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&delivered);
        let mut tracker = LiveBusTracker::new(UGA, source, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tracker.start().await;
        assert_eq!(delivered.load(Ordering::SeqCst), 1);

        tracker.stop();
        tracker.stop();
        assert!(!tracker.is_running());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_is_a_no_op() {
        let (source, calls) = ScriptedSource::new(Vec::new());
        let mut tracker = LiveBusTracker::new(UGA, source, |_| {});

        tracker.start().await;
        tracker.start().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tracker.stop();
    }

    /// Takes `delays[n]` to answer its n-th call, and records when each
    /// call started.
    struct SlowSource {
        delays: Vec<Duration>,
        origin: Instant,
        starts: Arc<Mutex<Vec<Duration>>>,
    }

    impl SlowSource {
        fn new(delays_ms: &[u64]) -> (Self, Arc<Mutex<Vec<Duration>>>) {
            let starts = Arc::new(Mutex::new(Vec::new()));
            let source = Self {
                delays: delays_ms.iter().copied().map(Duration::from_millis).collect(),
                origin: Instant::now(),
                starts: Arc::clone(&starts),
            };
            (source, starts)
        }
    }

    impl VehicleSource for SlowSource {
        async fn current_vehicles(&self, _: SystemId) -> Result<Vec<Vehicle>, PassioError> {
            let delay = {
                let mut starts = self.starts.lock().unwrap();
                let n = starts.len();
                starts.push(self.origin.elapsed());
                self.delays.get(n).copied().unwrap_or_default()
            };
            tokio::time::sleep(delay).await;
            Ok(vec![vehicle("501", "Bus 501")])
        }
    }

    fn millis(starts: &Mutex<Vec<Duration>>) -> Vec<u128> {
        starts.lock().unwrap().iter().map(|d| d.as_millis()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_missed_during_slow_fetch_are_skipped() {
        // Second fetch spans the ticks due at 2 s, 3 s and 4 s.
        let (source, starts) = SlowSource::new(&[0, 3500]);
        let mut tracker = LiveBusTracker::new(UGA, source, |_| {})
            .with_config(TrackerConfig::default().with_interval(Duration::from_secs(1)));

        tracker.start().await;
        tokio::time::sleep(Duration::from_millis(5500)).await;

        // One late tick fires as the slow fetch returns, then the schedule
        // realigns to the next whole interval instead of catching up.
        assert_eq!(millis(&starts), vec![0, 1000, 4500, 5000]);
        tracker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_discards_fetch_in_flight() {
        let (source, starts) = SlowSource::new(&[0, 2000]);
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&delivered);
        let mut tracker = LiveBusTracker::new(UGA, source, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .with_config(TrackerConfig::default().with_interval(Duration::from_secs(1)));

        tracker.start().await;
        assert_eq!(delivered.load(Ordering::SeqCst), 1);

        // The tick at 1 s starts a fetch that finishes at 3 s.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(millis(&starts), vec![0, 1000]);
        tracker.stop();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
        assert_eq!(millis(&starts), vec![0, 1000]);
    }

    #[tokio::test(start_paused = true)]
    async fn dead_poll_task_is_not_running() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&delivered);
        let (source, _) = ScriptedSource::new(Vec::new());
        let mut tracker = LiveBusTracker::new(UGA, source, move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) > 0 {
                panic!("callback failure");
            }
        })
        .with_config(TrackerConfig::default().with_interval(Duration::from_secs(1)));

        tracker.start().await;
        assert!(tracker.is_running());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(delivered.load(Ordering::SeqCst), 2);
        assert!(!tracker.is_running());

        // A dead task does not block a restart.
        delivered.store(0, Ordering::SeqCst);
        tracker.start().await;
        assert!(tracker.is_running());
        tracker.stop();
    }

    #[tokio::test]
    async fn bus_locations_filters_by_name() {
        let (source, _) = ScriptedSource::new(vec![Ok(vec![
            vehicle("1", "East Campus 12"),
            vehicle("2", "Orbit 3"),
            vehicle("3", "east express"),
        ])]);

        let found = bus_locations(&source, UGA, Some("EAST")).await.unwrap();
        let ids: Vec<_> = found.iter().filter_map(|b| b.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(found.iter().all(|b| b.speed == Some(12.0)));
    }

    #[tokio::test]
    async fn bus_locations_propagates_errors() {
        let (source, _) = ScriptedSource::new(vec![Err(PassioError::SystemNotFound(UGA))]);

        let err = bus_locations(&source, UGA, None).await.unwrap_err();
        assert!(matches!(err, PassioError::SystemNotFound(id) if id == UGA));
    }
}
