//! Interface synchronization engine.
//!
//! Fetches the interface list from the backend, probes the liveness of every
//! interface in it and keeps the results as a view-ready snapshot.
//!
//! # Cycle
//!
//! ```text
//! fetch_interfaces ──ok──► apply_fetch ──► ProbeBatch ──► run_status_pass
//!        │                 (generation+1)                      │
//!        └──err──► ErrorState                                  ▼
//!                                       apply_status_pass ◄── StatusPass
//!                                       (StatusMap replaced, alerts queued)
//! ```
//!
//! Fetch failures become the persistent [`ErrorState`]. Probe failures and
//! unexpected probe answers become per-interface [`Alert`]s and leave that
//! interface without a status. Every successful fetch starts a new
//! generation; passes issued for an older generation are dropped on arrival.
//!
//! The async methods on [`InterfaceSync`] run a whole cycle in place. The
//! iced application drives the same steps through `Task`s instead, since it
//! cannot hold `&mut` state across an await.

use std::collections::{HashMap, HashSet, VecDeque};

use futures_util::future::join_all;
use thiserror::Error;
use thrasybulus_shared::errors::{ApiError, ApiResult, ErrorState};
use thrasybulus_shared::{Interface, IsLiveRequest, LinkStatus, routes};
use tracing::{debug, error, info, warn};

use crate::api_client::ApiClient;
use crate::view_model::{InterfaceRow, derive_rows};

/// Liveness results keyed by interface name.
pub type StatusMap = HashMap<String, LinkStatus>;

/// Heading of the alert raised when a probe answers outside the contract.
pub const CONTRACT_VIOLATION_HEAD: &str = "API Contract Violation";

/// Why a single liveness probe produced no status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("unexpected status '{value}'")]
    UnexpectedStatus { value: String },
}

impl ProbeError {
    /// Builds the user-facing alert for `interface`.
    pub fn to_alert(&self, interface: &str) -> Alert {
        match self {
            ProbeError::Api(err) => {
                let state = err.to_error_state();
                Alert {
                    interface: interface.to_string(),
                    head: state.head,
                    body: format!("Status check for {} failed: {}", interface, state.body),
                }
            }
            ProbeError::UnexpectedStatus { value } => Alert {
                interface: interface.to_string(),
                head: CONTRACT_VIOLATION_HEAD.to_string(),
                body: format!(
                    "Interface {} reported unexpected status \"{}\" (expected \"active\" or \"inactive\").",
                    interface, value
                ),
            },
        }
    }
}

/// Transient notice about one interface's probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Interface the probe was issued for.
    pub interface: String,
    pub head: String,
    pub body: String,
}

/// Interfaces to probe, tagged with the fetch generation they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeBatch {
    pub generation: u64,
    pub interfaces: Vec<String>,
}

/// Outcome of one probe pass over a [`ProbeBatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPass {
    pub generation: u64,
    pub statuses: StatusMap,
    pub alerts: Vec<Alert>,
}

/// Issues `GET /interfaces` and decodes the interface array.
pub async fn request_interfaces<C: ApiClient>(client: &C) -> ApiResult<Vec<Interface>> {
    let body = client.get(routes::INTERFACES).await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// Issues one `POST /interface/IsLive` for `interface`.
pub async fn probe_interface<C: ApiClient>(
    client: &C,
    interface: &str,
) -> Result<LinkStatus, ProbeError> {
    let request =
        serde_json::to_value(IsLiveRequest::new(interface)).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })?;
    let body = client.post(routes::IS_LIVE, &request).await?;
    decode_status(&body)
}

/// Interprets a probe response body.
///
/// Accepts the bare literal or a JSON string literal. Matching is exact.
pub fn decode_status(body: &str) -> Result<LinkStatus, ProbeError> {
    let trimmed = body.trim();
    let value = if trimmed.starts_with('"') {
        serde_json::from_str::<String>(trimmed).unwrap_or_else(|_| trimmed.to_string())
    } else {
        trimmed.to_string()
    };

    LinkStatus::from_wire(&value).ok_or(ProbeError::UnexpectedStatus { value })
}

/// Probes every interface in `batch` concurrently.
///
/// Failures never stop the pass; they are turned into alerts and the
/// interface is left out of the returned statuses.
pub async fn run_status_pass<C: ApiClient>(client: &C, batch: ProbeBatch) -> StatusPass {
    debug!(
        "Probing {} interfaces (generation {})",
        batch.interfaces.len(),
        batch.generation
    );

    let probes = batch.interfaces.iter().map(|name| async move {
        let result = probe_interface(client, name).await;
        (name.clone(), result)
    });
    let results = join_all(probes).await;

    let mut pass = StatusPass {
        generation: batch.generation,
        ..StatusPass::default()
    };
    for (name, result) in results {
        match result {
            Ok(status) => {
                debug!("{} is {}", name, status);
                pass.statuses.insert(name, status);
            }
            Err(e) => {
                warn!("Status probe for {} failed: {}", name, e);
                pass.alerts.push(e.to_alert(&name));
            }
        }
    }
    pass
}

/// Client-side snapshot of the backend's interfaces and their liveness.
#[derive(Debug, Default)]
pub struct InterfaceSync {
    interfaces: Vec<Interface>,
    statuses: StatusMap,
    error: Option<ErrorState>,
    alerts: VecDeque<Alert>,
    generation: u64,
}

impl InterfaceSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interfaces from the most recent successful fetch, in backend order.
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    /// Liveness of `name`, or `None` if unknown.
    pub fn status(&self, name: &str) -> Option<LinkStatus> {
        self.statuses.get(name).copied()
    }

    /// Most recent fetch failure, cleared by the next successful fetch.
    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }

    /// Pending alerts, oldest first.
    pub fn alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    /// Removes the alert at `index`. Out-of-range indices are ignored.
    pub fn dismiss_alert(&mut self, index: usize) -> Option<Alert> {
        self.alerts.remove(index)
    }

    /// Drains every pending alert.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        self.alerts.drain(..).collect()
    }

    /// Number of successful fetches so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Merged interface × status rows for rendering.
    pub fn rows(&self) -> Vec<InterfaceRow> {
        derive_rows(&self.interfaces, &self.statuses)
    }

    /// Records the outcome of an interface fetch.
    ///
    /// On success the interface set is replaced, the error state cleared,
    /// alerts for interfaces no longer in the set dropped, and a new
    /// generation started; the returned batch must be probed next. On
    /// failure the previous set is kept and the error state updated.
    pub fn apply_fetch(&mut self, result: ApiResult<Vec<Interface>>) -> Option<ProbeBatch> {
        match result {
            Ok(interfaces) => {
                self.generation += 1;
                info!(
                    "Fetched {} interfaces (generation {})",
                    interfaces.len(),
                    self.generation
                );
                self.interfaces = interfaces;
                self.error = None;

                let known: HashSet<&str> =
                    self.interfaces.iter().map(|i| i.name.as_str()).collect();
                self.alerts
                    .retain(|alert| known.contains(alert.interface.as_str()));

                Some(self.probe_batch())
            }
            Err(e) => {
                error!("Failed to fetch interfaces: {}", e);
                self.error = Some(e.to_error_state());
                None
            }
        }
    }

    /// Batch covering the current interface set.
    pub fn probe_batch(&self) -> ProbeBatch {
        let mut seen = HashSet::new();
        let interfaces = self
            .interfaces
            .iter()
            .filter(|iface| seen.insert(iface.name.as_str()))
            .map(|iface| iface.name.clone())
            .collect();

        ProbeBatch {
            generation: self.generation,
            interfaces,
        }
    }

    /// Records a finished probe pass.
    ///
    /// Returns `false` when the pass belongs to a superseded generation, in
    /// which case nothing changes. Otherwise the status map is replaced with
    /// the pass results and its alerts are queued.
    pub fn apply_status_pass(&mut self, pass: StatusPass) -> bool {
        if pass.generation != self.generation {
            debug!(
                "Discarding status pass for generation {} (current {})",
                pass.generation, self.generation
            );
            return false;
        }

        let known: HashSet<&str> = self.interfaces.iter().map(|i| i.name.as_str()).collect();
        self.statuses = pass
            .statuses
            .into_iter()
            .filter(|(name, _)| known.contains(name.as_str()))
            .collect();
        self.alerts.extend(pass.alerts);

        info!(
            "Status pass complete: {}/{} interfaces resolved",
            self.statuses.len(),
            self.interfaces.len()
        );
        true
    }

    /// Fetches the interface list and, on success, refreshes statuses.
    pub async fn fetch_interfaces<C: ApiClient>(&mut self, client: &C) {
        let result = request_interfaces(client).await;
        if let Some(batch) = self.apply_fetch(result) {
            let pass = run_status_pass(client, batch).await;
            self.apply_status_pass(pass);
        }
    }

    /// Probes every interface in the current set.
    pub async fn refresh_statuses<C: ApiClient>(&mut self, client: &C) {
        let pass = run_status_pass(client, self.probe_batch()).await;
        self.apply_status_pass(pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(name: &str) -> Interface {
        Interface {
            name: name.to_string(),
            mac: "AA:BB".to_string(),
            description: None,
            ips: vec![],
        }
    }

    #[test]
    fn test_decode_status_literals() {
        assert_eq!(decode_status("active").unwrap(), LinkStatus::Active);
        assert_eq!(decode_status("\"inactive\"").unwrap(), LinkStatus::Inactive);
        assert_eq!(decode_status(" active\n").unwrap(), LinkStatus::Active);
        assert_eq!(
            decode_status("\"unknown\"").unwrap_err(),
            ProbeError::UnexpectedStatus {
                value: "unknown".to_string()
            }
        );
        assert!(decode_status("ACTIVE").is_err());
        assert!(decode_status("").is_err());
    }

    #[test]
    fn test_contract_violation_alert_names_interface_and_value() {
        let alert = ProbeError::UnexpectedStatus {
            value: "unknown".to_string(),
        }
        .to_alert("wlan0");
        assert_eq!(alert.interface, "wlan0");
        assert_eq!(alert.head, CONTRACT_VIOLATION_HEAD);
        assert!(alert.body.contains("wlan0"));
        assert!(alert.body.contains("\"unknown\""));
    }

    #[test]
    fn test_api_failure_alert_uses_classification() {
        let alert = ProbeError::Api(ApiError::Unreachable {
            message: "refused".to_string(),
        })
        .to_alert("eth0");
        assert_eq!(alert.head, "Network Error");
        assert!(alert.body.contains("eth0"));
        assert!(alert.body.contains("Failed to reach server."));
    }

    #[test]
    fn test_apply_fetch_failure_keeps_previous_set() {
        let mut sync = InterfaceSync::new();
        assert!(sync.apply_fetch(Ok(vec![iface("eth0")])).is_some());

        let batch = sync.apply_fetch(Err(ApiError::Unreachable {
            message: "refused".to_string(),
        }));
        assert!(batch.is_none());
        assert_eq!(sync.interfaces(), &[iface("eth0")]);
        assert_eq!(sync.generation(), 1);
        assert_eq!(
            sync.error(),
            Some(&ErrorState::new("Network Error", "Failed to reach server."))
        );

        sync.apply_fetch(Ok(vec![iface("eth1")]));
        assert!(sync.error().is_none());
    }

    #[test]
    fn test_stale_pass_is_discarded() {
        let mut sync = InterfaceSync::new();
        let first = sync.apply_fetch(Ok(vec![iface("eth0")])).unwrap();
        sync.apply_fetch(Ok(vec![iface("eth1")]));

        let stale = StatusPass {
            generation: first.generation,
            statuses: StatusMap::from([("eth0".to_string(), LinkStatus::Active)]),
            alerts: vec![],
        };
        assert!(!sync.apply_status_pass(stale));
        assert!(sync.statuses().is_empty());
    }

    #[test]
    fn test_pass_replaces_status_map_wholesale() {
        let mut sync = InterfaceSync::new();
        let batch = sync
            .apply_fetch(Ok(vec![iface("eth0"), iface("wlan0")]))
            .unwrap();

        sync.apply_status_pass(StatusPass {
            generation: batch.generation,
            statuses: StatusMap::from([
                ("eth0".to_string(), LinkStatus::Active),
                ("wlan0".to_string(), LinkStatus::Inactive),
            ]),
            alerts: vec![],
        });
        assert_eq!(sync.statuses().len(), 2);

        sync.apply_status_pass(StatusPass {
            generation: batch.generation,
            statuses: StatusMap::from([("wlan0".to_string(), LinkStatus::Active)]),
            alerts: vec![],
        });
        assert_eq!(sync.status("eth0"), None);
        assert_eq!(sync.status("wlan0"), Some(LinkStatus::Active));
    }

    #[test]
    fn test_fetch_drops_alerts_for_vanished_interfaces() {
        let mut sync = InterfaceSync::new();
        let batch = sync
            .apply_fetch(Ok(vec![iface("eth0"), iface("wlan0")]))
            .unwrap();
        let violation = |name: &str| {
            ProbeError::UnexpectedStatus {
                value: "unknown".to_string(),
            }
            .to_alert(name)
        };
        sync.apply_status_pass(StatusPass {
            generation: batch.generation,
            statuses: StatusMap::new(),
            alerts: vec![violation("eth0"), violation("wlan0")],
        });
        assert_eq!(sync.alert_count(), 2);

        sync.apply_fetch(Ok(vec![iface("eth0")]));
        assert_eq!(sync.take_alerts(), vec![violation("eth0")]);

        // A failed fetch keeps the set, so its alerts stay too.
        let generation = sync.generation();
        sync.apply_status_pass(StatusPass {
            generation,
            statuses: StatusMap::new(),
            alerts: vec![violation("eth0")],
        });
        sync.apply_fetch(Err(ApiError::Unreachable {
            message: "refused".to_string(),
        }));
        assert_eq!(sync.alert_count(), 1);
    }

    #[test]
    fn test_probe_batch_dedupes_names() {
        let mut sync = InterfaceSync::new();
        let batch = sync
            .apply_fetch(Ok(vec![iface("eth0"), iface("eth0"), iface("lo")]))
            .unwrap();
        assert_eq!(batch.interfaces, vec!["eth0".to_string(), "lo".to_string()]);
    }

    #[test]
    fn test_alert_queue() {
        let mut sync = InterfaceSync::new();
        let batch = sync.apply_fetch(Ok(vec![iface("eth0")])).unwrap();
        let alert = ProbeError::UnexpectedStatus {
            value: "x".to_string(),
        }
        .to_alert("eth0");

        sync.apply_status_pass(StatusPass {
            generation: batch.generation,
            statuses: StatusMap::new(),
            alerts: vec![alert.clone(), alert.clone()],
        });
        assert_eq!(sync.alert_count(), 2);
        assert_eq!(sync.dismiss_alert(0), Some(alert.clone()));
        assert_eq!(sync.dismiss_alert(5), None);
        assert_eq!(sync.take_alerts(), vec![alert]);
        assert_eq!(sync.alert_count(), 0);
    }
}
