//! Main application state and message handling for the Thrasybulus dashboard.
//!
//! Follows the Elm architecture used by Iced. The synchronization engine and
//! navigation state are owned here; network work runs as `Task`s whose
//! completions come back as messages.
//!
//! # Message Flow
//!
//! ```text
//! mount / Refresh ──► fetch Task ──► InterfacesFetched ──► status Task ──► StatusesRefreshed
//!                                          │                                    │
//!                                   InterfaceSync::apply_fetch     InterfaceSync::apply_status_pass
//! ```

use iced::{Element, Task};
use tracing::{debug, info, warn};

use crate::api_client::HttpApiClient;
use crate::interface_sync::{InterfaceSync, ProbeBatch, request_interfaces, run_status_pass};
use crate::messages::ThrasybulusMessage;
use crate::navigation::{NavigationState, Page};
use crate::view::render_main_view;

/// Main application state for the dashboard.
pub struct Thrasybulus {
    /// HTTP collaborator for the backend service
    client: HttpApiClient,
    /// Interfaces, statuses, error state and alerts
    sync: InterfaceSync,
    /// Current page and its arguments
    navigation: NavigationState,
    /// Fetches issued but not yet completed
    pending_fetches: usize,
    /// Status passes issued but not yet completed
    pending_passes: usize,
}

impl Thrasybulus {
    /// Creates the application and starts the initial fetch.
    pub fn new(client: HttpApiClient) -> (Self, Task<ThrasybulusMessage>) {
        info!(
            "Dashboard using backend at {}",
            client.endpoint().base_url()
        );
        let mut app = Self::without_fetch(client);
        let task = app.fetch_task();
        (app, task)
    }

    /// Creates the application without touching the network.
    pub fn without_fetch(client: HttpApiClient) -> Self {
        Self {
            client,
            sync: InterfaceSync::new(),
            navigation: NavigationState::new(),
            pending_fetches: 0,
            pending_passes: 0,
        }
    }

    pub fn sync(&self) -> &InterfaceSync {
        &self.sync
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Whether any fetch or status pass is still in flight.
    pub fn is_busy(&self) -> bool {
        self.pending_fetches > 0 || self.pending_passes > 0
    }

    /// Updates application state in response to messages.
    pub fn update(&mut self, message: ThrasybulusMessage) -> Task<ThrasybulusMessage> {
        match message {
            ThrasybulusMessage::Refresh => {
                // The status pass is chained from InterfacesFetched once the
                // new set is in place.
                debug!("Manual refresh requested");
                self.fetch_task()
            }
            ThrasybulusMessage::RefreshStatuses => {
                let batch = self.sync.probe_batch();
                self.status_task(batch)
            }
            ThrasybulusMessage::InterfacesFetched(result) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                match self.sync.apply_fetch(result) {
                    Some(batch) => self.status_task(batch),
                    None => Task::none(),
                }
            }
            ThrasybulusMessage::StatusesRefreshed(pass) => {
                self.pending_passes = self.pending_passes.saturating_sub(1);
                self.sync.apply_status_pass(pass);
                Task::none()
            }
            ThrasybulusMessage::Manage(name) => {
                match self.sync.interfaces().iter().find(|iface| iface.name == name) {
                    Some(interface) => self.navigation.manage_interface(interface),
                    None => warn!("Cannot manage {}: not in the current interface set", name),
                }
                Task::none()
            }
            ThrasybulusMessage::BackToIndex => {
                self.navigation.go_to(Page::Index).without_args();
                Task::none()
            }
            ThrasybulusMessage::DismissAlert(index) => {
                self.sync.dismiss_alert(index);
                Task::none()
            }
            ThrasybulusMessage::DismissAllAlerts => {
                self.sync.take_alerts();
                Task::none()
            }
        }
    }

    /// Renders the current page.
    pub fn view(&self) -> Element<'_, ThrasybulusMessage> {
        render_main_view(&self.sync, &self.navigation, self.is_busy())
    }

    fn fetch_task(&mut self) -> Task<ThrasybulusMessage> {
        self.pending_fetches += 1;
        let client = self.client.clone();
        Task::perform(
            async move { request_interfaces(&client).await },
            ThrasybulusMessage::InterfacesFetched,
        )
    }

    fn status_task(&mut self, batch: ProbeBatch) -> Task<ThrasybulusMessage> {
        self.pending_passes += 1;
        let client = self.client.clone();
        Task::perform(
            async move { run_status_pass(&client, batch).await },
            ThrasybulusMessage::StatusesRefreshed,
        )
    }
}
