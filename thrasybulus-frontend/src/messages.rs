use thrasybulus_shared::Interface;
use thrasybulus_shared::errors::ApiResult;

use crate::interface_sync::StatusPass;

/// Frontend application messages
#[derive(Debug, Clone)]
pub enum ThrasybulusMessage {
    // User actions
    Refresh,         // Fetch the interface list and re-probe the current set
    RefreshStatuses, // Re-probe the current set only
    Manage(String),  // Open the detail page for the named interface
    BackToIndex,
    DismissAlert(usize),
    DismissAllAlerts,
    // Async completions
    InterfacesFetched(ApiResult<Vec<Interface>>),
    StatusesRefreshed(StatusPass),
}
