//! Shared types and wire definitions for the Thrasybulus dashboard.
//!
//! This crate contains the data structures exchanged between the dashboard
//! frontend and the Thrasybulus backend service, plus the error taxonomy used
//! when that exchange fails.
//!
//! # Communication Patterns
//!
//! The backend is a plain HTTP service listening on port [`DEFAULT_PORT`]:
//!
//! ```text
//! Frontend                                  Backend
//!    │ ──── GET /interfaces ─────────────────► │
//!    │ ◄─── JSON array of Interface ────────── │
//!    │                                         │
//!    │ ──── POST /interface/IsLive ──────────► │
//!    │      {"interface": "eth0"}              │
//!    │ ◄─── "active" | "inactive" ──────────── │
//! ```
//!
//! # Key Components
//!
//! * [`routes`] - Request paths on the backend service
//! * [`Interface`] - Host network interface record
//! * [`LinkStatus`] - Liveness tag returned by the probe endpoint
//! * [`IsLiveRequest`] - Body of a liveness probe
//! * [`errors`] - Transport and API error taxonomy

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod errors;

/// Port the backend service listens on.
pub const DEFAULT_PORT: u16 = 9901;

/// Host the backend service is expected on when nothing else is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Request paths exposed by the backend service.
pub mod routes {
    /// Interface enumeration (`GET`).
    pub const INTERFACES: &str = "/interfaces";
    /// Interface liveness probe (`POST`).
    pub const IS_LIVE: &str = "/interface/IsLive";
}

/// Host network interface as reported by the backend.
///
/// The backend sends additional fields (`index`, `flags`) that the dashboard
/// does not use; they are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interface {
    /// Interface name (e.g., "eth0", "wlan0"). Unique within one fetched set.
    pub name: String,
    /// Hardware address. Empty when the backend reports none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mac: String,
    /// Human-readable description, if the platform provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned addresses in backend order.
    pub ips: Vec<String>,
}

impl Interface {
    /// Returns the description when it is present and non-blank.
    pub fn display_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|desc| !desc.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Liveness of an interface as reported by the probe endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Inactive,
}

impl LinkStatus {
    /// Parses the exact wire literal. Anything else is not a status.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "active" => Some(LinkStatus::Active),
            "inactive" => Some(LinkStatus::Inactive),
            _ => None,
        }
    }

    /// Wire literal for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Active => "active",
            LinkStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a `POST /interface/IsLive` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IsLiveRequest {
    pub interface: String,
}

impl IsLiveRequest {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }
}
