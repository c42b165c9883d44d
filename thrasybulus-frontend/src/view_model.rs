//! Display rows derived from the interface set and its status map.
//!
//! The render layer only sees [`InterfaceRow`]s. Missing liveness is kept as
//! [`StatusIndicator::Unknown`]; it is never folded into active or inactive.

use thrasybulus_shared::{Interface, LinkStatus};

use crate::interface_sync::StatusMap;

/// Shown when an interface has no (or a blank) description.
pub const NO_DESCRIPTION: &str = "No description available.";
/// Shown when an interface has no addresses.
pub const NO_IP_ADDRESSES: &str = "No IP addresses";
/// Shown when an interface has no hardware address.
pub const NO_MAC: &str = "No MAC address";
/// Shown in place of a status that could not be determined.
pub const STATUS_UNAVAILABLE: &str = "Status unavailable";

/// Liveness indicator for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Active,
    Inactive,
    Unknown,
}

impl From<Option<LinkStatus>> for StatusIndicator {
    fn from(status: Option<LinkStatus>) -> Self {
        match status {
            Some(LinkStatus::Active) => StatusIndicator::Active,
            Some(LinkStatus::Inactive) => StatusIndicator::Inactive,
            None => StatusIndicator::Unknown,
        }
    }
}

impl StatusIndicator {
    pub fn label(&self) -> &'static str {
        match self {
            StatusIndicator::Active => "Active",
            StatusIndicator::Inactive => "Inactive",
            StatusIndicator::Unknown => STATUS_UNAVAILABLE,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatusIndicator::Active => "🟢",
            StatusIndicator::Inactive => "🔴",
            StatusIndicator::Unknown => "⚪",
        }
    }
}

/// One interface paired with its liveness, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRow {
    pub name: String,
    pub mac: String,
    pub description: String,
    pub addresses: Vec<String>,
    pub status: StatusIndicator,
    /// Source record, handed to navigation on "manage".
    pub interface: Interface,
}

impl InterfaceRow {
    pub fn new(interface: &Interface, status: Option<LinkStatus>) -> Self {
        let mac = if interface.mac.trim().is_empty() {
            NO_MAC.to_string()
        } else {
            interface.mac.clone()
        };

        Self {
            name: interface.name.clone(),
            mac,
            description: interface
                .display_description()
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            addresses: interface.ips.clone(),
            status: status.into(),
            interface: interface.clone(),
        }
    }

    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }

    /// Address lines for display, or the placeholder when there are none.
    pub fn address_lines(&self) -> Vec<&str> {
        if self.addresses.is_empty() {
            vec![NO_IP_ADDRESSES]
        } else {
            self.addresses.iter().map(String::as_str).collect()
        }
    }
}

/// Pairs every interface with `statuses[name]`, preserving interface order.
pub fn derive_rows(interfaces: &[Interface], statuses: &StatusMap) -> Vec<InterfaceRow> {
    interfaces
        .iter()
        .map(|iface| InterfaceRow::new(iface, statuses.get(&iface.name).copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(name: &str, ips: &[&str]) -> Interface {
        Interface {
            name: name.to_string(),
            mac: "AA:BB".to_string(),
            description: None,
            ips: ips.iter().map(|ip| ip.to_string()).collect(),
        }
    }

    #[test]
    fn test_active_row_with_one_address() {
        let interfaces = vec![iface("eth0", &["10.0.0.2"])];
        let statuses = StatusMap::from([("eth0".to_string(), LinkStatus::Active)]);

        let rows = derive_rows(&interfaces, &statuses);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, StatusIndicator::Active);
        assert_eq!(rows[0].address_lines(), vec!["10.0.0.2"]);
        assert!(rows[0].has_addresses());
    }

    #[test]
    fn test_empty_ips_render_placeholder() {
        let rows = derive_rows(&[iface("lo", &[])], &StatusMap::new());
        assert!(!rows[0].has_addresses());
        assert_eq!(rows[0].address_lines(), vec![NO_IP_ADDRESSES]);
    }

    #[test]
    fn test_missing_status_is_unknown() {
        let statuses = StatusMap::from([("eth0".to_string(), LinkStatus::Inactive)]);
        let rows = derive_rows(&[iface("eth0", &[]), iface("wlan0", &[])], &statuses);

        assert_eq!(rows[0].status, StatusIndicator::Inactive);
        assert_eq!(rows[1].status, StatusIndicator::Unknown);
        assert_eq!(rows[1].status.label(), STATUS_UNAVAILABLE);
    }

    #[test]
    fn test_description_and_mac_placeholders() {
        let mut record = iface("eth0", &[]);
        record.mac = String::new();
        record.description = Some(String::new());

        let row = InterfaceRow::new(&record, None);
        assert_eq!(row.description, NO_DESCRIPTION);
        assert_eq!(row.mac, NO_MAC);

        record.description = Some("Realtek PCIe GbE".to_string());
        assert_eq!(InterfaceRow::new(&record, None).description, "Realtek PCIe GbE");
    }

    #[test]
    fn test_rows_keep_interface_order() {
        let interfaces = vec![iface("wlan0", &[]), iface("eth0", &[]), iface("lo", &[])];
        let names: Vec<_> = derive_rows(&interfaces, &StatusMap::new())
            .into_iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(names, vec!["wlan0", "eth0", "lo"]);
    }
}
