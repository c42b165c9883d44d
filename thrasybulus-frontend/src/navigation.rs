//! Navigation state for the dashboard.
//!
//! Holds the current page and an argument bag scoped to that page. Changing
//! page always clears the arguments, so data for the destination page has to
//! be supplied after the transition. [`NavigationState::go_to`] returns an
//! [`Arrival`] handle to make that ordering explicit at the call site:
//!
//! ```
//! use thrasybulus_frontend::navigation::{NavigationState, Page};
//!
//! let mut nav = NavigationState::new();
//! nav.go_to(Page::Interface)
//!     .with_arg("interface", serde_json::json!({"name": "eth0"}));
//! assert_eq!(nav.current_args().len(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thrasybulus_shared::Interface;
use tracing::debug;

/// Argument key under which the selected interface is stored.
pub const INTERFACE_ARG: &str = "interface";

/// Page-scoped arguments.
pub type PageArgs = BTreeMap<String, Value>;

/// Logical pages of the dashboard.
///
/// `Unknown` carries a route name nothing renders. It exists so that a bad
/// route reaches the view, which shows an internal-error panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Index,
    Interface,
    Unknown(String),
}

impl Page {
    pub fn name(&self) -> &str {
        match self {
            Page::Index => "index",
            Page::Interface => "interface",
            Page::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "index" => Page::Index,
            "interface" => Page::Interface,
            other => Page::Unknown(other.to_string()),
        })
    }
}

/// Current page plus its argument bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    page: Page,
    args: PageArgs,
}

impl NavigationState {
    /// Starts on the index page with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> &Page {
        &self.page
    }

    pub fn current_args(&self) -> &PageArgs {
        &self.args
    }

    /// Switches page and clears the argument bag.
    ///
    /// The returned handle can hand arguments to the destination page.
    /// Dropping it leaves the bag empty.
    pub fn go_to(&mut self, page: Page) -> Arrival<'_> {
        debug!("Navigating {} -> {}", self.page, page);
        self.page = page;
        self.args.clear();
        Arrival { state: self }
    }

    /// Replaces the argument bag of the current page wholesale.
    pub fn set_args(&mut self, args: PageArgs) {
        self.args = args;
    }

    /// Decodes the interface stored under [`INTERFACE_ARG`], if any.
    pub fn selected_interface(&self) -> Option<Interface> {
        let value = self.args.get(INTERFACE_ARG)?;
        match serde_json::from_value(value.clone()) {
            Ok(interface) => Some(interface),
            Err(e) => {
                debug!("Page argument '{}' is not an interface: {}", INTERFACE_ARG, e);
                None
            }
        }
    }

    /// Navigates to the interface page with `interface` as its argument.
    pub fn manage_interface(&mut self, interface: &Interface) {
        let value = serde_json::to_value(interface).unwrap_or(Value::Null);
        self.go_to(Page::Interface).with_arg(INTERFACE_ARG, value);
    }
}

/// Handle returned by [`NavigationState::go_to`].
#[must_use = "arguments for the new page can only be set after navigating"]
pub struct Arrival<'a> {
    state: &'a mut NavigationState,
}

impl Arrival<'_> {
    /// Replaces the new page's argument bag.
    pub fn with_args(self, args: PageArgs) {
        self.state.set_args(args);
    }

    /// Sets a single argument on the new page.
    pub fn with_arg(self, key: impl Into<String>, value: Value) {
        let mut args = PageArgs::new();
        args.insert(key.into(), value);
        self.state.set_args(args);
    }

    /// Leaves the argument bag empty.
    pub fn without_args(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eth0() -> Interface {
        Interface {
            name: "eth0".to_string(),
            mac: "AA:BB".to_string(),
            description: None,
            ips: vec!["10.0.0.2".to_string()],
        }
    }

    #[test]
    fn test_initial_state() {
        let nav = NavigationState::new();
        assert_eq!(nav.current_page(), &Page::Index);
        assert!(nav.current_args().is_empty());
    }

    #[test]
    fn test_go_to_clears_args() {
        let mut nav = NavigationState::new();
        let mut args = PageArgs::new();
        args.insert("filter".to_string(), json!("eth"));
        nav.set_args(args);

        nav.go_to(Page::Interface).without_args();
        assert!(nav.current_args().is_empty());

        // Re-entering the same page still resets.
        nav.set_args(PageArgs::from([("x".to_string(), json!(1))]));
        nav.go_to(Page::Interface).without_args();
        assert!(nav.current_args().is_empty());
    }

    #[test]
    fn test_set_args_before_go_to_is_lost() {
        let mut nav = NavigationState::new();
        nav.set_args(PageArgs::from([(INTERFACE_ARG.to_string(), json!("eth0"))]));
        nav.go_to(Page::Interface).without_args();
        assert!(nav.current_args().is_empty());
    }

    #[test]
    fn test_set_args_replaces_wholesale() {
        let mut nav = NavigationState::new();
        nav.go_to(Page::Interface)
            .with_args(PageArgs::from([
                ("a".to_string(), json!(1)),
                ("b".to_string(), json!(2)),
            ]));

        let replacement = PageArgs::from([("c".to_string(), json!(3))]);
        nav.set_args(replacement.clone());
        assert_eq!(nav.current_args(), &replacement);
        assert_eq!(nav.current_page(), &Page::Interface);
    }

    #[test]
    fn test_manage_interface_round_trips_selection() {
        let mut nav = NavigationState::new();
        nav.manage_interface(&eth0());

        assert_eq!(nav.current_page(), &Page::Interface);
        assert_eq!(nav.selected_interface(), Some(eth0()));

        nav.go_to(Page::Index).without_args();
        assert_eq!(nav.selected_interface(), None);
    }

    #[test]
    fn test_selected_interface_rejects_malformed_arg() {
        let mut nav = NavigationState::new();
        nav.go_to(Page::Interface)
            .with_arg(INTERFACE_ARG, json!({"name": "eth0"}));
        assert_eq!(nav.selected_interface(), None);
    }

    #[test]
    fn test_page_names() {
        assert_eq!("index".parse::<Page>().unwrap(), Page::Index);
        assert_eq!("interface".parse::<Page>().unwrap(), Page::Interface);
        assert_eq!(
            "sniffer".parse::<Page>().unwrap(),
            Page::Unknown("sniffer".to_string())
        );
        assert_eq!(Page::Unknown("x".to_string()).to_string(), "x");
    }
}
