//! Thrasybulus dashboard library.
//!
//! Client-side core of the dashboard (backend client, interface
//! synchronization, navigation) plus the iced application that renders it.

pub mod api_client;
pub mod app;
pub mod interface_sync;
pub mod messages;
pub mod navigation;
pub mod settings;
pub mod view;
pub mod view_model;
