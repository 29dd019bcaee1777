//! Messenger webhook integration module
//!
//! ## Submodules
//!
//! - [`handler`] - Event dispatch and reply composition
//! - [`routes`] - HTTP endpoint handlers for the webhook
//! - [`schemas`] - Inbound webhook payloads
//! - [`outgoing_schemas`] - Send API payloads
//! - [`client`] - Send API client
//! - [`security`] - Verify token and payload signature checks

pub mod client;
pub mod handler;
pub mod outgoing_schemas;
pub mod routes;
pub mod schemas;
pub mod security;

pub use routes::{receive, verify};
