//! Webhook handlers for the messaging platform
//!
//! - [`messenger`] - Messenger page webhook handlers

pub mod messenger;
pub mod routes;
