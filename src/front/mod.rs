pub mod errors;
pub mod server;

use crate::{config::AppConfig, webhook::messenger::client::ImplMessageSender};
use std::sync::Arc;

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sender: ImplMessageSender,
}
