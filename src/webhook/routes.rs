use crate::consts;
use ntex::web;

/// Configures the Messenger webhook routes. They are public endpoints that
/// don't require a session.
///
/// # Routes
/// - `GET /webhook` - subscription handshake
/// - `POST /webhook` - event receiver
pub fn messenger(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(consts::WEBHOOK_PATH)
            .service((super::messenger::verify, super::messenger::receive)),
    );
}
