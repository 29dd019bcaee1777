//! Messenger webhook endpoint handlers
//!
//! - `GET /webhook` answers the subscription handshake
//! - `POST /webhook` receives event batches and replies through the Send API
//!
//! Requests are handled synchronously: every reply of a batch is sent before
//! the batch is acknowledged.

use super::{handler, schemas, security};
use crate::{
    consts,
    front::{AppState, errors},
};
use log::info;
use ntex::{util::Bytes, web};
use serde::Deserialize;

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    /// The mode parameter, should be "subscribe"
    #[serde(rename = "hub.mode", default)]
    pub mode: String,
    /// The verification token configured on the platform
    #[serde(rename = "hub.verify_token", default)]
    pub verify_token: String,
    /// The challenge string to echo back
    #[serde(rename = "hub.challenge", default)]
    pub challenge: String,
}

/// Webhook verification endpoint (GET)
///
/// # Returns
/// - 200 with the challenge as body if mode and token match
/// - 403 otherwise, including query strings that cannot be decoded
#[web::get("")]
pub async fn verify(
    req: web::HttpRequest,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let query = web::types::Query::<VerifyQuery>::from_query(req.query_string())
        .map_err(|e| {
            info!("Failed validation. Invalid query string: {e}");
            errors::WebhookError::Forbidden
        })?
        .into_inner();

    info!("hub.mode = {mode}", mode = query.mode);

    if !security::verify_subscription(
        &query.mode,
        &query.verify_token,
        &app_state.config.verify_token,
    ) {
        info!("Failed validation. Make sure the validation tokens match.");
        return Err(errors::WebhookError::Forbidden.into());
    }

    info!("Validating webhook");

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(query.challenge))
}

/// Rejects the request when an app secret is configured and the
/// `X-Hub-Signature-256` header is missing or does not match the body.
fn check_signature(
    req: &web::HttpRequest,
    body: &[u8],
    app_state: &AppState,
) -> Result<(), errors::WebhookError> {
    let Some(app_secret) = app_state.config.app_secret() else {
        return Ok(());
    };

    let signature = req
        .headers()
        .get(consts::SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(errors::WebhookError::Forbidden)?;

    if !security::verify_signature(signature, body, app_secret) {
        return Err(errors::WebhookError::Forbidden);
    }

    Ok(())
}

/// Decodes the body, which must be a JSON object
fn parse_payload(body: &[u8]) -> Result<schemas::WebhookPayload, errors::WebhookError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| errors::WebhookError::MalformedPayload(format!("invalid JSON: {e}")))?;

    if !value.is_object() {
        return Err(errors::WebhookError::MalformedPayload(
            "body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| errors::WebhookError::MalformedPayload(format!("invalid payload: {e}")))
}

/// Webhook receiver endpoint (POST)
///
/// # Returns
/// - 200 "POST done" once every event was handled, whatever the send outcomes
/// - 400 if the body is not a JSON object
/// - 403 if the payload signature is required and invalid
#[web::post("")]
pub async fn receive(
    req: web::HttpRequest,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    check_signature(&req, &body, &app_state)?;

    info!("{}", String::from_utf8_lossy(&body));

    let payload = parse_payload(&body)?;
    info!("{object}", object = payload.object);

    let report = handler::process_webhook(&payload, app_state.sender.as_ref()).await;

    info!(
        "Webhook processed: {sent} sent, {failed} failed, {ignored} ignored",
        sent = report.sent,
        failed = report.failed,
        ignored = report.ignored,
    );

    Ok(web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(consts::POST_DONE))
}
