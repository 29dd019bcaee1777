//! # Messenger Webhook Handler
//!
//! Walks `object -> entry[] -> messaging[]`, classifies every event and sends
//! at most one reply per event. Events are handled sequentially in arrival
//! order; a failure on one event is logged and never stops the others.

use super::{
    client::MessageSender,
    outgoing_schemas::OutgoingMessage,
    schemas::{Entry, EventKind, Message, MessagingEvent, Postback, WebhookPayload},
};
use crate::consts;
use log::{error, info, warn};

/// What happened to the events of one webhook call
#[derive(Debug, Default, PartialEq)]
pub struct DispatchReport {
    /// Replies accepted by the transport
    pub sent: usize,
    /// Replies that could not be delivered
    pub failed: usize,
    /// Events with no reply: unknown shape, malformed, or nothing to answer
    pub ignored: usize,
}

/// Builds the reply for a message event
///
/// - text "generic" -> generic template
/// - any other text -> echo of that text
/// - attachments only -> fixed acknowledgement
/// - neither -> no reply
pub fn compose_message_reply(sender_id: &str, message: &Message) -> Option<OutgoingMessage> {
    match (&message.text, &message.attachments) {
        (Some(text), _) if text == consts::GENERIC_KEYWORD => {
            Some(OutgoingMessage::new_generic_template(sender_id.to_string()))
        }
        (Some(text), _) => Some(OutgoingMessage::new_text(
            sender_id.to_string(),
            text.clone(),
        )),
        (None, Some(_)) => Some(OutgoingMessage::new_text(
            sender_id.to_string(),
            consts::ATTACHMENT_RECEIVED_TEXT.to_string(),
        )),
        (None, None) => None,
    }
}

/// Builds the reply for a postback event, payload interpolated verbatim
pub fn compose_postback_reply(sender_id: &str, postback: &Postback) -> OutgoingMessage {
    OutgoingMessage::new_text(
        sender_id.to_string(),
        format!("{}{}", consts::POSTBACK_REPLY_PREFIX, postback.payload),
    )
}

/// Builds the reply for any classified event
pub fn compose_reply(event: &MessagingEvent) -> Option<OutgoingMessage> {
    match event.kind() {
        EventKind::Message(message) => {
            info!(
                "Received message for user {sender} and page {page} at {time} with message: {message:?}",
                sender = event.sender.id,
                page = event.recipient.id,
                time = display_timestamp(event),
            );
            compose_message_reply(&event.sender.id, message)
        }
        EventKind::Postback(postback) => {
            info!(
                "Received postback for user {sender} and page {page} at {time} with payload: {payload}",
                sender = event.sender.id,
                page = event.recipient.id,
                time = display_timestamp(event),
                payload = postback.payload,
            );
            Some(compose_postback_reply(&event.sender.id, postback))
        }
        EventKind::Unknown => None,
    }
}

fn display_timestamp(event: &MessagingEvent) -> String {
    event
        .timestamp
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "unknown time".to_string())
}

/// Whether a raw event carries a non-null `message` or `postback`
fn is_known_shape(raw_event: &serde_json::Value) -> bool {
    ["message", "postback"]
        .iter()
        .any(|key| raw_event.get(key).is_some_and(|value| !value.is_null()))
}

/// Handles one raw messaging event
async fn handle_event(
    raw_event: &serde_json::Value,
    sender: &dyn MessageSender,
    report: &mut DispatchReport,
) {
    if !is_known_shape(raw_event) {
        warn!("Webhook received unknown event: {raw_event}");
        report.ignored += 1;
        return;
    }

    let event: MessagingEvent = match serde_json::from_value(raw_event.clone()) {
        Ok(event) => event,
        Err(e) => {
            warn!("Webhook received malformed event ({e}): {raw_event}");
            report.ignored += 1;
            return;
        }
    };

    let Some(reply) = compose_reply(&event) else {
        report.ignored += 1;
        return;
    };

    match sender.send_message(&reply).await {
        Ok(_) => report.sent += 1,
        Err(e) => {
            error!(
                "Failed to send reply to {recipient}: {e:#}",
                recipient = reply.recipient_id()
            );
            report.failed += 1;
        }
    }
}

/// Handles the events of one raw entry, skipping it when it is not an
/// object with a `messaging` array
async fn handle_entry(
    raw_entry: &serde_json::Value,
    sender: &dyn MessageSender,
    report: &mut DispatchReport,
) {
    if !raw_entry.is_object() {
        warn!("Webhook received malformed entry: {raw_entry}");
        report.ignored += 1;
        return;
    }

    let entry = match serde_json::from_value::<Entry>(raw_entry.clone()) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Webhook received malformed entry ({e}): {raw_entry}");
            report.ignored += 1;
            return;
        }
    };

    info!(
        "Processing entry for page {id} at {time}",
        id = entry.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        time = entry.time.as_ref().map(ToString::to_string).unwrap_or_default(),
    );

    let events: &[serde_json::Value] = match &entry.messaging {
        serde_json::Value::Array(events) => events.as_slice(),
        serde_json::Value::Null => &[],
        other => {
            warn!("Webhook received entry with malformed 'messaging': {other}");
            report.ignored += 1;
            return;
        }
    };

    for raw_event in events {
        handle_event(raw_event, sender, report).await;
    }
}

/// Main webhook processor
///
/// Non "page" objects are acknowledged without processing. Malformed entries
/// and events are logged and counted as ignored in the [`DispatchReport`].
pub async fn process_webhook(
    payload: &WebhookPayload,
    sender: &dyn MessageSender,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    if !payload.is_page() {
        info!(
            "Ignoring webhook for object {object}",
            object = payload.object
        );
        return report;
    }

    let entries: &[serde_json::Value] = match &payload.entry {
        serde_json::Value::Array(entries) => entries.as_slice(),
        serde_json::Value::Null => &[],
        other => {
            warn!("Webhook received page payload with malformed 'entry': {other}");
            report.ignored += 1;
            return report;
        }
    };
    info!("Received page webhook with {} entries", entries.len());

    for raw_entry in entries {
        handle_entry(raw_entry, sender, &mut report).await;
    }

    report
}
